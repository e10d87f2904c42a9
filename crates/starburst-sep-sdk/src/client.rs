// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! SepClient for interacting with the Starburst Enterprise REST API.

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, LOCATION};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::auth::{Authenticator, TokenProvider};
use crate::config::SepConfig;
use crate::error::{Result, SdkError};
use crate::types::Page;

const TRINO_ROLE: &str = "x-trino-role";

/// Page size requested from paginated endpoints.
pub(crate) const PAGE_SIZE: u32 = 100;

/// High-level client for the SEP data product and BIAC REST APIs.
///
/// All operations are methods on this type, grouped by resource in the
/// `api` modules. Asynchronous workflows (publish, delete, refresh) return a
/// [`WorkflowHandle`](crate::WorkflowHandle) that can be awaited with
/// [`SepClient::wait_for_workflow`].
#[derive(Debug, Clone)]
pub struct SepClient {
    http: reqwest::Client,
    config: SepConfig,
    base_url: Url,
    auth: Authenticator,
}

impl SepClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SepConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Start building a client, e.g. to attach a [`TokenProvider`].
    pub fn builder(config: SepConfig) -> SepClientBuilder {
        SepClientBuilder {
            config,
            token_provider: None,
        }
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        let config = SepConfig::from_env()?;
        Self::new(config)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &SepConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make one authenticated call so bad credentials surface immediately.
    #[instrument(skip(self))]
    pub async fn check_connection(&self) -> Result<()> {
        self.list_domains().await?;
        info!(host = %self.config.host, "Connected to SEP");
        Ok(())
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// Build an endpoint URL from a fixed prefix and escaped path segments.
    pub(crate) fn endpoint(&self, prefix: &str, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SdkError::Config(format!("cannot build paths on {}", self.base_url)))?
            .pop_if_empty()
            .extend(prefix.split('/'))
            .extend(segments);
        Ok(url)
    }

    /// Resolve a `Location` header value against the base URL.
    pub(crate) fn resolve_location(&self, location: &str) -> Result<Url> {
        Ok(self.base_url.join(location)?)
    }

    async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let authorization = self.auth.header().await?;
        Ok(self
            .http
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, authorization))
    }

    /// Send a request and fail on any non-2xx status.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!(
                    status = status.as_u16(),
                    error = %err,
                    "Failed to read error response body"
                );
                String::new()
            }
        };
        debug!(status = status.as_u16(), "Request failed");
        Err(SdkError::from_response(status.as_u16(), body))
    }

    /// Decode a JSON body; an empty body decodes like `null`.
    pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let text = response.text().await?;
        let text = text.trim();
        let text = if text.is_empty() { "null" } else { text };
        Ok(serde_json::from_str(text)?)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.send(self.request(Method::GET, url).await?).await?;
        Self::read_json(response).await
    }

    pub(crate) async fn get_json_with_query<T, Q>(&self, url: Url, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .send(self.request(Method::GET, url).await?.query(query))
            .await?;
        Self::read_json(response).await
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(method, url).await?.json(body))
            .await?;
        Self::read_json(response).await
    }

    /// Like [`send_json`](Self::send_json) but ignores the response body.
    pub(crate) async fn send_json_no_content<B>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.request(method, url).await?.json(body)).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<()> {
        self.send(self.request(Method::DELETE, url).await?).await?;
        Ok(())
    }

    /// POST without a body and return the resolved `Location` header, if any.
    pub(crate) async fn trigger<Q>(&self, url: Url, query: &Q) -> Result<Option<Url>>
    where
        Q: Serialize + ?Sized,
    {
        let response = self
            .send(self.request(Method::POST, url).await?.query(query))
            .await?;

        debug!(status = response.status().as_u16(), "Workflow accepted");
        match response.headers().get(LOCATION) {
            Some(value) => {
                let location = value.to_str().map_err(|e| {
                    SdkError::UnexpectedResponse(format!("invalid Location header: {}", e))
                })?;
                Ok(Some(self.resolve_location(location)?))
            }
            None => Ok(None),
        }
    }

    /// Fetch every page of a `{result, nextPageToken}` list endpoint.
    pub(crate) async fn get_all_pages<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![("pageSize", PAGE_SIZE.to_string())];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let page: Page<T> = self.get_json_with_query(url.clone(), &query).await?;
            items.extend(page.result);

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(items)
    }
}

/// Builder for [`SepClient`].
pub struct SepClientBuilder {
    config: SepConfig,
    token_provider: Option<Arc<dyn TokenProvider>>,
}

impl SepClientBuilder {
    /// Supply credentials per request (required for Kerberos).
    pub fn token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    pub fn build(self) -> Result<SepClient> {
        let config = self.config;
        config.validate()?;

        let base_url = Url::parse(&config.base_url())?;
        let auth = Authenticator::new(&config.auth, self.token_provider)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(role) = &config.role {
            headers.insert(
                TRINO_ROLE,
                HeaderValue::from_str(&format!("system=ROLE{{{}}}", role))?,
            );
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| SdkError::Config(format!("failed to build HTTP client: {}", e)))?;

        debug!(base_url = %base_url, method = %config.auth.method(), "Created SEP client");

        Ok(SepClient {
            http,
            config,
            base_url,
            auth,
        })
    }
}
