// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Authorization header construction.
//!
//! Basic and static bearer tokens are turned into a header once, when the
//! client is built. Kerberos (and OAuth2 without a pre-issued token) need
//! credentials that can expire, so they are fetched from a [`TokenProvider`]
//! before every request.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::HeaderValue;

use crate::config::AuthConfig;
use crate::error::{Result, SdkError};

/// Source of short-lived credentials.
///
/// For OAuth2 this returns an access token; for Kerberos it returns the
/// base64 SPNEGO token that follows `Negotiate` in the header.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> Result<String>;
}

/// A provider that always returns the same token.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// `Basic` credentials as sent in the `Authorization` header.
pub fn basic_credentials(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}

fn scheme_header(scheme: &str, token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("{} {}", scheme, token))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Produces the `Authorization` header for each request.
#[derive(Clone)]
pub(crate) enum Authenticator {
    Fixed(HeaderValue),
    Provider {
        scheme: &'static str,
        provider: Arc<dyn TokenProvider>,
    },
}

impl Authenticator {
    pub(crate) fn new(
        auth: &AuthConfig,
        provider: Option<Arc<dyn TokenProvider>>,
    ) -> Result<Self> {
        match (auth, provider) {
            (AuthConfig::Basic { username, password }, _) => {
                let mut value = HeaderValue::from_str(&basic_credentials(username, password))?;
                value.set_sensitive(true);
                Ok(Authenticator::Fixed(value))
            }
            (AuthConfig::OAuth2 { .. } | AuthConfig::OAuth2Jwt { .. }, Some(provider)) => {
                Ok(Authenticator::Provider {
                    scheme: "Bearer",
                    provider,
                })
            }
            (AuthConfig::OAuth2 { access_token: Some(token) }, None)
            | (AuthConfig::OAuth2Jwt { token }, None) => {
                Ok(Authenticator::Fixed(scheme_header("Bearer", token)?))
            }
            (AuthConfig::OAuth2 { access_token: None }, None) => Err(SdkError::Config(
                "oauth2 authentication requires SEP_OAUTH2_TOKEN or a token provider".to_string(),
            )),
            (AuthConfig::Kerberos(_), Some(provider)) => Ok(Authenticator::Provider {
                scheme: "Negotiate",
                provider,
            }),
            (AuthConfig::Kerberos(k), None) => Err(SdkError::Config(format!(
                "kerberos authentication for service '{}' requires a token provider",
                k.service_name
            ))),
        }
    }

    pub(crate) async fn header(&self) -> Result<HeaderValue> {
        match self {
            Authenticator::Fixed(value) => Ok(value.clone()),
            Authenticator::Provider { scheme, provider } => {
                let token = provider.token().await?;
                scheme_header(scheme, &token)
            }
        }
    }
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authenticator::Fixed(_) => f.write_str("Authenticator::Fixed(***)"),
            Authenticator::Provider { scheme, .. } => {
                write!(f, "Authenticator::Provider({})", scheme)
            }
        }
    }
}
