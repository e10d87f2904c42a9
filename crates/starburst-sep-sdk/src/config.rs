// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration for the SEP client.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::error::{Result, SdkError};
use crate::types::PollConfig;

/// Scheme used to reach the SEP coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl FromStr for Protocol {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            other => Err(SdkError::Config(format!(
                "unsupported protocol '{}', expected http or https",
                other
            ))),
        }
    }
}

/// Authentication method names accepted in `AUTH_METHOD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    #[default]
    Basic,
    #[serde(rename = "oauth2")]
    OAuth2,
    #[serde(rename = "oauth2_jwt")]
    OAuth2Jwt,
    Kerberos,
}

impl AuthMethod {
    pub const SUPPORTED: [&'static str; 4] = ["basic", "oauth2", "oauth2_jwt", "kerberos"];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Basic => "basic",
            AuthMethod::OAuth2 => "oauth2",
            AuthMethod::OAuth2Jwt => "oauth2_jwt",
            AuthMethod::Kerberos => "kerberos",
        }
    }
}

impl FromStr for AuthMethod {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(AuthMethod::Basic),
            "oauth2" => Ok(AuthMethod::OAuth2),
            "oauth2_jwt" => Ok(AuthMethod::OAuth2Jwt),
            "kerberos" => Ok(AuthMethod::Kerberos),
            other => Err(SdkError::Config(format!(
                "unsupported authentication method '{}'. Supported methods: {}",
                other,
                Self::SUPPORTED.join(", ")
            ))),
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kerberos settings. Ticket acquisition itself is left to a
/// [`TokenProvider`](crate::TokenProvider).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KerberosConfig {
    pub service_name: String,
    pub config: Option<PathBuf>,
    pub keytab: Option<PathBuf>,
    pub principal: Option<String>,
}

impl KerberosConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            config: None,
            keytab: None,
            principal: None,
        }
    }
}

/// Credentials for one of the supported authentication methods.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthConfig {
    Basic { username: String, password: String },
    /// OAuth2 access token obtained out of band. Without one, a token
    /// provider must be supplied to the client builder.
    OAuth2 { access_token: Option<String> },
    OAuth2Jwt { token: String },
    Kerberos(KerberosConfig),
}

impl AuthConfig {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        AuthConfig::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn jwt(token: impl Into<String>) -> Self {
        AuthConfig::OAuth2Jwt {
            token: token.into(),
        }
    }

    pub fn method(&self) -> AuthMethod {
        match self {
            AuthConfig::Basic { .. } => AuthMethod::Basic,
            AuthConfig::OAuth2 { .. } => AuthMethod::OAuth2,
            AuthConfig::OAuth2Jwt { .. } => AuthMethod::OAuth2Jwt,
            AuthConfig::Kerberos(_) => AuthMethod::Kerberos,
        }
    }
}

// Secrets never reach logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthConfig::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            AuthConfig::OAuth2 { access_token } => f
                .debug_struct("OAuth2")
                .field("access_token", &access_token.as_ref().map(|_| "***"))
                .finish(),
            AuthConfig::OAuth2Jwt { .. } => {
                f.debug_struct("OAuth2Jwt").field("token", &"***").finish()
            }
            AuthConfig::Kerberos(k) => f.debug_tuple("Kerberos").field(k).finish(),
        }
    }
}

/// Configuration for the SepClient.
#[derive(Debug, Clone)]
pub struct SepConfig {
    /// Coordinator host, optionally with port. Never includes a scheme.
    pub host: String,
    pub protocol: Protocol,
    /// Verify TLS certificates.
    pub verify_ssl: bool,
    pub auth: AuthConfig,
    /// Role activated for every request through `X-Trino-Role`.
    pub role: Option<String>,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Default polling settings for workflows.
    pub poll: PollConfig,
}

impl SepConfig {
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a configuration with default settings.
    pub fn new(host: impl Into<String>, auth: AuthConfig) -> Self {
        Self {
            host: host.into(),
            protocol: Protocol::Https,
            verify_ssl: true,
            auth,
            role: None,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            poll: PollConfig::default(),
        }
    }

    /// Plain HTTP to `localhost:8080` as `user` with an empty password.
    pub fn localhost(user: impl Into<String>) -> Self {
        Self::new("localhost:8080", AuthConfig::basic(user, "")).with_protocol(Protocol::Http)
    }

    /// Create a configuration from the process environment.
    ///
    /// Environment variables:
    /// - `AUTH_METHOD`: basic, oauth2, oauth2_jwt or kerberos (default: basic)
    /// - `SEP_HOST`: Coordinator host, without scheme (required)
    /// - `SEP_PROTOCOL`: http or https (default: https)
    /// - `SSL_VERIFY`: Verify certificates (default: true)
    /// - `SEP_ROLE`: Role to activate on every request
    /// - `SEP_USERNAME`, `SEP_PASSWORD`: basic credentials
    /// - `SEP_OAUTH2_TOKEN`: OAuth2 access token
    /// - `SEP_JWT_TOKEN`: JWT for oauth2_jwt
    /// - `KERBEROS_SERVICE_NAME` (required for kerberos), `KERBEROS_CONFIG`,
    ///   `KERBEROS_KEYTAB`, `KERBEROS_PRINCIPAL`
    /// - `SEP_REQUEST_TIMEOUT_MS` (default: 30000), `SEP_CONNECT_TIMEOUT_MS` (default: 10000)
    /// - `SEP_POLL_INTERVAL_MS` (default: 3000), `SEP_POLL_TIMEOUT_MS` (default: 300000)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load a `.env` file into the process environment, then read it.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        dotenvy::from_path(path)
            .map_err(|e| SdkError::Config(format!("failed to load {}: {}", path.display(), e)))?;
        Self::from_env()
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let required = |key: &str, what: &str| {
            var(key).ok_or_else(|| {
                SdkError::Config(format!(
                    "missing required environment variable: {} ({})",
                    key, what
                ))
            })
        };

        let method: AuthMethod = var("AUTH_METHOD").as_deref().unwrap_or("basic").parse()?;
        let host = required("SEP_HOST", "Starburst host")?;
        let protocol: Protocol = var("SEP_PROTOCOL").as_deref().unwrap_or("https").parse()?;
        let verify_ssl = var("SSL_VERIFY")
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes" | "on"))
            .unwrap_or(true);

        let auth = match method {
            AuthMethod::Basic => AuthConfig::Basic {
                username: required("SEP_USERNAME", "username for basic authentication")?,
                password: required("SEP_PASSWORD", "password for basic authentication")?,
            },
            AuthMethod::OAuth2 => AuthConfig::OAuth2 {
                access_token: var("SEP_OAUTH2_TOKEN"),
            },
            AuthMethod::OAuth2Jwt => AuthConfig::OAuth2Jwt {
                token: required("SEP_JWT_TOKEN", "JWT token for OAuth2 JWT authentication")?,
            },
            AuthMethod::Kerberos => AuthConfig::Kerberos(KerberosConfig {
                service_name: required("KERBEROS_SERVICE_NAME", "Kerberos service name")?,
                config: var("KERBEROS_CONFIG").map(PathBuf::from),
                keytab: var("KERBEROS_KEYTAB").map(PathBuf::from),
                principal: var("KERBEROS_PRINCIPAL"),
            }),
        };

        let millis = |key: &str, default: Duration| -> Result<Duration> {
            match var(key) {
                Some(v) => v
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|e| SdkError::Config(format!("invalid {}: {}", key, e))),
                None => Ok(default),
            }
        };

        let config = Self {
            host,
            protocol,
            verify_ssl,
            auth,
            role: var("SEP_ROLE"),
            request_timeout: millis("SEP_REQUEST_TIMEOUT_MS", Self::DEFAULT_REQUEST_TIMEOUT)?,
            connect_timeout: millis("SEP_CONNECT_TIMEOUT_MS", Self::DEFAULT_CONNECT_TIMEOUT)?,
            poll: PollConfig::new(
                millis("SEP_POLL_INTERVAL_MS", PollConfig::DEFAULT_INTERVAL)?,
                millis("SEP_POLL_TIMEOUT_MS", PollConfig::DEFAULT_TIMEOUT)?,
            ),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server could never accept.
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(SdkError::Config("host must not be empty".to_string()));
        }
        if self.host.contains("://") {
            return Err(SdkError::Config(
                "host should not include protocol (use SEP_PROTOCOL instead)".to_string(),
            ));
        }
        if self.poll.interval.is_zero() {
            return Err(SdkError::Config(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Coordinator base URL, e.g. `https://sep.example.com:8443/`.
    pub fn base_url(&self) -> String {
        format!("{}://{}/", self.protocol.as_str(), self.host)
    }

    /// Summary of the configuration with secrets masked.
    pub fn auth_info(&self) -> AuthInfo {
        let mask = |s: &str| {
            if s.is_empty() {
                "Not set".to_string()
            } else {
                "***".to_string()
            }
        };

        let mut info = AuthInfo {
            method: self.auth.method(),
            host: self.host.clone(),
            protocol: self.protocol,
            verify_ssl: self.verify_ssl,
            role: self.role.clone(),
            username: None,
            password: None,
            token: None,
            service_name: None,
            kerberos_config: None,
            keytab: None,
            principal: None,
        };

        match &self.auth {
            AuthConfig::Basic { username, password } => {
                info.username = Some(username.clone());
                info.password = Some(mask(password));
            }
            AuthConfig::OAuth2 { access_token } => {
                info.token = Some(mask(access_token.as_deref().unwrap_or("")));
            }
            AuthConfig::OAuth2Jwt { token } => info.token = Some(mask(token)),
            AuthConfig::Kerberos(k) => {
                info.service_name = Some(k.service_name.clone());
                info.kerberos_config = k.config.as_ref().map(|p| p.display().to_string());
                info.keytab = k.keytab.as_ref().map(|p| p.display().to_string());
                info.principal = k.principal.clone();
            }
        }
        info
    }

    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn with_verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_poll(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }
}

/// Redacted view of a [`SepConfig`], safe to print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthInfo {
    pub method: AuthMethod,
    pub host: String,
    pub protocol: Protocol,
    pub verify_ssl: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kerberos_config: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keytab: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<String>,
}
