// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for starburst-sep-sdk.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::types::{WorkflowError, WorkflowState};

/// Result type using SdkError.
pub type Result<T> = std::result::Result<T, SdkError>;

/// Error codes reported by the SEP server in error payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidArgument,
    NotSupported,
    PermissionDenied,
    Unauthenticated,
    NotFound,
    EntityNotFound,
    AlreadyExists,
    Conflict,
    InternalError,
    /// Any code this client does not know about, kept verbatim.
    Other(String),
}

impl ErrorCode {
    pub fn parse(code: &str) -> Self {
        match code {
            "INVALID_ARGUMENT" => ErrorCode::InvalidArgument,
            "NOT_SUPPORTED" => ErrorCode::NotSupported,
            "PERMISSION_DENIED" => ErrorCode::PermissionDenied,
            "UNAUTHENTICATED" => ErrorCode::Unauthenticated,
            "NOT_FOUND" => ErrorCode::NotFound,
            "ENTITY_NOT_FOUND" => ErrorCode::EntityNotFound,
            "ALREADY_EXISTS" => ErrorCode::AlreadyExists,
            "CONFLICT" => ErrorCode::Conflict,
            "INTERNAL_ERROR" => ErrorCode::InternalError,
            other => ErrorCode::Other(other.to_string()),
        }
    }

    /// Best guess at a code when the server sent none.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorCode::InvalidArgument,
            401 => ErrorCode::Unauthenticated,
            403 => ErrorCode::PermissionDenied,
            404 => ErrorCode::NotFound,
            409 => ErrorCode::AlreadyExists,
            501 => ErrorCode::NotSupported,
            s if s >= 500 => ErrorCode::InternalError,
            s => ErrorCode::Other(format!("HTTP_{}", s)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::NotSupported => "NOT_SUPPORTED",
            ErrorCode::PermissionDenied => "PERMISSION_DENIED",
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::EntityNotFound => "ENTITY_NOT_FOUND",
            ErrorCode::AlreadyExists => "ALREADY_EXISTS",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::Other(code) => code,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur when using the SEP SDK.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Configuration error (missing or invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced an HTTP response.
    #[error("connection error: {0}")]
    Connection(String),

    /// Server answered with a non-2xx status.
    #[error("server error [{status} {code}]: {message}")]
    Api {
        status: u16,
        code: ErrorCode,
        message: String,
        /// Raw response body as returned by the server.
        body: String,
    },

    /// A workflow reached its final status with `ERROR`.
    #[error("{workflow_type} workflow failed: {}", format_workflow_errors(.errors))]
    Workflow {
        workflow_type: String,
        errors: Vec<WorkflowError>,
    },

    /// Polling gave up before the workflow reached a final status.
    #[error("workflow still {} after {elapsed_ms}ms", last_state_label(.last_status))]
    PollTimeout {
        elapsed_ms: u64,
        last_status: Option<WorkflowState>,
    },

    /// A workflow trigger response carried no polling location.
    #[error("no Location header in response to {0}")]
    MissingLocation(String),

    /// Unexpected response from server.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SdkError {
    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server error code of an API error.
    pub fn code(&self) -> Option<&ErrorCode> {
        match self {
            SdkError::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SdkError::Api {
                code: ErrorCode::NotFound | ErrorCode::EntityNotFound,
                ..
            }
        ) || self.status() == Some(404)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, SdkError::PollTimeout { .. })
    }

    /// Build an API error from a failed response body.
    ///
    /// SEP error payloads look like `{"errorCode": "...", "message": "..."}`;
    /// anything else is kept as the message verbatim.
    pub(crate) fn from_response(status: u16, body: String) -> Self {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct ErrorPayload {
            #[serde(alias = "code")]
            error_code: Option<String>,
            message: Option<String>,
        }

        let payload = serde_json::from_str::<ErrorPayload>(&body).ok();
        let code = payload
            .as_ref()
            .and_then(|p| p.error_code.as_deref())
            .map(ErrorCode::parse)
            .unwrap_or_else(|| ErrorCode::from_status(status));
        let message = payload
            .and_then(|p| p.message)
            .unwrap_or_else(|| body.clone());

        SdkError::Api {
            status,
            code,
            message,
            body,
        }
    }
}

fn format_workflow_errors(errors: &[WorkflowError]) -> String {
    if errors.is_empty() {
        return "no error details reported".to_string();
    }
    errors
        .iter()
        .map(|e| format!("{} {}: {}", e.entity_type, e.entity_name, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

fn last_state_label(state: &Option<WorkflowState>) -> String {
    match state {
        Some(state) => state.as_str().to_string(),
        None => "unreported".to_string(),
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SdkError::Serialization(err.to_string())
        } else {
            SdkError::Connection(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for SdkError {
    fn from(err: url::ParseError) -> Self {
        SdkError::Config(format!("invalid URL: {}", err))
    }
}

impl From<reqwest::header::InvalidHeaderValue> for SdkError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        SdkError::Config(format!("invalid header value: {}", err))
    }
}
