// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Asynchronous workflow (publish, delete, refresh) status types.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Server-side state of a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkflowState {
    /// Accepted, not started yet.
    Scheduled,
    /// Running.
    InProgress,
    /// Finished successfully.
    Completed,
    /// Finished with errors.
    Error,
    /// A state this client does not know; kept verbatim.
    Other(String),
}

impl WorkflowState {
    pub fn as_str(&self) -> &str {
        match self {
            WorkflowState::Scheduled => "SCHEDULED",
            WorkflowState::InProgress => "IN_PROGRESS",
            WorkflowState::Completed => "COMPLETED",
            WorkflowState::Error => "ERROR",
            WorkflowState::Other(s) => s,
        }
    }
}

impl From<String> for WorkflowState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SCHEDULED" => WorkflowState::Scheduled,
            "IN_PROGRESS" => WorkflowState::InProgress,
            "COMPLETED" => WorkflowState::Completed,
            "ERROR" => WorkflowState::Error,
            _ => WorkflowState::Other(value),
        }
    }
}

impl From<WorkflowState> for String {
    fn from(state: WorkflowState) -> Self {
        match state {
            WorkflowState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error reported for a single entity (view, materialized view, schema...) of a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowError {
    pub entity_type: String,
    pub entity_name: String,
    pub message: String,
}

/// Status object returned when polling a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStatus {
    /// PUBLISH, DELETE, ...
    #[serde(default)]
    pub workflow_type: String,
    pub status: WorkflowState,
    #[serde(default)]
    pub errors: Vec<WorkflowError>,
    /// The only authority on whether polling may stop.
    #[serde(default)]
    pub is_final_status: bool,
}

impl WorkflowStatus {
    pub fn is_error(&self) -> bool {
        self.status == WorkflowState::Error
    }
}

/// Kind of workflow a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    Publish,
    Delete,
    Refresh,
}

impl WorkflowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowKind::Publish => "publish",
            WorkflowKind::Delete => "delete",
            WorkflowKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A triggered workflow and where to poll for its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowHandle {
    pub kind: WorkflowKind,
    /// Absolute status URL.
    pub location: Url,
}

/// How often and for how long to poll a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between two status checks.
    pub interval: Duration,
    /// Give up once this much time has passed since the first check.
    pub timeout: Duration,
}

impl PollConfig {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}
