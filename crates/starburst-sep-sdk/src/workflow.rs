// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Polling of asynchronous SEP workflows.
//!
//! Publishing, deleting and refreshing run server side. The trigger request
//! answers `202 Accepted` with a `Location` header; that location is polled
//! until the returned status reports `isFinalStatus`.
//!
//! Polling stops only on a final status or on the client-side deadline:
//! - final `COMPLETED` returns the status,
//! - final `ERROR` fails with [`SdkError::Workflow`] carrying every entity error,
//! - the deadline fails with [`SdkError::PollTimeout`].
//!
//! Transport failures and 5xx answers to a status check are logged and
//! retried on the next tick. Any other error ends polling.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::client::SepClient;
use crate::error::{Result, SdkError};
use crate::types::{PollConfig, WorkflowHandle, WorkflowState, WorkflowStatus};

/// Whether a failed status check is worth repeating.
fn is_transient(err: &SdkError) -> bool {
    match err {
        SdkError::Connection(_) => true,
        SdkError::Api { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Call `fetch` every `poll.interval` until it yields a final status.
///
/// `on_status` sees every status returned, final or not.
pub(crate) async fn poll_until_final<F, Fut, P>(
    poll: PollConfig,
    mut fetch: F,
    mut on_status: P,
) -> Result<WorkflowStatus>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<WorkflowStatus>>,
    P: FnMut(&WorkflowStatus),
{
    let started = Instant::now();
    let mut last_status: Option<WorkflowState> = None;
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        match fetch().await {
            Ok(status) => {
                on_status(&status);
                if status.is_final_status {
                    if status.is_error() {
                        warn!(
                            workflow_type = %status.workflow_type,
                            errors = status.errors.len(),
                            "Workflow finished with errors"
                        );
                        return Err(SdkError::Workflow {
                            workflow_type: status.workflow_type,
                            errors: status.errors,
                        });
                    }
                    info!(
                        workflow_type = %status.workflow_type,
                        status = %status.status,
                        attempts = attempt,
                        "Workflow finished"
                    );
                    return Ok(status);
                }
                debug!(status = %status.status, attempt, "Workflow still running");
                last_status = Some(status.status);
            }
            Err(err) if is_transient(&err) => {
                warn!(error = %err, attempt, "Status check failed, retrying");
            }
            Err(err) => return Err(err),
        }

        let elapsed = started.elapsed();
        if elapsed >= poll.timeout {
            return Err(SdkError::PollTimeout {
                elapsed_ms: millis(elapsed),
                last_status,
            });
        }
        sleep(poll.interval.min(poll.timeout - elapsed)).await;
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl SepClient {
    // =========================================================================
    // Workflow polling
    // =========================================================================

    /// Fetch the status at a workflow location once.
    #[instrument(skip(self), fields(location = %location))]
    pub async fn get_workflow_status(&self, location: &Url) -> Result<WorkflowStatus> {
        self.get_json(location.clone()).await
    }

    /// Wait for a workflow to reach a final status.
    ///
    /// Uses the client's configured [`PollConfig`] when `poll` is `None`.
    #[instrument(skip(self, handle), fields(kind = %handle.kind, location = %handle.location))]
    pub async fn wait_for_workflow(
        &self,
        handle: &WorkflowHandle,
        poll: Option<PollConfig>,
    ) -> Result<WorkflowStatus> {
        self.wait_for_workflow_with_progress(handle, poll, |_| {}).await
    }

    /// Like [`wait_for_workflow`](Self::wait_for_workflow), reporting every
    /// observed status to `on_status`.
    pub async fn wait_for_workflow_with_progress<P>(
        &self,
        handle: &WorkflowHandle,
        poll: Option<PollConfig>,
        on_status: P,
    ) -> Result<WorkflowStatus>
    where
        P: FnMut(&WorkflowStatus),
    {
        let poll = poll.unwrap_or(self.config().poll);
        if poll.interval.is_zero() {
            return Err(SdkError::InvalidInput(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        debug!(
            interval_ms = millis(poll.interval),
            timeout_ms = millis(poll.timeout),
            "Polling workflow"
        );
        poll_until_final(
            poll,
            || self.get_workflow_status(&handle.location),
            on_status,
        )
        .await
    }
}
