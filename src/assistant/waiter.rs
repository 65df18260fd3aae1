//! Run completion polling
//!
//! [`RunCompletionWaiter`] retrieves a run's status on a fixed interval until
//! the run reaches a terminal status. The number of re-polls is bounded;
//! running out of budget is reported as [`SleuthError::RunTimeout`].

use crate::api::{AssistantApi, RunStatus};
use crate::config::PollingConfig;
use crate::error::{Result, SleuthError};
use std::time::Duration;

/// Polls a run until it reaches a terminal status
#[derive(Debug, Clone)]
pub struct RunCompletionWaiter {
    interval: Duration,
    max_polls: u32,
}

impl RunCompletionWaiter {
    /// Create a waiter with an explicit interval and re-poll budget
    pub fn new(interval: Duration, max_polls: u32) -> Self {
        Self {
            interval,
            max_polls,
        }
    }

    /// Create a waiter from polling configuration
    pub fn from_config(config: &PollingConfig) -> Self {
        Self::new(config.interval(), config.max_polls)
    }

    /// Wait until the run is terminal and return the final status
    ///
    /// Non-completed terminal statuses are logged and returned, not raised.
    ///
    /// # Errors
    ///
    /// - [`SleuthError::RunPoll`] if a status retrieval fails; the failure is
    ///   not retried.
    /// - [`SleuthError::RunTimeout`] if the run is still active after
    ///   `max_polls` re-polls.
    pub async fn await_terminal(
        &self,
        api: &dyn AssistantApi,
        thread_id: &str,
        run_id: &str,
    ) -> Result<RunStatus> {
        let mut attempts: u32 = 0;
        loop {
            let status = self.retrieve_status(api, thread_id, run_id).await?;

            match status {
                RunStatus::Completed => return Ok(status),
                RunStatus::Failed
                | RunStatus::Cancelled
                | RunStatus::Expired
                | RunStatus::Incomplete => {
                    tracing::warn!(
                        run_id,
                        "Run status is '{}'. Unable to complete the request.",
                        status
                    );
                    return Ok(status);
                }
                RunStatus::Queued
                | RunStatus::InProgress
                | RunStatus::RequiresAction
                | RunStatus::Cancelling
                | RunStatus::Unknown => {
                    if attempts >= self.max_polls {
                        tracing::error!(
                            run_id,
                            attempts,
                            "Gave up waiting for run (last status '{}')",
                            status
                        );
                        return Err(SleuthError::RunTimeout {
                            run_id: run_id.to_string(),
                            attempts,
                        }
                        .into());
                    }
                    tracing::trace!(run_id, attempts, "Run status '{}', polling again", status);
                }
            }

            tokio::time::sleep(self.interval).await;
            attempts += 1;
        }
    }

    async fn retrieve_status(
        &self,
        api: &dyn AssistantApi,
        thread_id: &str,
        run_id: &str,
    ) -> Result<RunStatus> {
        let run = api.retrieve_run(thread_id, run_id).await.map_err(|e| {
            tracing::error!(run_id, "Failed to retrieve run status: {:#}", e);
            SleuthError::RunPoll {
                run_id: run_id.to_string(),
                message: format!("{:#}", e),
            }
        })?;
        Ok(run.status)
    }
}

impl Default for RunCompletionWaiter {
    fn default() -> Self {
        Self::from_config(&PollingConfig::default())
    }
}
