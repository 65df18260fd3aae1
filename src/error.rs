//! Error types for Sleuth
//!
//! This module defines the error kinds raised while resolving the assistant,
//! driving a run and talking to the remote API, using `thiserror` for
//! ergonomic error handling.

use thiserror::Error;

/// Main error type for Sleuth operations
///
/// Every failure in the question pipeline is eventually flattened into a
/// generic HTTP 500 by the server, except the kinds for which
/// [`SleuthError::is_client_error`] holds, which are reported as a 400 with
/// their message. The other variants exist so that logs can tell the causes
/// apart.
#[derive(Error, Debug)]
pub enum SleuthError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// No API credential was configured for the remote service
    #[error("Missing credentials for remote service: {0}")]
    MissingCredentials(String),

    /// The remote assistant could not be created or its record persisted
    #[error("Assistant provisioning failed: {0}")]
    Provisioning(String),

    /// The remote API answered a call with a non-success status
    #[error("Remote API error: {0}")]
    Remote(String),

    /// Retrieving a run's status failed while waiting for it to finish
    #[error("Failed to poll run {run_id}: {message}")]
    RunPoll {
        /// Run being polled
        run_id: String,
        /// Underlying failure
        message: String,
    },

    /// A run never reached a terminal status within the polling budget
    #[error("Run {run_id} did not finish after {attempts} polls")]
    RunTimeout {
        /// Run being polled
        run_id: String,
        /// Number of re-polls performed before giving up
        attempts: u32,
    },

    /// The request carried no usable question
    #[error("Missing required parameter: question")]
    MissingQuestion,

    /// The request body or query string could not be read
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl SleuthError {
    /// Returns true when the error was caused by bad client input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SleuthError::MissingQuestion | SleuthError::InvalidRequest(_)
        )
    }
}

/// Result type alias for Sleuth operations
///
/// Uses `anyhow::Error` so context can be attached while propagating;
/// callers that need the kind downcast to [`SleuthError`].
pub type Result<T> = anyhow::Result<T>;
