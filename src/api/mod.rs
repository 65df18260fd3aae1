//! Remote assistant API abstraction
//!
//! This module contains the [`AssistantApi`] trait describing the operations
//! Sleuth consumes from the hosted assistant service, the wire types those
//! operations exchange, and [`OpenAiClient`], the HTTP implementation.

pub mod openai;
pub mod types;

pub use openai::OpenAiClient;
pub use types::{
    Assistant, AssistantSpec, Message, MessageContent, MessageRole, Run, RunStatus, TextContent,
    Thread, ToolKind, ToolSpec,
};

use crate::error::Result;
use async_trait::async_trait;

/// Operations offered by the hosted assistant service
///
/// Every call is a single network round trip. Implementations do not retry;
/// retry policy, where any exists, lives with the caller.
#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// Create a new assistant from the given configuration
    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<Assistant>;

    /// Open a new, empty conversation thread
    async fn create_thread(&self) -> Result<Thread>;

    /// Append a message to a thread
    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<Message>;

    /// Start a run of `assistant_id` against a thread
    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run>;

    /// Fetch the current state of a run
    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;

    /// List the messages on a thread, newest first (the remote default order)
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<Message>>;
}
