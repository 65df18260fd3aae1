//! Wire types shared with the remote assistant API
//!
//! These mirror the subset of the Assistants API objects Sleuth reads.
//! Unknown fields are ignored on deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability an assistant is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Sandboxed code execution
    CodeInterpreter,
    /// Search over uploaded files
    FileSearch,
    /// Legacy name for file search, still accepted in stored records
    Retrieval,
}

/// Tool entry in the `{ "type": ... }` shape the API expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Kind of tool
    #[serde(rename = "type")]
    pub kind: ToolKind,
}

impl From<ToolKind> for ToolSpec {
    fn from(kind: ToolKind) -> Self {
        Self { kind }
    }
}

/// Fixed configuration an assistant is created with
///
/// # Examples
///
/// ```
/// use sleuth::api::{AssistantSpec, ToolKind};
///
/// let spec = AssistantSpec::new(
///     "Helper",
///     "Be helpful.",
///     &[ToolKind::FileSearch, ToolKind::FileSearch],
///     "gpt-4o",
/// );
/// assert_eq!(spec.tools.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantSpec {
    /// Display name
    pub name: String,
    /// System instructions
    pub instructions: String,
    /// Enabled tools, without duplicates
    pub tools: Vec<ToolSpec>,
    /// Model identifier
    pub model: String,
}

impl AssistantSpec {
    /// Build a spec, dropping duplicate tool kinds while keeping order
    pub fn new(
        name: impl Into<String>,
        instructions: impl Into<String>,
        tools: &[ToolKind],
        model: impl Into<String>,
    ) -> Self {
        let mut unique: Vec<ToolSpec> = Vec::with_capacity(tools.len());
        for kind in tools {
            if !unique.iter().any(|t| t.kind == *kind) {
                unique.push(ToolSpec::from(*kind));
            }
        }

        Self {
            name: name.into(),
            instructions: instructions.into(),
            tools: unique,
            model: model.into(),
        }
    }
}

/// Assistant object returned by the remote service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Assistant {
    /// Remote identifier
    pub id: String,
}

/// Conversation thread handle
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Thread {
    /// Remote identifier
    pub id: String,
}

/// Lifecycle status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Waiting to be picked up
    Queued,
    /// Executing
    InProgress,
    /// Paused on a tool call the caller must answer
    RequiresAction,
    /// Cancellation requested but not yet applied
    Cancelling,
    /// Cancelled
    Cancelled,
    /// Failed
    Failed,
    /// Finished successfully
    Completed,
    /// Ended early, e.g. on a token limit
    Incomplete,
    /// Exceeded the service-side deadline
    Expired,
    /// A status this client does not know yet; treated as still active
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Returns true when no further transitions can happen
    ///
    /// # Examples
    ///
    /// ```
    /// use sleuth::api::RunStatus;
    ///
    /// assert!(RunStatus::Completed.is_terminal());
    /// assert!(RunStatus::Expired.is_terminal());
    /// assert!(!RunStatus::InProgress.is_terminal());
    /// ```
    pub fn is_terminal(&self) -> bool {
        match self {
            RunStatus::Completed
            | RunStatus::Failed
            | RunStatus::Cancelled
            | RunStatus::Expired
            | RunStatus::Incomplete => true,
            RunStatus::Queued
            | RunStatus::InProgress
            | RunStatus::RequiresAction
            | RunStatus::Cancelling
            | RunStatus::Unknown => false,
        }
    }

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failed => "failed",
            RunStatus::Completed => "completed",
            RunStatus::Incomplete => "incomplete",
            RunStatus::Expired => "expired",
            RunStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One execution of an assistant against a thread
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Run {
    /// Remote identifier
    pub id: String,
    /// Thread the run executes on
    pub thread_id: String,
    /// Assistant being run
    pub assistant_id: String,
    /// Current status
    pub status: RunStatus,
}

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// End user
    User,
    /// The assistant
    Assistant,
}

/// Text payload of a content part
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextContent {
    /// The text itself
    pub value: String,
}

/// One typed part of a message's content
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    /// Plain text
    Text {
        /// Text payload
        text: TextContent,
    },
    /// Images, file references and anything else not read here
    #[serde(other)]
    Unsupported,
}

/// Message on a thread
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    /// Remote identifier
    pub id: String,
    /// Owning thread
    pub thread_id: String,
    /// Author
    pub role: MessageRole,
    /// Run that produced the message, if any
    #[serde(default)]
    pub run_id: Option<String>,
    /// Ordered content parts
    #[serde(default)]
    pub content: Vec<MessageContent>,
}

impl Message {
    /// Text of the first content part, if that part is text
    pub fn first_text(&self) -> Option<&str> {
        match self.content.first()? {
            MessageContent::Text { text } => Some(text.value.as_str()),
            MessageContent::Unsupported => None,
        }
    }
}
