//! Question answering against a fresh thread
//!
//! Each question gets its own thread: the question is posted, a run is
//! started and awaited, and the reply is the last assistant message the run
//! produced.

use crate::api::{AssistantApi, Message, MessageRole, RunStatus};
use crate::assistant::waiter::RunCompletionWaiter;
use crate::error::Result;

/// Everything learned from running one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Thread created for the question
    pub thread_id: String,
    /// Run that answered it
    pub run_id: String,
    /// Terminal status the run ended in
    pub status: RunStatus,
    /// Reply text, if the run produced an assistant message with text
    pub reply: Option<String>,
}

/// Drives a single question through thread, message, run and reply
#[derive(Debug, Clone, Default)]
pub struct ConversationRunner {
    waiter: RunCompletionWaiter,
}

impl ConversationRunner {
    /// Create a runner that waits for runs with `waiter`
    pub fn new(waiter: RunCompletionWaiter) -> Self {
        Self { waiter }
    }

    /// Ask `question` and return the reply text
    ///
    /// `None` covers both a run that ended without completing and a
    /// completed run that produced no text; use [`Self::run_question`] to
    /// tell them apart.
    pub async fn answer(
        &self,
        api: &dyn AssistantApi,
        assistant_id: &str,
        question: &str,
    ) -> Result<Option<String>> {
        Ok(self.run_question(api, assistant_id, question).await?.reply)
    }

    /// Ask `question` and return the full outcome of the run
    ///
    /// # Errors
    ///
    /// Propagates any failed remote call, and the waiter's poll and timeout
    /// errors.
    pub async fn run_question(
        &self,
        api: &dyn AssistantApi,
        assistant_id: &str,
        question: &str,
    ) -> Result<RunOutcome> {
        let thread = api.create_thread().await?;
        tracing::debug!(thread_id = %thread.id, "Created thread");

        api.create_message(&thread.id, MessageRole::User, question)
            .await?;

        let run = api.create_run(&thread.id, assistant_id).await?;
        tracing::debug!(thread_id = %thread.id, run_id = %run.id, "Started run");

        let status = self
            .waiter
            .await_terminal(api, &thread.id, &run.id)
            .await?;

        let messages = api.list_messages(&thread.id).await?;
        let reply = last_reply_for_run(&messages, &run.id).map(str::to_string);

        if reply.is_none() {
            tracing::info!(run_id = %run.id, %status, "Run produced no assistant reply");
        }

        Ok(RunOutcome {
            thread_id: thread.id,
            run_id: run.id,
            status,
            reply,
        })
    }
}

/// Text of the last assistant message produced by `run_id`, in list order
///
/// Listings are newest first, so this is the run's earliest reply.
fn last_reply_for_run<'a>(messages: &'a [Message], run_id: &str) -> Option<&'a str> {
    messages
        .iter()
        .rev()
        .find(|m| m.role == MessageRole::Assistant && m.run_id.as_deref() == Some(run_id))
        .and_then(Message::first_text)
}
