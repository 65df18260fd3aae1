//! Test utilities for Sleuth
//!
//! Provides [`ScriptedApi`], an in-process [`AssistantApi`] whose responses
//! are scripted by the test and whose calls are recorded for assertions.

use crate::api::{
    Assistant, AssistantApi, AssistantSpec, Message, MessageContent, MessageRole, Run, RunStatus,
    TextContent, Thread,
};
use crate::error::{Result, SleuthError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

pub const TEST_ASSISTANT_ID: &str = "asst_test";
pub const TEST_THREAD_ID: &str = "thread_test";
pub const TEST_RUN_ID: &str = "run_test";

/// Scripted remote API
///
/// `retrieve_run` pops the next scripted poll result; the last entry is
/// repeated forever once the script runs out.
pub struct ScriptedApi {
    polls: Mutex<VecDeque<std::result::Result<RunStatus, String>>>,
    messages: Vec<Message>,
    fail_create_assistant: bool,
    fail_create_thread: bool,
    calls: Mutex<Vec<&'static str>>,
    created_specs: Mutex<Vec<AssistantSpec>>,
    posted: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            polls: Mutex::new(VecDeque::from(vec![Ok(RunStatus::Completed)])),
            messages: Vec::new(),
            fail_create_assistant: false,
            fail_create_thread: false,
            calls: Mutex::new(Vec::new()),
            created_specs: Mutex::new(Vec::new()),
            posted: Mutex::new(Vec::new()),
        }
    }

    pub fn with_statuses(self, statuses: &[RunStatus]) -> Self {
        self.with_polls(statuses.iter().copied().map(Ok).collect())
    }

    pub fn with_polls(self, polls: Vec<std::result::Result<RunStatus, String>>) -> Self {
        *self.polls.lock().unwrap() = VecDeque::from(polls);
        self
    }

    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    pub fn failing_create_assistant(mut self) -> Self {
        self.fail_create_assistant = true;
        self
    }

    pub fn failing_create_thread(mut self) -> Self {
        self.fail_create_thread = true;
        self
    }

    /// Names of the API methods called, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|c| **c == method).count()
    }

    pub fn created_specs(&self) -> Vec<AssistantSpec> {
        self.created_specs.lock().unwrap().clone()
    }

    pub fn posted_messages(&self) -> Vec<String> {
        self.posted.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str) {
        self.calls.lock().unwrap().push(method);
    }

    fn run(&self, status: RunStatus) -> Run {
        Run {
            id: TEST_RUN_ID.to_string(),
            thread_id: TEST_THREAD_ID.to_string(),
            assistant_id: TEST_ASSISTANT_ID.to_string(),
            status,
        }
    }
}

impl Default for ScriptedApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssistantApi for ScriptedApi {
    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<Assistant> {
        self.record("create_assistant");
        if self.fail_create_assistant {
            return Err(SleuthError::Remote("create assistant returned 500".to_string()).into());
        }
        self.created_specs.lock().unwrap().push(spec.clone());
        Ok(Assistant {
            id: TEST_ASSISTANT_ID.to_string(),
        })
    }

    async fn create_thread(&self) -> Result<Thread> {
        self.record("create_thread");
        if self.fail_create_thread {
            return Err(SleuthError::Remote("create thread returned 503".to_string()).into());
        }
        Ok(Thread {
            id: TEST_THREAD_ID.to_string(),
        })
    }

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<Message> {
        self.record("create_message");
        self.posted.lock().unwrap().push(content.to_string());
        Ok(Message {
            id: "msg_posted".to_string(),
            thread_id: thread_id.to_string(),
            role,
            run_id: None,
            content: vec![text_part(content)],
        })
    }

    async fn create_run(&self, _thread_id: &str, _assistant_id: &str) -> Result<Run> {
        self.record("create_run");
        Ok(self.run(RunStatus::Queued))
    }

    async fn retrieve_run(&self, _thread_id: &str, _run_id: &str) -> Result<Run> {
        self.record("retrieve_run");
        let next = {
            let mut polls = self.polls.lock().unwrap();
            if polls.len() > 1 {
                polls.pop_front()
            } else {
                polls.front().cloned()
            }
        };
        match next {
            Some(Ok(status)) => Ok(self.run(status)),
            Some(Err(message)) => Err(SleuthError::Remote(message).into()),
            None => Err(SleuthError::Remote("no scripted status".to_string()).into()),
        }
    }

    async fn list_messages(&self, _thread_id: &str) -> Result<Vec<Message>> {
        self.record("list_messages");
        Ok(self.messages.clone())
    }
}

pub fn text_part(value: &str) -> MessageContent {
    MessageContent::Text {
        text: TextContent {
            value: value.to_string(),
        },
    }
}

pub fn user_message(text: &str) -> Message {
    Message {
        id: "msg_user".to_string(),
        thread_id: TEST_THREAD_ID.to_string(),
        role: MessageRole::User,
        run_id: None,
        content: vec![text_part(text)],
    }
}

pub fn assistant_message(id: &str, run_id: Option<&str>, text: &str) -> Message {
    Message {
        id: id.to_string(),
        thread_id: TEST_THREAD_ID.to_string(),
        role: MessageRole::Assistant,
        run_id: run_id.map(str::to_string),
        content: vec![text_part(text)],
    }
}
