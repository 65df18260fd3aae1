//! Assistant workflow
//!
//! - `registry`: resolve or provision the deployment's assistant
//! - `runner`: answer one question on a fresh thread
//! - `waiter`: poll a run until it is terminal

pub mod registry;
pub mod runner;
pub mod waiter;

pub use registry::{AssistantRecord, AssistantRegistry};
pub use runner::{ConversationRunner, RunOutcome};
pub use waiter::RunCompletionWaiter;
