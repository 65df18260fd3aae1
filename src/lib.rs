//! Sleuth - HTTP front end for a hosted conversational assistant
//!
//! Sleuth forwards a question to a hosted assistant service and returns the
//! reply. Each question runs on a fresh thread; the assistant itself is
//! created once and its identity persisted locally.
//!
//! # Architecture
//!
//! - `api`: remote API trait, wire types, and the HTTP client
//! - `assistant`: assistant provisioning, question runner, and run polling
//! - `server`: axum router and handlers
//! - `commands`: CLI command handlers
//! - `config`: configuration loading and validation
//! - `error`: error types and result alias
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use sleuth::{AppState, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let state = AppState::from_config(&config)?;
//!     let reply = state.ask("Who is the killer?").await?;
//!     println!("{:?}", reply);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod assistant;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod server;

// Re-export commonly used types
pub use api::{AssistantApi, OpenAiClient, RunStatus};
pub use assistant::{AssistantRegistry, ConversationRunner, RunCompletionWaiter};
pub use config::Config;
pub use error::{Result, SleuthError};
pub use server::AppState;

#[cfg(test)]
pub mod test_utils;
