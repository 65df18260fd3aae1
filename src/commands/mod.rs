//! Command handlers for Sleuth
//!
//! Each submodule implements one CLI command on top of the library.

use crate::config::Config;
use crate::error::{Result, SleuthError};
use crate::server::AppState;

// Serve command handler
pub mod serve {
    //! Runs the HTTP server until interrupted.

    use super::*;

    /// Start the HTTP server using the configured listener and API client
    pub async fn run_serve(config: Config) -> Result<()> {
        let state = AppState::from_config(&config)?;
        crate::server::run_server(&config.server.host, config.server.port, state).await
    }
}

// One-shot ask command handler
pub mod ask {
    //! Answers one question from the terminal.
    //!
    //! The question comes from `--question`, or is read once from an
    //! interactive prompt when the flag is absent.

    use super::*;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Ask a single question and print the reply
    pub async fn run_ask(config: Config, question: Option<String>) -> Result<()> {
        let question = match question {
            Some(q) => q,
            None => prompt_question()?,
        };
        let question = question.trim();
        if question.is_empty() {
            return Err(SleuthError::MissingQuestion.into());
        }

        let state = AppState::from_config(&config)?;
        match state.ask(question).await? {
            Some(reply) => println!("{}", reply),
            None => println!("(no reply)"),
        }
        Ok(())
    }

    fn prompt_question() -> Result<String> {
        let mut rl = DefaultEditor::new()?;
        match rl.readline("Question: ") {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                Err(SleuthError::MissingQuestion.into())
            }
            Err(e) => Err(e.into()),
        }
    }
}

// Assistant inspection command handler
pub mod assistant {
    //! Prints the persisted assistant record.

    use super::*;

    /// Resolve the assistant (creating it on first use) and print its record
    pub async fn show_assistant(config: Config) -> Result<()> {
        let state = AppState::from_config(&config)?;
        let record = state.registry.resolve_record(state.api.as_ref()).await?;
        println!("{}", serde_json::to_string_pretty(&record)?);
        Ok(())
    }
}
