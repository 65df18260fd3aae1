//! HTTP front end
//!
//! Exposes the question pipeline over `axum`:
//!
//! - `GET /` returns a fixed HTML greeting (liveness)
//! - `GET /ask?question=...` and `POST /ask` with `{"question": ...}` answer a
//!   question and respond with `{"response": string|null}`
//!
//! Every pipeline failure is logged and reported to the client as a generic
//! 500; a missing question or an unreadable request is reported as a
//! 400.

mod handlers;

use crate::api::{AssistantApi, OpenAiClient};
use crate::assistant::{AssistantRegistry, ConversationRunner, RunCompletionWaiter};
use crate::config::Config;
use crate::error::Result;

use anyhow::Context;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;

pub use handlers::{AskRequest, AskResponse, ErrorResponse, GREETING_HTML};

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Remote assistant service
    pub api: Arc<dyn AssistantApi>,
    /// Source of the assistant identifier, shared across requests
    pub registry: Arc<AssistantRegistry>,
    /// Drives one question through a fresh thread and run
    pub runner: ConversationRunner,
}

impl AppState {
    /// Assemble state from explicit parts
    pub fn new(
        api: Arc<dyn AssistantApi>,
        registry: AssistantRegistry,
        runner: ConversationRunner,
    ) -> Self {
        Self {
            api,
            registry: Arc::new(registry),
            runner,
        }
    }

    /// Build state backed by the real remote API client
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created
    pub fn from_config(config: &Config) -> Result<Self> {
        let api = OpenAiClient::new(config.openai.clone())?;
        let registry = AssistantRegistry::new(
            config.assistant.record_path.clone(),
            config.assistant.spec(),
        );
        let runner = ConversationRunner::new(RunCompletionWaiter::from_config(&config.polling));
        Ok(Self::new(Arc::new(api), registry, runner))
    }

    /// Resolve the assistant and answer `question` with it
    pub async fn ask(&self, question: &str) -> Result<Option<String>> {
        let assistant_id = self
            .registry
            .resolve_assistant_id(self.api.as_ref())
            .await?;
        self.runner
            .answer(self.api.as_ref(), &assistant_id, question)
            .await
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_index))
        .route(
            "/ask",
            get(handlers::handle_ask_query).post(handlers::handle_ask_json),
        )
        .with_state(state)
}

/// Bind `host:port` and serve until Ctrl-C
pub async fn run_server(host: &str, port: u16, state: AppState) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .context("parse server bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {}", addr))?;

    run_server_with_listener(listener, state).await
}

/// Serve on an already bound listener until Ctrl-C
pub async fn run_server_with_listener(
    listener: tokio::net::TcpListener,
    state: AppState,
) -> Result<()> {
    let local = listener
        .local_addr()
        .context("get server listener local address")?;
    tracing::info!("Server is running on port {}", local.port());

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve HTTP")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
