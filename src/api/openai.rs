//! OpenAI Assistants API client
//!
//! Implements [`AssistantApi`] over HTTPS with `reqwest`, targeting the
//! `assistants=v2` beta surface. The base URL is configurable so tests can
//! point the client at a mock server.

use crate::api::{Assistant, AssistantApi, AssistantSpec, Message, MessageRole, Run, Thread};
use crate::config::OpenAiConfig;
use crate::error::{Result, SleuthError};

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const BETA_HEADER: &str = "OpenAI-Beta";
const BETA_VERSION: &str = "assistants=v2";
const MESSAGE_PAGE_LIMIT: u32 = 100;

/// HTTP client for the hosted assistant service
///
/// # Examples
///
/// ```
/// use sleuth::api::OpenAiClient;
/// use sleuth::config::OpenAiConfig;
///
/// let client = OpenAiClient::new(OpenAiConfig::default());
/// assert!(client.is_ok());
/// ```
pub struct OpenAiClient {
    client: Client,
    api_base: String,
    api_key: Option<String>,
}

/// Paged list envelope
#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    data: Vec<T>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Serialize)]
struct CreateMessageRequest<'a> {
    role: MessageRole,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRunRequest<'a> {
    assistant_id: &'a str,
}

impl OpenAiClient {
    /// Create a new client
    ///
    /// A missing API key is accepted here; each call then fails with
    /// [`SleuthError::MissingCredentials`].
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(concat!("sleuth/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SleuthError::Http)
            .context("Failed to create HTTP client")?;

        if config.api_key.is_none() {
            tracing::warn!("No OPENAI_API_KEY configured; remote calls will fail");
        }
        tracing::info!("Initialized assistant API client: base={}", config.api_base);

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Base URL requests are sent to
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            SleuthError::MissingCredentials("OPENAI_API_KEY is not set".to_string())
        })?;
        Ok(builder.bearer_auth(key).header(BETA_HEADER, BETA_VERSION))
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, action: &str) -> Result<T> {
        let response = self
            .authorize(builder)?
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Request to {} failed: {}", action, e);
                SleuthError::Http(e)
            })
            .with_context(|| format!("Failed to {}", action))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Assistant API returned {} on {}: {}", status, action, error_text);
            return Err(SleuthError::Remote(format!(
                "{} returned {}: {}",
                action, status, error_text
            ))
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(SleuthError::Http)
            .with_context(|| format!("Failed to read response to {}", action))?;
        let value = serde_json::from_str(&body)
            .map_err(|e| {
                tracing::error!("Failed to parse response to {}: {}", action, e);
                SleuthError::Serialization(e)
            })
            .with_context(|| format!("Failed to parse response to {}", action))?;
        Ok(value)
    }
}

#[async_trait]
impl AssistantApi for OpenAiClient {
    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<Assistant> {
        tracing::debug!("Creating assistant: name={}, model={}", spec.name, spec.model);
        let request = self.client.post(self.url("assistants")).json(spec);
        self.send(request, "create assistant").await
    }

    async fn create_thread(&self) -> Result<Thread> {
        let request = self
            .client
            .post(self.url("threads"))
            .json(&serde_json::json!({}));
        self.send(request, "create thread").await
    }

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<Message> {
        let request = self
            .client
            .post(self.url(&format!("threads/{}/messages", thread_id)))
            .json(&CreateMessageRequest { role, content });
        self.send(request, "create message").await
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run> {
        let request = self
            .client
            .post(self.url(&format!("threads/{}/runs", thread_id)))
            .json(&CreateRunRequest { assistant_id });
        self.send(request, "create run").await
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        let request = self
            .client
            .get(self.url(&format!("threads/{}/runs/{}", thread_id, run_id)));
        self.send(request, "retrieve run").await
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<Message>> {
        let request = self
            .client
            .get(self.url(&format!("threads/{}/messages", thread_id)))
            .query(&[
                ("order", "desc".to_string()),
                ("limit", MESSAGE_PAGE_LIMIT.to_string()),
            ]);
        let page: ListResponse<Message> = self.send(request, "list messages").await?;
        if page.has_more {
            tracing::debug!(
                "Thread {} has more than {} messages; only the first page was read",
                thread_id,
                MESSAGE_PAGE_LIMIT
            );
        }
        Ok(page.data)
    }
}
