//! Configuration management for Sleuth
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::api::{AssistantSpec, ToolKind};
use crate::error::{Result, SleuthError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for Sleuth
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API connection settings
    #[serde(default)]
    pub openai: OpenAiConfig,
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Assistant identity and provisioning settings
    #[serde(default)]
    pub assistant: AssistantConfig,
    /// Run polling behavior
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Remote API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API credential; usually supplied through `OPENAI_API_KEY`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL of the API, overridable for tests and proxies
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Timeout applied to each individual HTTP request (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_api_base(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8880
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Assistant identity and provisioning settings
///
/// The name, instructions, tools and model are only used the first time an
/// assistant is provisioned. Once the record file exists it wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Location of the persisted assistant record
    #[serde(default = "default_record_path")]
    pub record_path: PathBuf,

    /// Assistant display name
    #[serde(default = "default_assistant_name")]
    pub name: String,

    /// Assistant instructions
    #[serde(default = "default_instructions")]
    pub instructions: String,

    /// Tools enabled on the assistant
    #[serde(default = "default_tools")]
    pub tools: Vec<ToolKind>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_record_path() -> PathBuf {
    PathBuf::from("assistant.json")
}

fn default_assistant_name() -> String {
    "Murder mystery helper".to_string()
}

fn default_instructions() -> String {
    "You're a murder mystery assistant, helping solve murder mysteries.".to_string()
}

fn default_tools() -> Vec<ToolKind> {
    vec![ToolKind::FileSearch]
}

fn default_model() -> String {
    "gpt-4-1106-preview".to_string()
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            record_path: default_record_path(),
            name: default_assistant_name(),
            instructions: default_instructions(),
            tools: default_tools(),
            model: default_model(),
        }
    }
}

impl AssistantConfig {
    /// Configuration sent when a new assistant is created
    pub fn spec(&self) -> AssistantSpec {
        AssistantSpec::new(&self.name, &self.instructions, &self.tools, &self.model)
    }
}

/// Run polling behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Delay between status retrievals (milliseconds)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Maximum number of re-polls before giving up on a run
    #[serde(default = "default_max_polls")]
    pub max_polls: u32,
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_max_polls() -> u32 {
    300
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_polls: default_max_polls(),
        }
    }
}

impl PollingConfig {
    /// Delay between status retrievals
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Config {
    /// Load configuration from file, environment, and CLI
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(SleuthError::Io)
            .with_context(|| format!("Failed to read config file {}", path))?;
        let config = serde_yaml::from_str(&contents)
            .map_err(SleuthError::Yaml)
            .with_context(|| format!("Failed to parse config file {}", path))?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            if !api_key.trim().is_empty() {
                self.openai.api_key = Some(api_key);
            }
        }
        if let Ok(api_base) = std::env::var("SLEUTH_OPENAI_API_BASE") {
            self.openai.api_base = api_base;
        }

        if let Ok(host) = std::env::var("SLEUTH_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
            }
        }

        if let Ok(record_path) = std::env::var("SLEUTH_ASSISTANT_RECORD") {
            self.assistant.record_path = PathBuf::from(record_path);
        }
        if let Ok(model) = std::env::var("SLEUTH_ASSISTANT_MODEL") {
            self.assistant.model = model;
        }

        if let Ok(interval) = std::env::var("SLEUTH_POLL_INTERVAL_MS") {
            match interval.parse() {
                Ok(ms) => self.polling.interval_ms = ms,
                Err(_) => tracing::warn!("Ignoring invalid SLEUTH_POLL_INTERVAL_MS: {}", interval),
            }
        }
        if let Ok(max_polls) = std::env::var("SLEUTH_MAX_POLLS") {
            match max_polls.parse() {
                Ok(n) => self.polling.max_polls = n,
                Err(_) => tracing::warn!("Ignoring invalid SLEUTH_MAX_POLLS: {}", max_polls),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let crate::cli::Commands::Serve { host, port } = &cli.command {
            if let Some(host) = host {
                self.server.host = host.clone();
            }
            if let Some(port) = port {
                self.server.port = *port;
            }
        }
    }

    /// Validate the configuration
    ///
    /// A missing API key is deliberately not checked here: remote calls fail
    /// individually instead, and the server still starts.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.openai.api_base).map_err(|e| {
            SleuthError::Config(format!(
                "openai.api_base is not a valid URL ({}): {}",
                self.openai.api_base, e
            ))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(SleuthError::Config(format!(
                "openai.api_base must use http or https, got {}",
                base.scheme()
            ))
            .into());
        }

        if self.openai.request_timeout_seconds == 0 {
            return Err(SleuthError::Config(
                "openai.request_timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.server.port == 0 {
            return Err(
                SleuthError::Config("server.port must be greater than 0".to_string()).into(),
            );
        }

        if self.assistant.name.trim().is_empty() {
            return Err(
                SleuthError::Config("assistant.name cannot be empty".to_string()).into(),
            );
        }

        if self.assistant.model.trim().is_empty() {
            return Err(
                SleuthError::Config("assistant.model cannot be empty".to_string()).into(),
            );
        }

        if self.polling.interval_ms == 0 {
            return Err(SleuthError::Config(
                "polling.interval_ms must be greater than 0".to_string(),
            )
            .into());
        }

        if self.polling.max_polls == 0 {
            return Err(
                SleuthError::Config("polling.max_polls must be greater than 0".to_string()).into(),
            );
        }

        Ok(())
    }
}
