//! Durable assistant identity
//!
//! The assistant is created once per deployment and its identity is kept in
//! a JSON record on disk. Every later start reads the record instead of
//! creating another remote assistant.
//!
//! Resolution is check-then-create without locking: two processes starting
//! for the first time at once can each create an assistant, and the last
//! record written wins.

use crate::api::{AssistantApi, AssistantSpec};
use crate::error::{Result, SleuthError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persisted assistant identity and the configuration it was created with
///
/// Only `assistantId` is required when reading. The other fields describe
/// how the assistant was created and are kept as written, so a record from
/// an older or hand-edited deployment still resolves to its assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRecord {
    /// Remote assistant identifier
    pub assistant_id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Instructions
    #[serde(default)]
    pub instructions: String,
    /// Enabled tools, in the remote API's `{ "type": ... }` shape
    #[serde(default)]
    pub tools: Vec<serde_json::Value>,
    /// Model identifier
    #[serde(default)]
    pub model: String,
}

impl AssistantRecord {
    fn from_spec(
        assistant_id: String,
        spec: AssistantSpec,
    ) -> std::result::Result<Self, SleuthError> {
        let tools = spec
            .tools
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()?;

        Ok(Self {
            assistant_id,
            name: spec.name,
            instructions: spec.instructions,
            tools,
            model: spec.model,
        })
    }
}

/// Resolves, or provisions on first use, the assistant to run questions on
#[derive(Debug, Clone)]
pub struct AssistantRegistry {
    path: PathBuf,
    spec: AssistantSpec,
}

impl AssistantRegistry {
    /// Create a registry backed by the record at `path`
    ///
    /// `spec` is only used if a new assistant has to be created.
    pub fn new(path: impl Into<PathBuf>, spec: AssistantSpec) -> Self {
        Self {
            path: path.into(),
            spec,
        }
    }

    /// Location of the record file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the persisted record
    ///
    /// # Errors
    ///
    /// Returns [`SleuthError::Io`] if the file is missing or unreadable and
    /// [`SleuthError::Serialization`] if it is not JSON or has no
    /// `assistantId`
    pub async fn load_record(&self) -> Result<AssistantRecord> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(SleuthError::Io)?;
        let record = serde_json::from_str(&contents).map_err(SleuthError::Serialization)?;
        Ok(record)
    }

    /// Return the assistant identifier, creating the assistant if needed
    ///
    /// # Errors
    ///
    /// Returns [`SleuthError::Provisioning`] if the remote assistant cannot
    /// be created or its record cannot be written.
    pub async fn resolve_assistant_id(&self, api: &dyn AssistantApi) -> Result<String> {
        Ok(self.resolve_record(api).await?.assistant_id)
    }

    /// Return the full record, creating the assistant if needed
    pub async fn resolve_record(&self, api: &dyn AssistantApi) -> Result<AssistantRecord> {
        match self.load_record().await {
            Ok(record) => {
                tracing::debug!(assistant_id = %record.assistant_id, "Existing assistant detected");
                Ok(record)
            }
            Err(e) => {
                tracing::info!(
                    "No existing assistant detected at {} ({:#}), creating new",
                    self.path.display(),
                    e
                );
                self.provision(api).await
            }
        }
    }

    async fn provision(&self, api: &dyn AssistantApi) -> Result<AssistantRecord> {
        let assistant = api.create_assistant(&self.spec).await.map_err(|e| {
            tracing::error!("Failed to create assistant: {:#}", e);
            SleuthError::Provisioning(format!("{:#}", e))
        })?;

        let record = AssistantRecord::from_spec(assistant.id, self.spec.clone())?;
        self.persist(&record).await.map_err(|e| {
            tracing::error!(
                assistant_id = %record.assistant_id,
                "Created assistant but could not save its record; it is now orphaned: {:#}",
                e
            );
            SleuthError::Provisioning(format!(
                "failed to write {}: {:#}",
                self.path.display(),
                e
            ))
        })?;

        tracing::info!(assistant_id = %record.assistant_id, "Created assistant");
        Ok(record)
    }

    async fn persist(&self, record: &AssistantRecord) -> std::result::Result<(), SleuthError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(record)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ToolKind;
    use crate::test_utils::{ScriptedApi, TEST_ASSISTANT_ID};
    use tempfile::TempDir;

    fn spec() -> AssistantSpec {
        AssistantSpec::new(
            "Murder mystery helper",
            "Solve it.",
            &[ToolKind::FileSearch],
            "gpt-4-1106-preview",
        )
    }

    fn registry(dir: &TempDir) -> AssistantRegistry {
        AssistantRegistry::new(dir.path().join("assistant.json"), spec())
    }

    #[tokio::test]
    async fn test_existing_record_skips_remote_create() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        std::fs::write(
            registry.path(),
            r#"{
  "assistantId": "asst_saved",
  "name": "Murder mystery helper",
  "instructions": "Solve it.",
  "tools": [{"type": "retrieval"}],
  "model": "gpt-4-1106-preview"
}"#,
        )
        .unwrap();
        let api = ScriptedApi::new();

        for _ in 0..2 {
            let id = registry.resolve_assistant_id(&api).await.unwrap();
            assert_eq!(id, "asst_saved");
        }
        assert_eq!(api.count("create_assistant"), 0);
    }

    #[tokio::test]
    async fn test_sparse_record_with_unknown_tool_is_kept() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        let raw = r#"{"assistantId":"asst_saved","tools":[{"type":"function","function":{"name":"lookup"}}]}"#;
        std::fs::write(registry.path(), raw).unwrap();
        let api = ScriptedApi::new();

        let id = registry.resolve_assistant_id(&api).await.unwrap();

        assert_eq!(id, "asst_saved");
        assert_eq!(api.count("create_assistant"), 0);
        assert_eq!(std::fs::read_to_string(registry.path()).unwrap(), raw);

        let record = registry.load_record().await.unwrap();
        assert_eq!(record.tools[0]["type"], "function");
        assert!(record.model.is_empty());
    }

    #[tokio::test]
    async fn test_record_without_assistant_id_is_replaced() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        std::fs::write(registry.path(), r#"{"name": "Murder mystery helper"}"#).unwrap();
        let api = ScriptedApi::new();

        let err = registry.load_record().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SleuthError>(),
            Some(SleuthError::Serialization(_))
        ));

        let id = registry.resolve_assistant_id(&api).await.unwrap();
        assert_eq!(id, TEST_ASSISTANT_ID);
        assert_eq!(api.count("create_assistant"), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = registry(&dir).load_record().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SleuthError>(),
            Some(SleuthError::Io(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_record_creates_once_and_persists() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        let api = ScriptedApi::new();

        let id = registry.resolve_assistant_id(&api).await.unwrap();
        assert_eq!(id, TEST_ASSISTANT_ID);
        assert_eq!(api.count("create_assistant"), 1);
        assert_eq!(api.created_specs(), vec![spec()]);

        let saved = registry.load_record().await.unwrap();
        assert_eq!(saved.assistant_id, TEST_ASSISTANT_ID);
        assert_eq!(saved.model, "gpt-4-1106-preview");

        // second resolution reads the file
        registry.resolve_assistant_id(&api).await.unwrap();
        assert_eq!(api.count("create_assistant"), 1);
    }

    #[tokio::test]
    async fn test_corrupt_record_is_replaced() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        std::fs::write(registry.path(), "{ not json").unwrap();
        let api = ScriptedApi::new();

        let id = registry.resolve_assistant_id(&api).await.unwrap();

        assert_eq!(id, TEST_ASSISTANT_ID);
        assert_eq!(api.count("create_assistant"), 1);
        let raw = std::fs::read_to_string(registry.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["assistantId"], TEST_ASSISTANT_ID);
        assert_eq!(value["tools"][0]["type"], "file_search");
    }

    #[tokio::test]
    async fn test_create_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        let api = ScriptedApi::new().failing_create_assistant();

        let err = registry.resolve_assistant_id(&api).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SleuthError>(),
            Some(SleuthError::Provisioning(_))
        ));
        assert!(!registry.path().exists());
    }

    #[tokio::test]
    async fn test_record_directory_is_created() {
        let dir = TempDir::new().unwrap();
        let registry = AssistantRegistry::new(dir.path().join("state/assistant.json"), spec());
        let api = ScriptedApi::new();

        registry.resolve_assistant_id(&api).await.unwrap();
        assert!(registry.path().exists());
    }
}
