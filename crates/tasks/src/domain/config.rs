//! Configuration domain facade.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::entities::ProjectConfig;
use crate::errors::{TasksError, TasksResult};
use crate::paths::CONFIG_FILE_NAME;

/// Reads and writes `.taskmasterconfig`
pub struct ConfigDomain {
    config_path: PathBuf,
}

impl ConfigDomain {
    /// Create a config domain for a project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            config_path: project_root.as_ref().join(CONFIG_FILE_NAME),
        }
    }

    /// Path of the config file
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration. A missing file yields the defaults; malformed
    /// JSON is an error.
    pub async fn load(&self) -> TasksResult<ProjectConfig> {
        match fs::read_to_string(&self.config_path).await {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| TasksError::MalformedConfig {
                    path: self.config_path.display().to_string(),
                    reason: e.to_string(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ProjectConfig::default()),
            Err(e) => Err(TasksError::FileReadError {
                path: self.config_path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Load configuration, falling back to defaults on any problem
    pub async fn load_or_default(&self) -> ProjectConfig {
        match self.load().await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Using default configuration");
                ProjectConfig::default()
            }
        }
    }

    /// Save configuration
    pub async fn save(&self, config: &ProjectConfig) -> TasksResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_path, content)
            .await
            .map_err(|e| TasksError::FileWriteError {
                path: self.config_path.display().to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ModelSettings;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let domain = ConfigDomain::new(temp_dir.path());

        let config = domain.load().await.unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let domain = ConfigDomain::new(temp_dir.path());

        let mut config = ProjectConfig::default();
        config.global.project_name = Some("Test Project".to_string());
        config.models.main = Some(ModelSettings::new("openai", "gpt-4-turbo"));

        domain.save(&config).await.unwrap();

        let loaded = domain.load().await.unwrap();
        assert_eq!(loaded.global.project_name.as_deref(), Some("Test Project"));
        assert_eq!(loaded.models.main.unwrap().model_id, "gpt-4-turbo");
    }

    #[tokio::test]
    async fn test_malformed_config() {
        let temp_dir = TempDir::new().unwrap();
        let domain = ConfigDomain::new(temp_dir.path());
        std::fs::write(domain.path(), "{ broken").unwrap();

        assert!(matches!(
            domain.load().await,
            Err(TasksError::MalformedConfig { .. })
        ));
        assert_eq!(domain.load_or_default().await, ProjectConfig::default());
    }

    #[tokio::test]
    async fn test_nested_unknown_keys_survive_save() {
        let temp_dir = TempDir::new().unwrap();
        let domain = ConfigDomain::new(temp_dir.path());
        std::fs::write(
            domain.path(),
            r#"{
                "paths": {"complexityReport": "r.json", "tasksFile": "t.json"},
                "models": {
                    "main": {"provider": "anthropic", "modelId": "claude-3-opus", "customKey": 1},
                    "embedding": {"provider": "openai"}
                },
                "global": {"logLevel": "warn", "theme": "dark"}
            }"#,
        )
        .unwrap();

        let mut config = domain.load().await.unwrap();
        config.models.research = Some(ModelSettings::new("openai", "gpt-4o"));
        domain.save(&config).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(domain.path()).unwrap()).unwrap();
        assert_eq!(raw["paths"]["tasksFile"], "t.json");
        assert_eq!(raw["paths"]["complexityReport"], "r.json");
        assert_eq!(raw["models"]["main"]["customKey"], 1);
        assert_eq!(raw["models"]["embedding"]["provider"], "openai");
        assert_eq!(raw["models"]["research"]["modelId"], "gpt-4o");
        assert_eq!(raw["global"]["theme"], "dark");
    }

    #[tokio::test]
    async fn test_save_is_pretty_printed() {
        let temp_dir = TempDir::new().unwrap();
        let domain = ConfigDomain::new(temp_dir.path());
        domain.save(&ProjectConfig::default()).await.unwrap();

        let raw = std::fs::read_to_string(domain.path()).unwrap();
        assert!(raw.contains("\n  \"global\""));
    }
}
