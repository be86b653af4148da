//! Model catalog and role assignment.

use std::path::Path;

use serde::Serialize;

use crate::entities::{ModelSettings, ProjectConfig};
use crate::errors::{TasksError, TasksResult};

use super::ConfigDomain;

/// A model that can be bound to a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogModel {
    pub id: String,
    pub name: String,
    pub provider: String,
}

impl CatalogModel {
    fn new(id: &str, name: &str, provider: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            provider: provider.to_string(),
        }
    }
}

/// The models known to this build
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: Vec<CatalogModel>,
}

impl ModelCatalog {
    /// Catalog with the given entries
    pub fn new(models: Vec<CatalogModel>) -> Self {
        Self { models }
    }

    /// The built-in catalog
    pub fn builtin() -> Self {
        Self::new(vec![
            CatalogModel::new("claude-sonnet-4-20250514", "Claude Sonnet 4", "anthropic"),
            CatalogModel::new("claude-opus-4-20250514", "Claude Opus 4", "anthropic"),
            CatalogModel::new("claude-3-7-sonnet-20250219", "Claude 3.7 Sonnet", "anthropic"),
            CatalogModel::new("claude-3-opus", "Claude 3 Opus", "anthropic"),
            CatalogModel::new("claude-3-sonnet", "Claude 3 Sonnet", "anthropic"),
            CatalogModel::new("claude-3-haiku", "Claude 3 Haiku", "anthropic"),
            CatalogModel::new("gpt-4o", "GPT-4o", "openai"),
            CatalogModel::new("gpt-4o-mini", "GPT-4o mini", "openai"),
            CatalogModel::new("gpt-4-turbo", "GPT-4 Turbo", "openai"),
            CatalogModel::new("sonar-pro", "Sonar Pro", "perplexity"),
            CatalogModel::new("sonar", "Sonar", "perplexity"),
        ])
    }

    pub fn find(&self, id: &str) -> Option<&CatalogModel> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn models(&self) -> &[CatalogModel] {
        &self.models
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Which model binding to change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRole {
    Main,
    Research,
    Fallback,
}

impl ModelRole {
    /// All roles, in the order flags are applied
    pub const ALL: [Self; 3] = [Self::Main, Self::Research, Self::Fallback];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Research => "research",
            Self::Fallback => "fallback",
        }
    }

    /// Capitalized label used in messages
    pub fn label(self) -> &'static str {
        match self {
            Self::Main => "Main",
            Self::Research => "Research",
            Self::Fallback => "Fallback",
        }
    }

    /// The current binding for this role
    pub fn binding(self, config: &ProjectConfig) -> Option<&ModelSettings> {
        match self {
            Self::Main => config.models.main.as_ref(),
            Self::Research => config.models.research.as_ref(),
            Self::Fallback => config.models.fallback.as_ref(),
        }
    }
}

impl std::fmt::Display for ModelRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a successful role assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAssignment {
    pub role: ModelRole,
    pub provider: String,
    pub model_id: String,
}

impl ModelAssignment {
    pub fn message(&self) -> String {
        format!(
            "{} model set to: {} (Provider: {})",
            self.role.label(),
            self.model_id,
            self.provider
        )
    }
}

/// Return `config` with `role` bound to the given model.
///
/// Token limits and temperature of an existing binding are kept.
pub fn assign_model(
    config: &ProjectConfig,
    role: ModelRole,
    provider: &str,
    model_id: &str,
) -> ProjectConfig {
    let mut updated = config.clone();
    let settings = match role.binding(config) {
        Some(existing) => ModelSettings {
            provider: provider.to_string(),
            model_id: model_id.to_string(),
            ..existing.clone()
        },
        None => ModelSettings::new(provider, model_id),
    };

    match role {
        ModelRole::Main => updated.models.main = Some(settings),
        ModelRole::Research => updated.models.research = Some(settings),
        ModelRole::Fallback => updated.models.fallback = Some(settings),
    }
    updated
}

/// Model configuration facade
pub struct ModelsDomain {
    config: ConfigDomain,
    catalog: ModelCatalog,
}

impl ModelsDomain {
    /// Models domain with the built-in catalog
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self::with_catalog(project_root, ModelCatalog::builtin())
    }

    pub fn with_catalog(project_root: impl AsRef<Path>, catalog: ModelCatalog) -> Self {
        Self {
            config: ConfigDomain::new(project_root),
            catalog,
        }
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Current configuration, for display
    pub async fn current(&self) -> ProjectConfig {
        self.config.load_or_default().await
    }

    /// Bind `role` to a catalog model and persist the config.
    pub async fn set_model(&self, role: ModelRole, model_id: &str) -> TasksResult<ModelAssignment> {
        let model_id = model_id.trim();
        if model_id.is_empty() {
            return Err(TasksError::InvalidArgument {
                reason: format!("--set-{role} flag requires a valid model ID."),
            });
        }

        let model = self
            .catalog
            .find(model_id)
            .ok_or_else(|| TasksError::InvalidModelId {
                model_id: model_id.to_string(),
            })?;

        let config = self.config.load().await?;
        let updated = assign_model(&config, role, &model.provider, &model.id);

        self.config
            .save(&updated)
            .await
            .map_err(|e| TasksError::SetModelFailed {
                role: role.to_string(),
                reason: e.to_string(),
            })?;

        tracing::info!(role = %role, model = %model.id, provider = %model.provider, "Model assigned");

        Ok(ModelAssignment {
            role,
            provider: model.provider.clone(),
            model_id: model.id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_catalog_has_claude_3_opus() {
        let catalog = ModelCatalog::builtin();
        let opus = catalog.find("claude-3-opus").unwrap();
        assert_eq!(opus.provider, "anthropic");
        assert!(catalog.find("non-existent-model").is_none());
    }

    #[test]
    fn test_assign_model_is_pure() {
        let config = ProjectConfig::default();
        let updated = assign_model(&config, ModelRole::Research, "openai", "gpt-4-turbo");

        assert!(config.models.research.is_none());
        let research = updated.models.research.unwrap();
        assert_eq!(research.provider, "openai");
        assert_eq!(research.model_id, "gpt-4-turbo");
    }

    #[test]
    fn test_assign_model_keeps_limits() {
        let mut config = ProjectConfig::default();
        let mut settings = ModelSettings::new("openai", "gpt-4o");
        settings.max_tokens = 1234;
        config.models.main = Some(settings);

        let updated = assign_model(&config, ModelRole::Main, "anthropic", "claude-3-opus");
        let main = updated.models.main.unwrap();
        assert_eq!(main.model_id, "claude-3-opus");
        assert_eq!(main.max_tokens, 1234);
    }

    #[test]
    fn test_assignment_message() {
        let assignment = ModelAssignment {
            role: ModelRole::Main,
            provider: "anthropic".to_string(),
            model_id: "claude-3-opus".to_string(),
        };
        assert_eq!(
            assignment.message(),
            "Main model set to: claude-3-opus (Provider: anthropic)"
        );
    }

    #[tokio::test]
    async fn test_set_model_writes_config() {
        let temp = TempDir::new().unwrap();
        let domain = ModelsDomain::new(temp.path());

        let assignment = domain
            .set_model(ModelRole::Main, "claude-3-opus")
            .await
            .unwrap();
        assert_eq!(assignment.provider, "anthropic");

        let config = domain.current().await;
        assert_eq!(config.models.main.unwrap().model_id, "claude-3-opus");
    }

    #[tokio::test]
    async fn test_unknown_model_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let domain = ModelsDomain::new(temp.path());

        let err = domain
            .set_model(ModelRole::Main, "non-existent-model")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("non-existent-model"));
        assert!(!temp.path().join(".taskmasterconfig").exists());
    }

    #[tokio::test]
    async fn test_empty_model_id_rejected() {
        let temp = TempDir::new().unwrap();
        let domain = ModelsDomain::new(temp.path());

        let err = domain.set_model(ModelRole::Main, "  ").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: --set-main flag requires a valid model ID."
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_write_failure_is_set_model_failed() {
        let temp = TempDir::new().unwrap();
        // Reads as missing, but the write has nowhere to land
        std::os::unix::fs::symlink(
            temp.path().join("missing/dir/config.json"),
            temp.path().join(".taskmasterconfig"),
        )
        .unwrap();
        let domain = ModelsDomain::new(temp.path());

        let err = domain
            .set_model(ModelRole::Fallback, "gpt-4o")
            .await
            .unwrap_err();
        match err {
            TasksError::SetModelFailed { role, .. } => assert_eq!(role, "fallback"),
            other => panic!("expected SetModelFailed, got {other:?}"),
        }
    }
}
