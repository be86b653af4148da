//! Configuration entities for `.taskmasterconfig`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Project configuration file contents
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProjectConfig {
    /// AI model bindings
    #[serde(default)]
    pub models: ModelConfig,

    /// Project-relative file locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Global settings
    #[serde(default)]
    pub global: GlobalConfig,

    /// Keys this crate does not interpret; written back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Model configuration for AI providers
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    /// Main model for generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<ModelSettings>,

    /// Research model, used with `--research`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research: Option<ModelSettings>,

    /// Fallback model, tried once when the primary call fails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<ModelSettings>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Individual model settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelSettings {
    /// Provider name (e.g., "anthropic", "openai")
    pub provider: String,

    /// Model ID
    #[serde(rename = "modelId")]
    pub model_id: String,

    #[serde(default = "default_max_tokens", rename = "maxTokens")]
    pub max_tokens: u32,

    /// Temperature (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Optional base URL override
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "baseURL")]
    pub base_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const fn default_max_tokens() -> u32 {
    64000
}

const fn default_temperature() -> f32 {
    0.2
}

impl ModelSettings {
    /// Settings for a provider/model pair with default limits.
    pub fn new(provider: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model_id: model_id.into(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            base_url: None,
            extra: Map::new(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self::new("anthropic", "claude-sonnet-4-20250514")
    }
}

/// File locations configured for the project
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PathsConfig {
    /// Complexity report location, relative to the project root
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename = "complexityReport"
    )]
    pub complexity_report: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Global configuration settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlobalConfig {
    #[serde(default = "default_log_level", rename = "logLevel")]
    pub log_level: String,

    #[serde(default)]
    pub debug: bool,

    /// Default number of subtasks when expanding without a report
    #[serde(default = "default_subtasks", rename = "defaultSubtasks")]
    pub default_subtasks: u32,

    #[serde(default = "default_priority", rename = "defaultPriority")]
    pub default_priority: String,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename = "projectName"
    )]
    pub project_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_subtasks() -> u32 {
    5
}

fn default_priority() -> String {
    "medium".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            debug: false,
            default_subtasks: default_subtasks(),
            default_priority: default_priority(),
            project_name: None,
            extra: Map::new(),
        }
    }
}
