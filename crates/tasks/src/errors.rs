//! Error types for the taskmaster crate.

use thiserror::Error;

/// Comprehensive error types for task management
#[derive(Error, Debug, Clone)]
pub enum TasksError {
    // Task errors
    #[error("Task '{task_id}' not found")]
    TaskNotFound { task_id: String },

    #[error("Subtask '{subtask_id}' not found in task '{task_id}'")]
    SubtaskNotFound { task_id: String, subtask_id: String },

    #[error("Task '{task_id}' cannot be expanded: {reason}")]
    CannotExpand { task_id: String, reason: String },

    #[error("Invalid status: '{status}'")]
    InvalidStatus { status: String },

    #[error("Invalid priority: '{priority}'")]
    InvalidPriority { priority: String },

    #[error("Invalid task ID format: '{id}'")]
    InvalidId { id: String },

    // Model errors
    #[error("Model ID \"{model_id}\" not found in available models.")]
    InvalidModelId { model_id: String },

    #[error("Failed to set {role} model: {reason}")]
    SetModelFailed { role: String, reason: String },

    // Report errors
    #[error("Complexity report not found: {path}")]
    ReportNotFound { path: String },

    // Storage errors
    #[error("Tasks file not found at '{path}'")]
    TasksFileNotFound { path: String },

    #[error("Storage error: {reason}")]
    StorageError { reason: String },

    #[error("Failed to read file '{path}': {reason}")]
    FileReadError { path: String, reason: String },

    #[error("Failed to write file '{path}': {reason}")]
    FileWriteError { path: String, reason: String },

    #[error("Failed to parse JSON: {reason}")]
    JsonParseError { reason: String },

    // Configuration errors
    #[error("Malformed configuration file '{path}': {reason}")]
    MalformedConfig { path: String, reason: String },

    // AI errors
    #[error("AI error: {0}")]
    Ai(String),

    #[error("AI provider '{provider}' is not configured. Set {env_var}.")]
    ProviderNotConfigured { provider: String, env_var: String },

    #[error("AI response parse error: {reason}")]
    AiResponseParseError { reason: String },

    // General errors
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl From<std::io::Error> for TasksError {
    fn from(err: std::io::Error) -> Self {
        Self::StorageError {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TasksError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParseError {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for tasks operations
pub type TasksResult<T> = Result<T, TasksError>;
