//! File-based storage implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use super::traits::Storage;
use crate::entities::Task;
use crate::errors::{TasksError, TasksResult};

/// Tasks stored in a single JSON file of the form `{"tasks": [...]}`.
///
/// Top-level keys other than `tasks` are kept as they were found.
pub struct FileStorage {
    /// Path to tasks.json
    tasks_file: PathBuf,
}

impl FileStorage {
    /// Create a storage backed by the given tasks file
    pub fn new(tasks_file: impl AsRef<Path>) -> Self {
        Self {
            tasks_file: tasks_file.as_ref().to_path_buf(),
        }
    }

    /// Get the tasks file path
    pub fn tasks_file(&self) -> &Path {
        &self.tasks_file
    }

    /// Read and parse the tasks file
    async fn read_tasks_file(&self) -> TasksResult<Value> {
        match fs::read_to_string(&self.tasks_file).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| TasksError::JsonParseError {
                reason: format!("{}: {e}", self.tasks_file.display()),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TasksError::TasksFileNotFound {
                    path: self.tasks_file.display().to_string(),
                })
            }
            Err(e) => Err(TasksError::FileReadError {
                path: self.tasks_file.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Write the tasks file
    async fn write_tasks_file(&self, data: &Value) -> TasksResult<()> {
        if let Some(parent) = self.tasks_file.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(data)?;
        fs::write(&self.tasks_file, content)
            .await
            .map_err(|e| TasksError::FileWriteError {
                path: self.tasks_file.display().to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn load_tasks(&self) -> TasksResult<Vec<Task>> {
        let mut data = self.read_tasks_file().await?;

        match data.get_mut("tasks").map(Value::take) {
            Some(tasks) => Ok(serde_json::from_value(tasks)?),
            None => Err(TasksError::JsonParseError {
                reason: format!("{}: missing \"tasks\" array", self.tasks_file.display()),
            }),
        }
    }

    async fn save_tasks(&self, tasks: &[Task]) -> TasksResult<()> {
        let mut data = match self.read_tasks_file().await {
            Ok(Value::Object(map)) => Value::Object(map),
            Ok(_) | Err(TasksError::TasksFileNotFound { .. }) => serde_json::json!({}),
            Err(e) => return Err(e),
        };

        data["tasks"] = serde_json::to_value(tasks)?;
        self.write_tasks_file(&data).await?;

        tracing::debug!(
            path = %self.tasks_file.display(),
            count = tasks.len(),
            "Saved tasks"
        );
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> TasksResult<()> {
        let mut tasks = self.load_tasks().await?;

        let slot = tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| TasksError::TaskNotFound {
                task_id: task.id.to_string(),
            })?;
        *slot = task.clone();

        self.save_tasks(&tasks).await
    }
}
