//! Storage trait definitions.

use async_trait::async_trait;

use crate::entities::Task;
use crate::errors::TasksResult;

/// Storage interface for the task list.
///
/// The whole list is read and written at once; there are no partial writes.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Load all tasks
    async fn load_tasks(&self) -> TasksResult<Vec<Task>>;

    /// Replace all tasks
    async fn save_tasks(&self, tasks: &[Task]) -> TasksResult<()>;

    /// Load a single task by ID
    async fn load_task(&self, task_id: u32) -> TasksResult<Option<Task>> {
        let tasks = self.load_tasks().await?;
        Ok(tasks.into_iter().find(|t| t.id == task_id))
    }

    /// Replace the task with the same ID
    async fn update_task(&self, task: &Task) -> TasksResult<()>;
}
