//! Tasks domain facade.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use crate::entities::{Subtask, SubtaskDependency, Task, TaskStatus};
use crate::errors::{TasksError, TasksResult};
use crate::storage::Storage;

/// A parsed task reference: `3` or `3.1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskRef {
    Task(u32),
    Subtask { task_id: u32, subtask_id: u32 },
}

impl TaskRef {
    /// The top-level task this reference belongs to
    pub fn task_id(self) -> u32 {
        match self {
            Self::Task(id) | Self::Subtask { task_id: id, .. } => id,
        }
    }
}

impl FromStr for TaskRef {
    type Err = TasksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TasksError::InvalidId { id: s.to_string() };
        let s = s.trim();

        match s.split_once('.') {
            Some((task, subtask)) => Ok(Self::Subtask {
                task_id: task.parse().map_err(|_| invalid())?,
                subtask_id: subtask.parse().map_err(|_| invalid())?,
            }),
            None => s.parse().map(Self::Task).map_err(|_| invalid()),
        }
    }
}

/// A task or a subtask together with its parent
#[derive(Debug, Clone, PartialEq)]
pub enum TaskItem {
    Task(Task),
    Subtask { parent: Task, subtask: Subtask },
}

impl TaskItem {
    /// Display id: `3` or `3.1`
    pub fn display_id(&self) -> String {
        match self {
            Self::Task(task) => task.id.to_string(),
            Self::Subtask { parent, subtask } => subtask.full_id(parent.id),
        }
    }

    /// The top-level task id, used for complexity report lookups
    pub fn task_id(&self) -> u32 {
        match self {
            Self::Task(task) => task.id,
            Self::Subtask { parent, .. } => parent.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Task(task) => &task.title,
            Self::Subtask { subtask, .. } => &subtask.title,
        }
    }

    pub fn status(&self) -> TaskStatus {
        match self {
            Self::Task(task) => task.status,
            Self::Subtask { subtask, .. } => subtask.status,
        }
    }
}

/// Tasks domain facade providing high-level task operations
pub struct TasksDomain {
    storage: Arc<dyn Storage>,
}

impl TasksDomain {
    /// Create a new tasks domain
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// List all tasks with optional status filter
    pub async fn list_tasks(&self, status_filter: Option<TaskStatus>) -> TasksResult<Vec<Task>> {
        let tasks = self.storage.load_tasks().await?;

        if let Some(status) = status_filter {
            Ok(tasks.into_iter().filter(|t| t.status == status).collect())
        } else {
            Ok(tasks)
        }
    }

    /// Get a task by numeric ID
    pub async fn get_task(&self, task_id: u32) -> TasksResult<Task> {
        self.storage
            .load_task(task_id)
            .await?
            .ok_or_else(|| TasksError::TaskNotFound {
                task_id: task_id.to_string(),
            })
    }

    /// Get a task or subtask by `3` / `3.1` style ID
    pub async fn get(&self, id: &str) -> TasksResult<TaskItem> {
        match id.parse::<TaskRef>()? {
            TaskRef::Task(task_id) => self.get_task(task_id).await.map(TaskItem::Task),
            TaskRef::Subtask {
                task_id,
                subtask_id,
            } => {
                let parent = self.get_task(task_id).await?;
                let subtask = parent.get_subtask(subtask_id).cloned().ok_or_else(|| {
                    TasksError::SubtaskNotFound {
                        task_id: task_id.to_string(),
                        subtask_id: subtask_id.to_string(),
                    }
                })?;
                Ok(TaskItem::Subtask { parent, subtask })
            }
        }
    }

    /// Get the next task to work on
    pub async fn next_task(&self) -> TasksResult<Option<TaskItem>> {
        let tasks = self.storage.load_tasks().await?;
        Ok(find_next_task(&tasks))
    }

    /// Replace a task
    pub async fn update_task(&self, task: &Task) -> TasksResult<()> {
        self.storage.update_task(task).await
    }
}

/// Pick the next actionable item.
///
/// Subtasks of in-progress tasks come first. Otherwise the best top-level
/// task whose dependencies are all done wins: higher priority, then fewer
/// dependencies, then lower id.
pub fn find_next_task(tasks: &[Task]) -> Option<TaskItem> {
    let done_ids: Vec<u32> = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Done)
        .map(|t| t.id)
        .collect();

    let done_subtasks: HashSet<String> = tasks
        .iter()
        .flat_map(|t| {
            t.subtasks
                .iter()
                .filter(|s| s.status == TaskStatus::Done)
                .map(move |s| s.full_id(t.id))
        })
        .collect();

    let subtask_ready = |parent: &Task, subtask: &Subtask| {
        subtask.dependencies.iter().all(|dep| {
            let full_id = match dep {
                SubtaskDependency::Sibling(id) => format!("{}.{id}", parent.id),
                SubtaskDependency::Qualified(id) => id.clone(),
            };
            done_subtasks.contains(&full_id)
                || full_id
                    .parse::<u32>()
                    .is_ok_and(|task_id| done_ids.contains(&task_id))
        })
    };

    let ready = &subtask_ready;
    let subtask_candidate = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::InProgress)
        .flat_map(|parent| {
            parent
                .subtasks
                .iter()
                .filter(|s| s.status.is_actionable())
                .filter(move |s| ready(parent, *s))
                .map(move |s| (parent, s))
        })
        .min_by_key(|(parent, s)| {
            (
                Reverse(parent.priority),
                s.dependencies.len(),
                parent.id,
                s.id,
            )
        });

    if let Some((parent, subtask)) = subtask_candidate {
        return Some(TaskItem::Subtask {
            parent: parent.clone(),
            subtask: subtask.clone(),
        });
    }

    tasks
        .iter()
        .filter(|t| t.status.is_actionable())
        .filter(|t| !t.has_blocking_deps(&done_ids))
        .min_by_key(|t| (Reverse(t.priority), t.dependencies.len(), t.id))
        .cloned()
        .map(TaskItem::Task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TaskPriority;
    use crate::storage::FileStorage;
    use tempfile::TempDir;

    fn task(id: u32, status: TaskStatus, priority: TaskPriority, deps: &[u32]) -> Task {
        let mut task = Task::new(id, format!("Task {id}"), "Description");
        task.status = status;
        task.priority = priority;
        task.dependencies = deps.to_vec();
        task
    }

    async fn setup(tasks: &[Task]) -> (TempDir, TasksDomain) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Arc::new(FileStorage::new(temp_dir.path().join("tasks/tasks.json")));
        storage.save_tasks(tasks).await.unwrap();
        (temp_dir, TasksDomain::new(storage))
    }

    #[test]
    fn test_task_ref_parsing() {
        assert_eq!("3".parse::<TaskRef>().unwrap(), TaskRef::Task(3));
        assert_eq!(
            "3.1".parse::<TaskRef>().unwrap(),
            TaskRef::Subtask {
                task_id: 3,
                subtask_id: 1
            }
        );
        assert!(matches!(
            "abc".parse::<TaskRef>(),
            Err(TasksError::InvalidId { .. })
        ));
        assert!("3.x".parse::<TaskRef>().is_err());
    }

    #[test]
    fn test_next_task_respects_dependencies() {
        let tasks = vec![
            task(1, TaskStatus::Pending, TaskPriority::Medium, &[]),
            task(2, TaskStatus::Pending, TaskPriority::Critical, &[1]),
        ];
        let next = find_next_task(&tasks).unwrap();
        assert_eq!(next.display_id(), "1");
    }

    #[test]
    fn test_next_task_prefers_priority_then_fewer_deps() {
        let tasks = vec![
            task(1, TaskStatus::Done, TaskPriority::Medium, &[]),
            task(2, TaskStatus::Pending, TaskPriority::Medium, &[]),
            task(3, TaskStatus::Pending, TaskPriority::High, &[1]),
            task(4, TaskStatus::Pending, TaskPriority::High, &[]),
        ];
        assert_eq!(find_next_task(&tasks).unwrap().display_id(), "4");
    }

    #[test]
    fn test_next_task_prefers_subtasks_of_in_progress_parent() {
        let mut parent = task(5, TaskStatus::InProgress, TaskPriority::Low, &[]);
        let mut first = Subtask::new(1, "First", "Desc");
        first.status = TaskStatus::Done;
        let mut second = Subtask::new(2, "Second", "Desc");
        second.dependencies = vec![SubtaskDependency::Sibling(1)];
        parent.subtasks = vec![first, second];

        let tasks = vec![
            task(1, TaskStatus::Pending, TaskPriority::Critical, &[]),
            parent,
        ];

        let next = find_next_task(&tasks).unwrap();
        assert_eq!(next.display_id(), "5.2");
        assert_eq!(next.task_id(), 5);
    }

    #[test]
    fn test_next_task_none_when_all_done() {
        let tasks = vec![task(1, TaskStatus::Done, TaskPriority::Medium, &[])];
        assert!(find_next_task(&tasks).is_none());
    }

    #[tokio::test]
    async fn test_get_task_and_subtask() {
        let mut parent = task(3, TaskStatus::Pending, TaskPriority::Medium, &[]);
        parent.subtasks = vec![Subtask::new(1, "Child", "Desc")];
        let (_temp, domain) = setup(&[parent]).await;

        let item = domain.get("3").await.unwrap();
        assert_eq!(item.title(), "Task 3");

        let item = domain.get("3.1").await.unwrap();
        assert_eq!(item.title(), "Child");
        assert_eq!(item.display_id(), "3.1");

        assert!(matches!(
            domain.get("3.9").await,
            Err(TasksError::SubtaskNotFound { .. })
        ));
        assert!(matches!(
            domain.get("8").await,
            Err(TasksError::TaskNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_with_status_filter() {
        let (_temp, domain) = setup(&[
            task(1, TaskStatus::Done, TaskPriority::Medium, &[]),
            task(2, TaskStatus::Pending, TaskPriority::Medium, &[]),
        ])
        .await;

        assert_eq!(domain.list_tasks(None).await.unwrap().len(), 2);
        let pending = domain.list_tasks(Some(TaskStatus::Pending)).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, 2);
    }

    #[tokio::test]
    async fn test_update_task_persists() {
        let (_temp, domain) = setup(&[task(1, TaskStatus::Pending, TaskPriority::Medium, &[])]).await;

        let mut t = domain.get_task(1).await.unwrap();
        t.status = TaskStatus::InProgress;
        domain.update_task(&t).await.unwrap();

        assert_eq!(
            domain.get_task(1).await.unwrap().status,
            TaskStatus::InProgress
        );
    }
}
