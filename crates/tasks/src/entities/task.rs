//! Task entity and related types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Subtask;
use crate::errors::TasksError;

/// Task status values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Done,
    Deferred,
    Cancelled,
    Blocked,
    Review,
}

impl TaskStatus {
    /// Whether the status counts as finished work.
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }

    /// Whether work can be picked up in this status.
    pub fn is_actionable(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Done => write!(f, "done"),
            Self::Deferred => write!(f, "deferred"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Blocked => write!(f, "blocked"),
            Self::Review => write!(f, "review"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = TasksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in-progress" | "inprogress" | "in_progress" => Ok(Self::InProgress),
            "done" | "completed" => Ok(Self::Done),
            "deferred" => Ok(Self::Deferred),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            "blocked" => Ok(Self::Blocked),
            "review" => Ok(Self::Review),
            _ => Err(TasksError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Task priority levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = TasksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" | "crit" => Ok(Self::Critical),
            _ => Err(TasksError::InvalidPriority {
                priority: s.to_string(),
            }),
        }
    }
}

/// Core task structure as stored in `tasks.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique, positive identifier
    pub id: u32,

    /// Brief, descriptive title
    pub title: String,

    /// Concise description of what the task involves
    #[serde(default)]
    pub description: String,

    /// Current task status
    #[serde(default)]
    pub status: TaskStatus,

    /// Task priority level
    #[serde(default)]
    pub priority: TaskPriority,

    /// IDs of prerequisite tasks
    #[serde(default)]
    pub dependencies: Vec<u32>,

    /// In-depth implementation instructions
    #[serde(default)]
    pub details: String,

    /// Verification approach
    #[serde(default, rename = "testStrategy")]
    pub test_strategy: String,

    /// List of subtasks
    #[serde(default)]
    pub subtasks: Vec<Subtask>,

    /// Fields this crate does not interpret; written back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// Create a new task with minimal required fields
    pub fn new(id: u32, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            dependencies: Vec::new(),
            details: String::new(),
            test_strategy: String::new(),
            subtasks: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Check if task has dependencies that are not in `done_ids`
    pub fn has_blocking_deps(&self, done_ids: &[u32]) -> bool {
        self.dependencies.iter().any(|dep| !done_ids.contains(dep))
    }

    /// Get subtask by ID
    pub fn get_subtask(&self, subtask_id: u32) -> Option<&Subtask> {
        self.subtasks.iter().find(|s| s.id == subtask_id)
    }

    /// Append subtasks, keeping existing ones
    pub fn append_subtasks(&mut self, subtasks: impl IntoIterator<Item = Subtask>) {
        self.subtasks.extend(subtasks);
    }

    /// Get next available subtask ID
    pub fn next_subtask_id(&self) -> u32 {
        self.subtasks.iter().map(|s| s.id).max().unwrap_or(0) + 1
    }

    /// Count of subtasks in a finished state
    pub fn completed_subtasks(&self) -> usize {
        self.subtasks
            .iter()
            .filter(|s| s.status.is_complete())
            .count()
    }
}
