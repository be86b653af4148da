//! Subtask entity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::task::TaskStatus;

/// Reference from a subtask to something it depends on.
///
/// Sibling subtasks are referenced by bare integer id; anything else uses the
/// dotted `parent.subtask` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubtaskDependency {
    Sibling(u32),
    Qualified(String),
}

impl std::fmt::Display for SubtaskDependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sibling(id) => write!(f, "{id}"),
            Self::Qualified(id) => write!(f, "{id}"),
        }
    }
}

/// Subtask structure (nested within tasks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    /// Numeric ID within parent task
    pub id: u32,

    /// Brief, descriptive title
    pub title: String,

    /// Concise description
    #[serde(default)]
    pub description: String,

    /// Current status
    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default)]
    pub dependencies: Vec<SubtaskDependency>,

    /// Implementation details
    #[serde(default)]
    pub details: String,

    /// Test strategy
    #[serde(default, rename = "testStrategy")]
    pub test_strategy: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Subtask {
    /// Create a new subtask
    pub fn new(id: u32, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            status: TaskStatus::default(),
            dependencies: Vec::new(),
            details: String::new(),
            test_strategy: String::new(),
            extra: Map::new(),
        }
    }

    /// Get full ID (parentId.subtaskId format)
    pub fn full_id(&self, parent_id: u32) -> String {
        format!("{parent_id}.{}", self.id)
    }
}
