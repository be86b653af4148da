//! Core data structures for task management.

mod config;
mod subtask;
mod task;

pub use config::{GlobalConfig, ModelConfig, ModelSettings, PathsConfig, ProjectConfig};
pub use subtask::{Subtask, SubtaskDependency};
pub use task::{Task, TaskPriority, TaskStatus};
