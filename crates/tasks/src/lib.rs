#![warn(clippy::pedantic)]
// Allow common pedantic lints that don't affect correctness
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::disallowed_macros)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

//! # Taskmaster
//!
//! AI-assisted task tracking over a JSON task file.
//!
//! This crate provides:
//! - Task and subtask storage in `tasks/tasks.json`
//! - Complexity analysis and subtask expansion through an AI provider
//! - Complexity report path resolution shared by every command
//! - Model role configuration in `.taskmasterconfig`
//!
//! ## Example
//!
//! ```rust,ignore
//! use taskmaster::paths::ReportPathResolver;
//!
//! let resolver = ReportPathResolver::new(".");
//! if let Some(found) = resolver.resolve(None) {
//!     println!("report at {} ({})", found.path.display(), found.source);
//! }
//! ```

// Core entities
pub mod entities;

// Error types
pub mod errors;

// Report and tasks file locations
pub mod paths;

// Storage layer
pub mod storage;

// Domain facades
pub mod domain;

// AI integration
pub mod ai;

// Command handlers
pub mod commands;

// Terminal UI helpers
pub mod ui;

pub mod logging;

// Re-export key types for convenience
pub use entities::{
    GlobalConfig, ModelConfig, ModelSettings, PathsConfig, ProjectConfig, Subtask, Task,
    TaskPriority, TaskStatus,
};
pub use errors::{TasksError, TasksResult};
pub use paths::{ReportPathResolver, ReportSource, ResolvedReportPath};
pub use storage::{FileStorage, Storage};

// Re-export AI types
pub use ai::{
    AIMessage, AIProvider, AIResponse, AIRole, ComplexityReport, GenerateOptions, PromptManager,
    ProviderRegistry, TokenUsage,
};
