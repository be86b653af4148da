//! Domain facades for task management.
//!
//! These facades provide high-level operations that combine
//! storage operations with business logic.

mod ai;
mod config;
mod models;
mod reports;
mod tasks;

pub use ai::{subtask_count, AIDomain, AnalyzeRequest, ExpandRequest};
pub use config::ConfigDomain;
pub use models::{assign_model, CatalogModel, ModelAssignment, ModelCatalog, ModelRole, ModelsDomain};
pub use reports::{LoadedReport, ReportsDomain};
pub use tasks::{find_next_task, TaskItem, TaskRef, TasksDomain};
