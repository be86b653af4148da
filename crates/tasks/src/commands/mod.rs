//! Command handlers behind the `task-master` binary.
//!
//! Each handler prints its own output and returns a [`TasksResult`] with
//! what it did. None of them exit the process.

mod analyze;
mod expand;
mod list;
mod models;
mod report;
mod show;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::ai::ProviderRegistry;
use crate::domain::{AIDomain, ConfigDomain, ReportsDomain, TasksDomain};
use crate::entities::ProjectConfig;
use crate::paths::{resolve_in_project, DEFAULT_TASKS_PATH};
use crate::storage::FileStorage;

pub use analyze::{analyze_complexity, AnalyzeOptions, AnalyzeOutcome};
pub use expand::{expand, ExpandOptions, ExpandOutcome};
pub use list::{list, ListOptions, ListOutcome};
pub use models::{models, ModelsOptions, ModelsOutcome};
pub use report::{complexity_report, ReportOptions};
pub use show::{next, show, NextOptions, ShowOptions, ShowOutcome};

/// Everything a command needs to know about where it runs.
#[derive(Clone)]
pub struct CommandContext {
    project_root: PathBuf,
    registry: ProviderRegistry,
}

impl CommandContext {
    /// Context using the built-in AI providers.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self::with_registry(project_root, ProviderRegistry::with_defaults())
    }

    pub fn with_registry(project_root: impl Into<PathBuf>, registry: ProviderRegistry) -> Self {
        Self {
            project_root: project_root.into(),
            registry,
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Tasks file to use, relative paths taken from the project root.
    pub fn tasks_path(&self, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) => resolve_in_project(&self.project_root, path),
            None => self.project_root.join(DEFAULT_TASKS_PATH),
        }
    }

    pub fn tasks(&self, explicit: Option<&Path>) -> TasksDomain {
        let path = self.tasks_path(explicit);
        tracing::debug!(path = %path.display(), "Using tasks file");
        TasksDomain::new(Arc::new(FileStorage::new(path)))
    }

    pub fn config(&self) -> ConfigDomain {
        ConfigDomain::new(&self.project_root)
    }

    pub fn reports(&self) -> ReportsDomain {
        ReportsDomain::new(self.project_root.clone())
    }

    pub fn ai(&self, config: &ProjectConfig) -> AIDomain {
        AIDomain::with_registry(config.models.clone(), self.registry.clone())
    }
}
