//! Complexity report reading and writing.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::ai::ComplexityReport;
use crate::errors::{TasksError, TasksResult};
use crate::paths::{ReportPathResolver, ResolvedReportPath};

/// A report together with where it was read from
#[derive(Debug, Clone)]
pub struct LoadedReport {
    pub location: ResolvedReportPath,
    pub report: ComplexityReport,
}

/// Complexity report facade
pub struct ReportsDomain {
    resolver: ReportPathResolver,
}

impl ReportsDomain {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            resolver: ReportPathResolver::new(project_root),
        }
    }

    pub fn resolver(&self) -> &ReportPathResolver {
        &self.resolver
    }

    /// Resolve the report to read, warning when there is none.
    pub fn locate(&self, explicit: Option<&Path>) -> Option<ResolvedReportPath> {
        let resolved = self.resolver.resolve(explicit);
        if resolved.is_none() {
            tracing::warn!(
                project_root = %self.resolver.project_root().display(),
                "Complexity report not found in default locations (scripts/task-complexity-report.json, tasks/task-complexity-report.json)"
            );
        }
        resolved
    }

    /// Read a report from an exact path.
    pub async fn load_required(&self, path: &Path) -> TasksResult<ComplexityReport> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TasksError::ReportNotFound {
                    path: path.display().to_string(),
                })
            }
            Err(e) => {
                return Err(TasksError::FileReadError {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })
            }
        };

        serde_json::from_str(&content).map_err(|e| TasksError::JsonParseError {
            reason: format!("{}: {e}", path.display()),
        })
    }

    /// Resolve and read the report for display purposes.
    ///
    /// Any problem is logged and treated as "no report".
    pub async fn load_optional(&self, explicit: Option<&Path>) -> Option<LoadedReport> {
        let location = self.locate(explicit)?;

        match self.load_required(&location.path).await {
            Ok(report) => Some(LoadedReport { location, report }),
            Err(e) => {
                tracing::warn!(error = %e, "Continuing without complexity report");
                None
            }
        }
    }

    /// Write a report, creating parent directories
    pub async fn save(&self, path: &Path, report: &ComplexityReport) -> TasksResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(report)?;
        fs::write(path, content)
            .await
            .map_err(|e| TasksError::FileWriteError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(path = %path.display(), entries = report.complexity_analysis.len(), "Wrote complexity report");
        Ok(())
    }
}
