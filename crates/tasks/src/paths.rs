//! Project file locations and complexity report path resolution.
//!
//! Every command that touches a complexity report asks [`ReportPathResolver`]
//! where it lives. Candidates are checked in a fixed order and the first
//! accepted one wins:
//!
//! 1. an explicit path from the command line (never checked for existence)
//! 2. `paths.complexityReport` from `.taskmasterconfig`
//! 3. `scripts/task-complexity-report.json`, if it exists
//! 4. `tasks/task-complexity-report.json`, if it exists
//!
//! If none of these apply the report is considered absent.

use std::path::{Path, PathBuf};

use serde_json::Value;

/// Project configuration file name, at the project root
pub const CONFIG_FILE_NAME: &str = ".taskmasterconfig";

/// Default tasks file, relative to the project root
pub const DEFAULT_TASKS_PATH: &str = "tasks/tasks.json";

/// Canonical complexity report location
pub const DEFAULT_REPORT_PATH: &str = "scripts/task-complexity-report.json";

/// Older report location, still read when the canonical one is missing
pub const LEGACY_REPORT_PATH: &str = "tasks/task-complexity-report.json";

/// Where a resolved report path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    /// `--report-path`, `--output` or `--file`
    Flag,
    /// `paths.complexityReport` in `.taskmasterconfig`
    Config,
    /// `scripts/task-complexity-report.json`
    Default,
    /// `tasks/task-complexity-report.json`
    Legacy,
}

impl std::fmt::Display for ReportSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag => write!(f, "command-line flag"),
            Self::Config => write!(f, "project config"),
            Self::Default => write!(f, "default location"),
            Self::Legacy => write!(f, "legacy location"),
        }
    }
}

/// A report path together with the rule that selected it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReportPath {
    pub path: PathBuf,
    pub source: ReportSource,
}

/// Join `path` onto `project_root` unless it is already absolute.
pub fn resolve_in_project(project_root: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

/// Decides which complexity report file a command should use.
#[derive(Debug, Clone)]
pub struct ReportPathResolver {
    project_root: PathBuf,
}

impl ReportPathResolver {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Resolve the report to read, or `None` when no candidate applies.
    pub fn resolve(&self, explicit: Option<&Path>) -> Option<ResolvedReportPath> {
        let resolved = self.resolve_inner(explicit);
        match &resolved {
            Some(r) => tracing::debug!(
                path = %r.path.display(),
                source = %r.source,
                "Resolved complexity report path"
            ),
            None => tracing::debug!(
                project_root = %self.project_root.display(),
                "No complexity report candidate found"
            ),
        }
        resolved
    }

    /// Resolve the report to write. Falls back to the canonical default
    /// location when nothing else applies.
    pub fn resolve_output(&self, explicit: Option<&Path>) -> ResolvedReportPath {
        self.resolve(explicit).unwrap_or_else(|| ResolvedReportPath {
            path: self.project_root.join(DEFAULT_REPORT_PATH),
            source: ReportSource::Default,
        })
    }

    fn resolve_inner(&self, explicit: Option<&Path>) -> Option<ResolvedReportPath> {
        if let Some(path) = explicit {
            return Some(ResolvedReportPath {
                path: resolve_in_project(&self.project_root, path),
                source: ReportSource::Flag,
            });
        }

        if let Some(path) = self.configured_path() {
            return Some(ResolvedReportPath {
                path,
                source: ReportSource::Config,
            });
        }

        [
            (DEFAULT_REPORT_PATH, ReportSource::Default),
            (LEGACY_REPORT_PATH, ReportSource::Legacy),
        ]
        .into_iter()
        .map(|(relative, source)| ResolvedReportPath {
            path: self.project_root.join(relative),
            source,
        })
        .find(|candidate| candidate.path.is_file())
    }

    /// `paths.complexityReport` from the project config, if usable.
    ///
    /// An unreadable or malformed config counts as "not configured".
    fn configured_path(&self) -> Option<PathBuf> {
        let config_path = self.project_root.join(CONFIG_FILE_NAME);
        let content = std::fs::read_to_string(&config_path).ok()?;

        let config: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "Ignoring malformed project config"
                );
                return None;
            }
        };

        config
            .get("paths")
            .and_then(|paths| paths.get("complexityReport"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| resolve_in_project(&self.project_root, p))
    }
}
