//! `complexity-report`: display a saved complexity report.

use std::path::PathBuf;

use crate::domain::LoadedReport;
use crate::errors::TasksResult;
use crate::ui;

use super::CommandContext;

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub file: Option<PathBuf>,
}

/// Display the resolved report.
///
/// Returns `Ok(None)` when no report could be located. An explicit
/// `--file` that does not exist is an error.
pub async fn complexity_report(
    ctx: &CommandContext,
    options: &ReportOptions,
) -> TasksResult<Option<LoadedReport>> {
    let reports = ctx.reports();

    let Some(location) = reports.locate(options.file.as_deref()) else {
        ui::print_warning("No complexity report found.");
        ui::print_info("Run `task-master analyze-complexity` to generate one.");
        return Ok(None);
    };
    tracing::debug!(path = %location.path.display(), source = %location.source, "Reading complexity report");

    let report = reports.load_required(&location.path).await?;
    ui::display_complexity_report(&report, &location.path);

    Ok(Some(LoadedReport { location, report }))
}
