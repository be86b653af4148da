//! `analyze-complexity`: score open tasks and write a complexity report.

use std::path::PathBuf;

use crate::ai::{ComplexityReport, DEFAULT_THRESHOLD};
use crate::domain::AnalyzeRequest;
use crate::errors::{TasksError, TasksResult};
use crate::paths::ResolvedReportPath;
use crate::ui;

use super::CommandContext;

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Tasks file
    pub file: Option<PathBuf>,
    /// Report destination
    pub output: Option<PathBuf>,
    pub threshold: f64,
    pub research: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            file: None,
            output: None,
            threshold: DEFAULT_THRESHOLD,
            research: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzeOutcome {
    pub location: ResolvedReportPath,
    pub report: ComplexityReport,
}

pub async fn analyze_complexity(
    ctx: &CommandContext,
    options: &AnalyzeOptions,
) -> TasksResult<AnalyzeOutcome> {
    if !(1.0..=10.0).contains(&options.threshold) {
        return Err(TasksError::InvalidArgument {
            reason: format!(
                "threshold must be between 1 and 10, got {}",
                options.threshold
            ),
        });
    }

    let tasks = ctx.tasks(options.file.as_deref()).list_tasks(None).await?;

    let reports = ctx.reports();
    let location = reports.resolver().resolve_output(options.output.as_deref());
    tracing::debug!(path = %location.path.display(), source = %location.source, "Report output path");

    let config = ctx.config().load_or_default().await;
    let ai = ctx.ai(&config);
    let request = AnalyzeRequest {
        threshold: options.threshold,
        research: options.research,
        project_name: config.global.project_name.clone(),
    };

    ui::print_info(&format!("Analyzing complexity of {} task(s)...", tasks.len()));
    let spinner = ui::spinner("Waiting for AI analysis");
    let result = ai.analyze_complexity(&tasks, &request).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let (report, usage) = result?;

    reports.save(&location.path, &report).await?;

    ui::print_success(&format!(
        "Complexity analysis saved to {}",
        location.path.display()
    ));
    ui::print_info(&format!(
        "Tokens used: {} in, {} out",
        usage.input_tokens, usage.output_tokens
    ));

    let high = report.high_complexity().count();
    if high > 0 {
        ui::print_warning(&format!(
            "{high} task(s) at or above complexity {}. Run `task-master complexity-report` for details.",
            ui::format_score(options.threshold)
        ));
    }

    Ok(AnalyzeOutcome { location, report })
}
