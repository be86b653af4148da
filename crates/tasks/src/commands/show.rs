//! `show` and `next`: single task views.

use std::path::{Path, PathBuf};

use crate::ai::TaskComplexityAnalysis;
use crate::domain::TaskItem;
use crate::errors::TasksResult;
use crate::ui;

use super::CommandContext;

#[derive(Debug, Clone, Default)]
pub struct ShowOptions {
    /// `3` or `3.1`
    pub id: String,
    pub tasks_file: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct NextOptions {
    pub tasks_file: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ShowOutcome {
    pub item: TaskItem,
    /// Report entry for the item's task, when a report was found
    pub analysis: Option<TaskComplexityAnalysis>,
}

async fn analysis_for(
    ctx: &CommandContext,
    report_path: Option<&Path>,
    task_id: u32,
) -> Option<TaskComplexityAnalysis> {
    let loaded = ctx.reports().load_optional(report_path).await?;
    loaded.report.analysis_for(task_id).cloned()
}

pub async fn show(ctx: &CommandContext, options: &ShowOptions) -> TasksResult<ShowOutcome> {
    let item = ctx
        .tasks(options.tasks_file.as_deref())
        .get(&options.id)
        .await?;
    let analysis = analysis_for(ctx, options.report_path.as_deref(), item.task_id()).await;

    ui::display_task_item(&item, analysis.as_ref());

    Ok(ShowOutcome { item, analysis })
}

/// Show the next item to work on, or `None` when nothing is eligible.
pub async fn next(ctx: &CommandContext, options: &NextOptions) -> TasksResult<Option<ShowOutcome>> {
    let Some(item) = ctx
        .tasks(options.tasks_file.as_deref())
        .next_task()
        .await?
    else {
        ui::print_info("No eligible tasks. All tasks are done or waiting on dependencies.");
        return Ok(None);
    };

    let analysis = analysis_for(ctx, options.report_path.as_deref(), item.task_id()).await;

    ui::print_info(&format!("Next task: {} - {}", item.display_id(), item.title()));
    println!();
    ui::display_task_item(&item, analysis.as_ref());

    Ok(Some(ShowOutcome { item, analysis }))
}
