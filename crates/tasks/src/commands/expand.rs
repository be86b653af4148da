//! `expand`: break a task into AI-generated subtasks.

use std::path::PathBuf;

use crate::domain::{subtask_count, ExpandRequest};
use crate::entities::{Subtask, Task};
use crate::errors::{TasksError, TasksResult};
use crate::paths::ReportSource;
use crate::ui;

use super::CommandContext;

#[derive(Debug, Clone, Default)]
pub struct ExpandOptions {
    pub id: u32,
    pub file: Option<PathBuf>,
    /// Explicit subtask count
    pub num: Option<u32>,
    pub research: bool,
    /// Replace existing subtasks instead of appending
    pub force: bool,
    /// Additional context for the prompt
    pub prompt: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ExpandOutcome {
    /// The task as saved
    pub task: Task,
    pub added: Vec<Subtask>,
    /// Count that was asked of the model
    pub requested: u32,
    /// Where the report came from, if one was used
    pub report_source: Option<ReportSource>,
}

pub async fn expand(ctx: &CommandContext, options: &ExpandOptions) -> TasksResult<ExpandOutcome> {
    let tasks = ctx.tasks(options.file.as_deref());
    let mut task = tasks.get_task(options.id).await?;

    if task.status.is_complete() {
        return Err(TasksError::CannotExpand {
            task_id: task.id.to_string(),
            reason: format!("task is {}", task.status),
        });
    }

    let config = ctx.config().load_or_default().await;

    // No explicit report flag here: config, then the default locations.
    let report = ctx.reports().load_optional(None).await;
    let analysis = report
        .as_ref()
        .and_then(|r| r.report.analysis_for(task.id))
        .cloned();
    let requested = subtask_count(
        options.num,
        analysis.as_ref(),
        config.global.default_subtasks,
    );
    if options.num.is_none() && analysis.is_some() {
        ui::print_info(&format!(
            "Using {requested} subtask(s) recommended by the complexity report"
        ));
    }

    if options.force && !task.subtasks.is_empty() {
        ui::print_warning(&format!(
            "Replacing {} existing subtask(s) of task {}",
            task.subtasks.len(),
            task.id
        ));
        task.subtasks.clear();
    }

    ui::print_info(&format!("Expanding task: {} - {}", task.id, task.title));

    let request = ExpandRequest {
        count: requested,
        research: options.research,
        additional_context: options.prompt.clone(),
        analysis,
    };
    let ai = ctx.ai(&config);
    let spinner = ui::spinner(format!("Generating {requested} subtask(s)"));
    let result = ai.expand_task(&task, &request).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let (added, usage) = result?;

    task.append_subtasks(added.clone());
    tasks.update_task(&task).await?;

    ui::print_success(&format!(
        "Added {} subtasks to task {}",
        added.len(),
        task.id
    ));
    ui::print_info(&format!(
        "Tokens used: {} in, {} out",
        usage.input_tokens, usage.output_tokens
    ));

    Ok(ExpandOutcome {
        task,
        added,
        requested,
        report_source: report.map(|r| r.location.source),
    })
}
