//! `list`: task table with complexity scores.

use std::path::PathBuf;

use crate::domain::LoadedReport;
use crate::entities::{Task, TaskStatus};
use crate::errors::TasksResult;
use crate::ui;

use super::CommandContext;

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub tasks_file: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub status: Option<String>,
    pub with_subtasks: bool,
}

#[derive(Debug, Clone)]
pub struct ListOutcome {
    pub tasks: Vec<Task>,
    pub report: Option<LoadedReport>,
}

pub async fn list(ctx: &CommandContext, options: &ListOptions) -> TasksResult<ListOutcome> {
    let status_filter = options
        .status
        .as_deref()
        .map(str::parse::<TaskStatus>)
        .transpose()?;

    let tasks = ctx
        .tasks(options.tasks_file.as_deref())
        .list_tasks(status_filter)
        .await?;
    let report = ctx
        .reports()
        .load_optional(options.report_path.as_deref())
        .await;

    if tasks.is_empty() {
        match status_filter {
            Some(status) => ui::print_info(&format!("No tasks with status '{status}'")),
            None => ui::print_info("No tasks found"),
        }
    } else {
        let table = ui::task_table(
            &tasks,
            options.with_subtasks,
            report.as_ref().map(|r| &r.report),
        );
        println!("{table}");
        println!();
        ui::display_progress_summary(&tasks);
    }

    Ok(ListOutcome { tasks, report })
}
