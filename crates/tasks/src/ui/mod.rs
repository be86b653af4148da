//! Terminal UI helpers for task display.
//!
//! This module uses println! for CLI output, which is appropriate
//! for terminal user interfaces.

#![allow(clippy::disallowed_macros)]

use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};

use crate::ai::{ComplexityReport, TaskComplexityAnalysis};
use crate::domain::{ModelCatalog, ModelRole, TaskItem};
use crate::entities::{ProjectConfig, Subtask, Task, TaskPriority, TaskStatus};

/// Get colored status string
pub fn status_colored(status: TaskStatus) -> String {
    match status {
        TaskStatus::Pending => "pending".yellow().to_string(),
        TaskStatus::InProgress => "in-progress".cyan().to_string(),
        TaskStatus::Done => "done".green().to_string(),
        TaskStatus::Deferred => "deferred".blue().to_string(),
        TaskStatus::Cancelled => "cancelled".red().to_string(),
        TaskStatus::Blocked => "blocked".red().bold().to_string(),
        TaskStatus::Review => "review".magenta().to_string(),
    }
}

/// Get colored priority string
pub fn priority_colored(priority: TaskPriority) -> String {
    match priority {
        TaskPriority::Low => "low".dimmed().to_string(),
        TaskPriority::Medium => "medium".normal().to_string(),
        TaskPriority::High => "high".yellow().to_string(),
        TaskPriority::Critical => "critical".red().bold().to_string(),
    }
}

fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Pending => Color::Yellow,
        TaskStatus::InProgress => Color::Cyan,
        TaskStatus::Done => Color::Green,
        TaskStatus::Cancelled | TaskStatus::Blocked => Color::Red,
        TaskStatus::Deferred => Color::Blue,
        TaskStatus::Review => Color::Magenta,
    }
}

fn priority_color(priority: TaskPriority) -> Color {
    match priority {
        TaskPriority::Low => Color::DarkGrey,
        TaskPriority::Medium => Color::White,
        TaskPriority::High => Color::Yellow,
        TaskPriority::Critical => Color::Red,
    }
}

/// Format a complexity score without a trailing `.0`
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.1}")
    }
}

fn score_color(score: f64) -> Color {
    if score >= 8.0 {
        Color::Red
    } else if score >= 5.0 {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn score_cell(analysis: Option<&TaskComplexityAnalysis>) -> Cell {
    match analysis.and_then(|a| a.complexity_score) {
        Some(score) => Cell::new(format!("● {}", format_score(score))).fg(score_color(score)),
        None => Cell::new("N/A").fg(Color::DarkGrey),
    }
}

fn join_ids<T: ToString>(ids: &[T]) -> String {
    if ids.is_empty() {
        "-".to_string()
    } else {
        ids.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Create a table for displaying tasks
pub fn task_table(tasks: &[Task], show_subtasks: bool, report: Option<&ComplexityReport>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Title").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Priority").fg(Color::Cyan),
        Cell::new("Deps").fg(Color::Cyan),
        Cell::new("Complexity").fg(Color::Cyan),
    ]);

    for task in tasks {
        let analysis = report.and_then(|r| r.analysis_for(task.id));

        table.add_row(vec![
            Cell::new(task.id),
            Cell::new(&task.title),
            Cell::new(task.status.to_string()).fg(status_color(task.status)),
            Cell::new(task.priority.to_string()).fg(priority_color(task.priority)),
            Cell::new(join_ids(&task.dependencies)),
            score_cell(analysis),
        ]);

        if show_subtasks {
            for subtask in &task.subtasks {
                table.add_row(vec![
                    Cell::new(format!("  {}", subtask.full_id(task.id))).fg(Color::DarkGrey),
                    Cell::new(format!("  └─ {}", subtask.title)).fg(Color::DarkGrey),
                    Cell::new(subtask.status.to_string()).fg(status_color(subtask.status)),
                    Cell::new("-"),
                    Cell::new(join_ids(&subtask.dependencies)),
                    Cell::new(""),
                ]);
            }
        }
    }

    table
}

fn percent(done: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let ratio = done as f64 / total as f64;
        ratio * 100.0
    }
}

/// Print task and subtask completion counts
pub fn display_progress_summary(tasks: &[Task]) {
    let total = tasks.len();
    let done = tasks.iter().filter(|t| t.status.is_complete()).count();
    let in_progress = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::InProgress)
        .count();

    let subtask_total: usize = tasks.iter().map(|t| t.subtasks.len()).sum();
    let subtask_done: usize = tasks.iter().map(Task::completed_subtasks).sum();

    println!(
        "{} {}/{} tasks done ({:.0}%), {} in progress",
        "Progress:".bold(),
        done,
        total,
        percent(done, total),
        in_progress
    );
    if subtask_total > 0 {
        println!(
            "{} {}/{} subtasks done ({:.0}%)",
            "Subtasks:".bold(),
            subtask_done,
            subtask_total,
            percent(subtask_done, subtask_total)
        );
    }
}

fn display_analysis(analysis: &TaskComplexityAnalysis) {
    println!();
    println!("{}", "Complexity".bold().underline());
    if let Some(score) = analysis.complexity_score {
        println!("  Score: {}/10", format_score(score));
    }
    if let Some(count) = analysis.recommended_subtasks {
        println!("  Recommended subtasks: {count}");
    }
    if let Some(ref reasoning) = analysis.reasoning {
        println!("  Reasoning: {reasoning}");
    }
}

/// Display task details in a formatted way
pub fn display_task_details(task: &Task, analysis: Option<&TaskComplexityAnalysis>) {
    println!("{}", "═".repeat(60).dimmed());
    println!(
        "{} {} {}",
        "Task".cyan().bold(),
        task.id.to_string().cyan().bold(),
        format!("[{}]", task.status).yellow()
    );
    println!("{}", "═".repeat(60).dimmed());
    println!();

    println!("{}: {}", "Title".bold(), task.title);
    println!("{}: {}", "Status".bold(), status_colored(task.status));
    println!("{}: {}", "Priority".bold(), priority_colored(task.priority));

    if !task.dependencies.is_empty() {
        println!("{}: {}", "Dependencies".bold(), join_ids(&task.dependencies));
    }

    if !task.description.is_empty() {
        println!();
        println!("{}", "Description".bold().underline());
        println!("{}", task.description);
    }

    if !task.details.is_empty() {
        println!();
        println!("{}", "Details".bold().underline());
        println!("{}", task.details);
    }

    if !task.test_strategy.is_empty() {
        println!();
        println!("{}", "Test Strategy".bold().underline());
        println!("{}", task.test_strategy);
    }

    if !task.subtasks.is_empty() {
        println!();
        println!(
            "{} ({}/{} done)",
            "Subtasks".bold().underline(),
            task.completed_subtasks(),
            task.subtasks.len()
        );
        for subtask in &task.subtasks {
            println!(
                "  {} {} - {} [{}]",
                "•".dimmed(),
                subtask.full_id(task.id),
                subtask.title,
                status_colored(subtask.status)
            );
        }
    }

    if let Some(analysis) = analysis {
        display_analysis(analysis);
    }

    println!();
}

fn display_subtask_details(parent: &Task, subtask: &Subtask) {
    println!("{}", "═".repeat(60).dimmed());
    println!(
        "{} {} {}",
        "Subtask".cyan().bold(),
        subtask.full_id(parent.id).cyan().bold(),
        format!("[{}]", subtask.status).yellow()
    );
    println!("{}", "═".repeat(60).dimmed());
    println!();

    println!("{}: {}", "Title".bold(), subtask.title);
    println!("{}: {} - {}", "Parent".bold(), parent.id, parent.title);
    println!("{}: {}", "Status".bold(), status_colored(subtask.status));
    if !subtask.dependencies.is_empty() {
        println!(
            "{}: {}",
            "Dependencies".bold(),
            join_ids(&subtask.dependencies)
        );
    }

    if !subtask.description.is_empty() {
        println!();
        println!("{}", "Description".bold().underline());
        println!("{}", subtask.description);
    }

    if !subtask.details.is_empty() {
        println!();
        println!("{}", "Details".bold().underline());
        println!("{}", subtask.details);
    }

    println!();
}

/// Display a task or subtask
pub fn display_task_item(item: &TaskItem, analysis: Option<&TaskComplexityAnalysis>) {
    match item {
        TaskItem::Task(task) => display_task_details(task, analysis),
        TaskItem::Subtask { parent, subtask } => display_subtask_details(parent, subtask),
    }
}

/// Table of catalog models with a mark per bound role
pub fn models_table(catalog: &ModelCatalog, config: &ProjectConfig) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Provider").fg(Color::Cyan),
        Cell::new("Main").fg(Color::Cyan),
        Cell::new("Research").fg(Color::Cyan),
        Cell::new("Fallback").fg(Color::Cyan),
    ]);

    for model in catalog.models() {
        let mut row = vec![
            Cell::new(&model.id),
            Cell::new(&model.name),
            Cell::new(&model.provider),
        ];
        for role in ModelRole::ALL {
            let bound = role
                .binding(config)
                .is_some_and(|s| s.model_id == model.id && s.provider == model.provider);
            row.push(if bound {
                Cell::new("✓").fg(Color::Green)
            } else {
                Cell::new("")
            });
        }
        table.add_row(row);
    }

    table
}

/// Display a complexity report: summary, table and expansion commands
pub fn display_complexity_report(report: &ComplexityReport, path: &Path) {
    let threshold = report.threshold();

    println!("{}", "Task Complexity Analysis Report".cyan().bold());
    println!("{}", "═".repeat(60).dimmed());
    println!("{}: {}", "Report".bold(), path.display());
    if let Some(ref name) = report.meta.project_name {
        println!("{}: {}", "Project".bold(), name);
    }
    println!(
        "{}: {}",
        "Tasks analyzed".bold(),
        report
            .meta
            .tasks_analyzed
            .unwrap_or(report.complexity_analysis.len())
    );
    println!("{}: {}", "Threshold".bold(), format_score(threshold));
    if let Some(ref generated_at) = report.meta.generated_at {
        println!("{}: {}", "Generated".bold(), generated_at);
    }
    if report.meta.used_research == Some(true) {
        println!("{}: yes", "Research".bold());
    }
    println!();

    if report.complexity_analysis.is_empty() {
        print_info("The report contains no task analyses.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Title").fg(Color::Cyan),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Subtasks").fg(Color::Cyan),
        Cell::new("Expand").fg(Color::Cyan),
    ]);

    for analysis in &report.complexity_analysis {
        let needs_expansion = analysis.complexity_score.is_some_and(|s| s >= threshold);
        table.add_row(vec![
            Cell::new(analysis.task_id),
            Cell::new(analysis.task_title.as_deref().unwrap_or("")),
            score_cell(Some(analysis)),
            Cell::new(
                analysis
                    .recommended_subtasks
                    .map_or_else(|| "-".to_string(), |n| n.to_string()),
            ),
            if needs_expansion {
                Cell::new("yes").fg(Color::Yellow)
            } else {
                Cell::new("-")
            },
        ]);
    }
    println!("{table}");

    let commands: Vec<String> = report
        .high_complexity()
        .map(|a| match a.recommended_subtasks {
            Some(n) => format!("task-master expand --id {} --num {n}", a.task_id),
            None => format!("task-master expand --id {}", a.task_id),
        })
        .collect();

    if !commands.is_empty() {
        println!();
        println!("{}", "Suggested expansions".bold().underline());
        for command in commands {
            println!("  {}", command.green());
        }
    }
}

/// Spinner shown while an AI call is pending; `None` when not on a TTY
pub fn spinner(message: impl Into<String>) -> Option<ProgressBar> {
    if !std::io::stderr().is_terminal() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print error message to stderr
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}
