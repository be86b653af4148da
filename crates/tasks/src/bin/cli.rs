//! task-master CLI - AI-assisted task tracking.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::disallowed_macros)]
#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use taskmaster::ai::DEFAULT_THRESHOLD;
use taskmaster::commands::{
    self, AnalyzeOptions, CommandContext, ExpandOptions, ListOptions, ModelsOptions, NextOptions,
    ReportOptions, ShowOptions,
};
use taskmaster::errors::TasksError;
use taskmaster::{logging, ui};

#[derive(Parser)]
#[command(name = "task-master")]
#[command(about = "AI-assisted task tracking", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root directory
    #[arg(long, global = true, env = "TASKMASTER_PROJECT_ROOT")]
    project_root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or set the models used for each role
    Models {
        /// Set the main model
        #[arg(long)]
        set_main: Option<String>,

        /// Set the research model
        #[arg(long)]
        set_research: Option<String>,

        /// Set the fallback model
        #[arg(long)]
        set_fallback: Option<String>,
    },

    /// Analyze task complexity and write a report
    AnalyzeComplexity {
        /// Path to the tasks file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Where to write the report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Score at which a task is recommended for expansion (1-10)
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,

        /// Use the research model
        #[arg(short, long)]
        research: bool,
    },

    /// Display a complexity report
    ComplexityReport {
        /// Path to the report
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// List all tasks
    List {
        /// Filter by status
        #[arg(short, long)]
        status: Option<String>,

        /// Include subtasks
        #[arg(long)]
        with_subtasks: bool,

        /// Path to the complexity report
        #[arg(long)]
        report_path: Option<PathBuf>,

        /// Path to the tasks file
        #[arg(long, visible_alias = "file")]
        tasks_file: Option<PathBuf>,
    },

    /// Show the next task to work on
    Next {
        /// Path to the complexity report
        #[arg(long)]
        report_path: Option<PathBuf>,

        /// Path to the tasks file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show details of a task or subtask
    Show {
        /// Task ID (e.g. 3 or 3.1)
        id: String,

        /// Path to the complexity report
        #[arg(long)]
        report_path: Option<PathBuf>,

        /// Path to the tasks file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Expand a task into subtasks using AI
    Expand {
        /// Task ID to expand
        #[arg(short, long)]
        id: u32,

        /// Path to the tasks file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Number of subtasks to generate
        #[arg(short, long)]
        num: Option<u32>,

        /// Use the research model
        #[arg(short, long)]
        research: bool,

        /// Replace existing subtasks
        #[arg(long)]
        force: bool,

        /// Additional context for the AI
        #[arg(short, long)]
        prompt: Option<String>,
    },
}

fn get_project_root(cli_path: Option<PathBuf>) -> PathBuf {
    cli_path.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        ui::print_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), TasksError> {
    let ctx = CommandContext::new(get_project_root(cli.project_root));

    // Config problems surface later through the commands that read it.
    let config_domain = ctx.config();
    let config = if config_domain.path().is_file() {
        config_domain.load().await.ok()
    } else {
        None
    };
    logging::init(
        cli.debug || config.as_ref().is_some_and(|c| c.global.debug),
        config.as_ref().map(|c| c.global.log_level.as_str()),
    );
    tracing::debug!(project_root = %ctx.project_root().display(), "Starting task-master");

    match cli.command {
        Commands::Models {
            set_main,
            set_research,
            set_fallback,
        } => {
            let options = ModelsOptions {
                set_main,
                set_research,
                set_fallback,
            };
            commands::models(&ctx, &options).await?;
        }

        Commands::AnalyzeComplexity {
            file,
            output,
            threshold,
            research,
        } => {
            let options = AnalyzeOptions {
                file,
                output,
                threshold,
                research,
            };
            commands::analyze_complexity(&ctx, &options).await?;
        }

        Commands::ComplexityReport { file } => {
            commands::complexity_report(&ctx, &ReportOptions { file }).await?;
        }

        Commands::List {
            status,
            with_subtasks,
            report_path,
            tasks_file,
        } => {
            let options = ListOptions {
                tasks_file,
                report_path,
                status,
                with_subtasks,
            };
            commands::list(&ctx, &options).await?;
        }

        Commands::Next { report_path, file } => {
            let options = NextOptions {
                tasks_file: file,
                report_path,
            };
            commands::next(&ctx, &options).await?;
        }

        Commands::Show {
            id,
            report_path,
            file,
        } => {
            let options = ShowOptions {
                id,
                tasks_file: file,
                report_path,
            };
            commands::show(&ctx, &options).await?;
        }

        Commands::Expand {
            id,
            file,
            num,
            research,
            force,
            prompt,
        } => {
            let options = ExpandOptions {
                id,
                file,
                num,
                research,
                force,
                prompt,
            };
            commands::expand(&ctx, &options).await?;
        }
    }

    Ok(())
}
