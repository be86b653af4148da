//! Analyze complexity prompt template.
//!
//! Scores task complexity and recommends how far to break each task down.

use serde::Serialize;

use crate::entities::Task;

use super::PromptTemplate;

/// Context for the analyze-complexity prompt.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeComplexityContext {
    /// Tasks to analyze
    pub tasks: Vec<TaskForAnalysis>,
    /// Score at or above which expansion is recommended
    pub threshold: f64,
    pub use_research: bool,
    pub project_name: Option<String>,
}

/// The parts of a task the model needs to score it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskForAnalysis {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub details: String,
    pub priority: String,
    pub dependencies: Vec<u32>,
    pub subtask_count: usize,
}

impl From<&Task> for TaskForAnalysis {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            details: task.details.clone(),
            priority: task.priority.to_string(),
            dependencies: task.dependencies.clone(),
            subtask_count: task.subtasks.len(),
        }
    }
}

/// Get the analyze-complexity template.
pub fn template() -> PromptTemplate {
    PromptTemplate::new("analyze-complexity", SYSTEM_PROMPT, USER_PROMPT)
        .with_description("Analyze task complexity and generate expansion recommendations")
}

const SYSTEM_PROMPT: &str = r#"You are an expert software architect and project manager analyzing task complexity. Your analysis should consider implementation effort, technical challenges, dependencies, and testing requirements.

IMPORTANT: For each task, provide an analysis object with ALL of the following fields:
- taskId: The ID of the task being analyzed (positive integer)
- taskTitle: The title of the task
- complexityScore: A score from 1-10 indicating complexity
- recommendedSubtasks: Number of subtasks recommended (non-negative integer; 0 if no expansion needed)
- expansionPrompt: A prompt to guide subtask generation
- reasoning: Your reasoning for the complexity score

Your response MUST be a JSON object with a single "complexityAnalysis" property containing an array of these analysis objects."#;

const USER_PROMPT: &str = r"Analyze the following tasks to determine their complexity (1-10 scale) and recommend the number of subtasks for expansion. Tasks scoring {{threshold}} or higher are candidates for expansion. Provide a brief reasoning and an initial expansion prompt for each.{{#if use_research}} Consider current best practices, common implementation patterns, and industry standards in your analysis.{{/if}}{{#if project_name}}

Project: {{project_name}}{{/if}}

Tasks:
{{{json tasks}}}";
