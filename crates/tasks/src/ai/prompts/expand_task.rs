//! Expand task prompt template.
//!
//! Breaks down a task into detailed subtasks.

use serde::Serialize;

use crate::entities::Task;

use super::PromptTemplate;

/// Context for expand-task prompt.
#[derive(Debug, Clone, Serialize)]
pub struct ExpandTaskContext {
    /// Number of subtasks to generate
    pub subtask_count: u32,
    /// The task to expand
    pub task: TaskSummary,
    /// Starting ID for new subtasks
    pub next_subtask_id: u32,
    pub use_research: bool,
    /// Expansion prompt from complexity report
    pub expansion_prompt: Option<String>,
    /// Extra user-supplied context (`--prompt`)
    pub additional_context: String,
    /// Reasoning from the complexity report
    pub complexity_reasoning_context: String,
}

/// Simplified task representation for prompts.
#[derive(Debug, Clone, Serialize)]
pub struct TaskSummary {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub details: String,
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            details: task.details.clone(),
        }
    }
}

/// Get the expand-task template.
pub fn template() -> PromptTemplate {
    PromptTemplate::new("expand-task", SYSTEM_PROMPT, USER_PROMPT)
        .with_description("Break down a task into detailed subtasks")
}

const SYSTEM_PROMPT: &str = r#"You are an AI assistant helping with task breakdown for software development. Break down high-level tasks into specific, actionable subtasks that can be implemented sequentially.{{#if use_research}}

You have access to current best practices and latest technical information to provide research-backed subtask generation.{{/if}}

IMPORTANT: Your response MUST be a JSON object with a "subtasks" property containing an array of subtask objects. Each subtask must include ALL of the following fields:
- id: Sequential integers starting from {{next_subtask_id}}
- title: A clear, actionable title
- description: A detailed description
- dependencies: An array of subtask IDs this subtask depends on (can be empty [])
- details: Implementation details
- testStrategy: Testing approach"#;

const USER_PROMPT: &str = r"Break down this task into {{#if (gt subtask_count 0)}}exactly {{subtask_count}}{{else}}an appropriate number of{{/if}} specific subtasks:

Task ID: {{task.id}}
Title: {{task.title}}
Description: {{task.description}}
Current details: {{#if task.details}}{{task.details}}{{else}}None{{/if}}{{#if expansion_prompt}}

Expansion guidance: {{expansion_prompt}}{{/if}}{{#if additional_context}}

Additional context: {{additional_context}}{{/if}}{{#if complexity_reasoning_context}}

Complexity Analysis Reasoning: {{complexity_reasoning_context}}{{/if}}";
