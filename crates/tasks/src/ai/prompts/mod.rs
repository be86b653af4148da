//! Prompt template system for AI operations.
//!
//! Prompts are Handlebars templates with a system part and a user part,
//! registered by id in a [`PromptManager`].

use std::collections::HashMap;

use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;

use crate::errors::{TasksError, TasksResult};

mod analyze_complexity;
mod expand_task;

pub use analyze_complexity::{AnalyzeComplexityContext, TaskForAnalysis};
pub use expand_task::{ExpandTaskContext, TaskSummary};

/// A prompt template with system and user messages.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub id: String,
    pub description: String,
    /// System prompt template
    pub system: String,
    /// User prompt template
    pub user: String,
}

impl PromptTemplate {
    /// Create a new prompt template.
    pub fn new(id: impl Into<String>, system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            system: system.into(),
            user: user.into(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Render the template with the given context.
    pub fn render<T: Serialize>(&self, context: &T) -> TasksResult<(String, String)> {
        let mut handlebars = create_handlebars();

        handlebars
            .register_template_string("system", &self.system)
            .map_err(|e| TasksError::Ai(format!("Invalid system template: {e}")))?;

        handlebars
            .register_template_string("user", &self.user)
            .map_err(|e| TasksError::Ai(format!("Invalid user template: {e}")))?;

        let system = handlebars
            .render("system", context)
            .map_err(|e| TasksError::Ai(format!("Failed to render system prompt: {e}")))?;

        let user = handlebars
            .render("user", context)
            .map_err(|e| TasksError::Ai(format!("Failed to render user prompt: {e}")))?;

        Ok((system, user))
    }
}

/// Create a Handlebars instance with the prompt helpers.
fn create_handlebars() -> Handlebars<'static> {
    // {{#if (gt subtask_count 0)}}
    handlebars_helper!(gt: |a: i64, b: i64| a > b);

    // {{{json tasks}}}
    handlebars_helper!(json: |value: Json| {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
    });

    let mut handlebars = Handlebars::new();
    // Prompts are plain text
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.register_helper("gt", Box::new(gt));
    handlebars.register_helper("json", Box::new(json));
    handlebars
}

/// Prompt manager for loading and rendering templates.
pub struct PromptManager {
    templates: HashMap<String, PromptTemplate>,
}

impl PromptManager {
    /// Create a new prompt manager with the built-in templates.
    pub fn new() -> Self {
        let mut manager = Self {
            templates: HashMap::new(),
        };

        manager.register(analyze_complexity::template());
        manager.register(expand_task::template());

        manager
    }

    /// Register a template, replacing any with the same id.
    pub fn register(&mut self, template: PromptTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    /// Get a template by ID.
    pub fn get(&self, id: &str) -> Option<&PromptTemplate> {
        self.templates.get(id)
    }

    /// Render a template with context.
    pub fn render<T: Serialize>(&self, id: &str, context: &T) -> TasksResult<(String, String)> {
        let template = self
            .get(id)
            .ok_or_else(|| TasksError::Ai(format!("Template '{id}' not found")))?;
        template.render(context)
    }
}

impl Default for PromptManager {
    fn default() -> Self {
        Self::new()
    }
}
