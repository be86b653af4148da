//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use taskmaster::ai::{AIMessage, AIProvider, AIResponse, AIRole, GenerateOptions, TokenUsage};
use taskmaster::commands::CommandContext;
use taskmaster::errors::{TasksError, TasksResult};
use taskmaster::ProviderRegistry;

/// Provider that replays canned replies and records the user prompts it got.
pub struct MockProvider {
    replies: Mutex<Vec<String>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    pub fn new(replies: Vec<String>) -> (Self, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let provider = Self {
            replies: Mutex::new(replies),
            prompts: Arc::clone(&prompts),
        };
        (provider, prompts)
    }
}

#[async_trait]
impl AIProvider for MockProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn api_key_env_var(&self) -> &'static str {
        "ANTHROPIC_API_KEY"
    }

    fn is_configured(&self) -> bool {
        true
    }

    fn supported_models(&self) -> Vec<&str> {
        vec!["claude-sonnet-4-20250514"]
    }

    async fn generate_text(
        &self,
        model: &str,
        messages: &[AIMessage],
        _options: &GenerateOptions,
    ) -> TasksResult<AIResponse> {
        let user = messages
            .iter()
            .filter(|m| m.role == AIRole::User)
            .map(|m| m.content.clone())
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(user);

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(TasksError::Ai("no scripted reply left".to_string()));
        }
        Ok(AIResponse {
            text: replies.remove(0),
            usage: TokenUsage {
                input_tokens: 100,
                output_tokens: 50,
                total_tokens: 150,
            },
            model: model.to_string(),
            provider: "anthropic".to_string(),
        })
    }
}

/// Command context whose AI calls go to a [`MockProvider`].
pub fn mock_context(root: &Path, replies: Vec<String>) -> (CommandContext, Arc<Mutex<Vec<String>>>) {
    let (provider, prompts) = MockProvider::new(replies);
    let mut registry = ProviderRegistry::new();
    registry.register(Arc::new(provider));
    (CommandContext::with_registry(root, registry), prompts)
}

/// Context with no providers registered; any AI call fails.
pub fn offline_context(root: &Path) -> CommandContext {
    CommandContext::with_registry(root, ProviderRegistry::new())
}

pub fn write_json(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

/// Three tasks: 1 done, 2 pending on 1, 3 pending on 2
pub fn sample_tasks() -> Value {
    json!({
        "tasks": [
            {"id": 1, "title": "Set up repository", "status": "done", "priority": "high"},
            {
                "id": 2,
                "title": "Implement parser",
                "description": "Parse the input format",
                "status": "pending",
                "priority": "high",
                "dependencies": [1]
            },
            {
                "id": 3,
                "title": "Write docs",
                "status": "pending",
                "priority": "low",
                "dependencies": [2]
            }
        ],
        "metadata": {"projectName": "fixture"}
    })
}

pub fn write_tasks(root: &Path) {
    write_json(&root.join("tasks/tasks.json"), &sample_tasks());
}

/// Report with one entry per `(task_id, score, recommended)`
pub fn report_json(entries: &[(u32, f64, u32)]) -> Value {
    let analysis: Vec<Value> = entries
        .iter()
        .map(|(id, score, recommended)| {
            json!({
                "taskId": id,
                "taskTitle": format!("Task {id}"),
                "complexityScore": score,
                "recommendedSubtasks": recommended,
                "expansionPrompt": format!("Split task {id} by layer"),
                "reasoning": "Touches several modules"
            })
        })
        .collect();

    json!({
        "meta": {"tasksAnalyzed": entries.len(), "thresholdScore": 5},
        "complexityAnalysis": analysis
    })
}

pub fn write_report(root: &Path, relative: &str, entries: &[(u32, f64, u32)]) {
    write_json(&root.join(relative), &report_json(entries));
}

/// Canned expand reply with `count` subtasks
pub fn subtasks_reply(count: u32) -> String {
    let subtasks: Vec<Value> = (1..=count)
        .map(|n| {
            json!({
                "title": format!("Step {n}"),
                "description": format!("Do step {n}"),
                "dependencies": [],
                "details": "",
                "testStrategy": ""
            })
        })
        .collect();
    json!({ "subtasks": subtasks }).to_string()
}
