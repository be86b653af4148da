//! AI Domain - High-level AI operations for task management.
//!
//! This module provides AI-powered operations:
//! - Expand tasks into subtasks
//! - Analyze task complexity
//!
//! The model comes from the project's `models` config. A failed call is
//! retried once against the fallback model when one is configured.

use serde::Serialize;

use crate::ai::{
    parse_ai_response,
    prompts::{AnalyzeComplexityContext, ExpandTaskContext, TaskForAnalysis, TaskSummary},
    schemas::{
        AnalyzeComplexityResponse, ComplexityReport, ExpandTaskResponse, ReportMeta,
        TaskComplexityAnalysis,
    },
    AIMessage, AIResponse, GenerateOptions, PromptManager, ProviderRegistry, TokenUsage,
};
use crate::entities::{ModelConfig, ModelSettings, Subtask, Task};
use crate::errors::{TasksError, TasksResult};

/// Options for a single expansion
#[derive(Debug, Clone, Default)]
pub struct ExpandRequest {
    /// Number of subtasks to ask for
    pub count: u32,
    pub research: bool,
    /// Extra user-supplied context
    pub additional_context: Option<String>,
    /// Report entry for the task, if one was found
    pub analysis: Option<TaskComplexityAnalysis>,
}

/// Options for a complexity analysis run
#[derive(Debug, Clone, Default)]
pub struct AnalyzeRequest {
    pub threshold: f64,
    pub research: bool,
    pub project_name: Option<String>,
}

/// Decide how many subtasks to generate.
///
/// An explicit count wins, then the report's recommendation, then the
/// project default.
pub fn subtask_count(
    explicit: Option<u32>,
    analysis: Option<&TaskComplexityAnalysis>,
    default_count: u32,
) -> u32 {
    explicit
        .or_else(|| analysis.and_then(|a| a.recommended_subtasks))
        .unwrap_or(default_count)
}

/// AI Domain for AI-powered task operations.
pub struct AIDomain {
    registry: ProviderRegistry,
    prompts: PromptManager,
    models: ModelConfig,
}

impl AIDomain {
    /// Create with a custom provider registry.
    pub fn with_registry(models: ModelConfig, registry: ProviderRegistry) -> Self {
        Self {
            registry,
            prompts: PromptManager::default(),
            models,
        }
    }

    /// The model a request should use first.
    pub fn primary_model(&self, research: bool) -> ModelSettings {
        let configured = if research {
            self.models.research.as_ref().or(self.models.main.as_ref())
        } else {
            self.models.main.as_ref()
        };
        configured.cloned().unwrap_or_default()
    }

    async fn call_model(
        &self,
        settings: &ModelSettings,
        messages: &[AIMessage],
    ) -> TasksResult<AIResponse> {
        let provider = self.registry.require(&settings.provider)?;
        if !provider.supports_model(&settings.model_id) {
            tracing::warn!(
                provider = %settings.provider,
                model = %settings.model_id,
                "Model is not in the provider's known list, sending anyway"
            );
        }
        let options = GenerateOptions {
            temperature: Some(settings.temperature),
            max_tokens: Some(settings.max_tokens),
            base_url: settings.base_url.clone(),
        };

        tracing::info!(
            provider = %settings.provider,
            model = %settings.model_id,
            "Calling AI model"
        );
        provider
            .generate_text(&settings.model_id, messages, &options)
            .await
    }

    /// Render a prompt and run it, retrying once on the fallback model.
    async fn generate<T: Serialize>(
        &self,
        template_id: &str,
        context: &T,
        research: bool,
    ) -> TasksResult<AIResponse> {
        let (system, user) = self.prompts.render(template_id, context)?;
        let messages = [AIMessage::system(system), AIMessage::user(user)];

        let primary = self.primary_model(research);
        match self.call_model(&primary, &messages).await {
            Ok(response) => Ok(response),
            Err(primary_err) => match self.models.fallback.as_ref() {
                Some(fallback) if *fallback != primary => {
                    tracing::warn!(
                        error = %primary_err,
                        fallback = %fallback.model_id,
                        "Primary model failed, retrying with fallback"
                    );
                    self.call_model(fallback, &messages).await
                }
                _ => Err(primary_err),
            },
        }
    }

    /// Expand a task into subtasks.
    ///
    /// New subtask ids continue after the task's highest existing id.
    pub async fn expand_task(
        &self,
        task: &Task,
        request: &ExpandRequest,
    ) -> TasksResult<(Vec<Subtask>, TokenUsage)> {
        let next_id = task.next_subtask_id();
        let analysis = request.analysis.as_ref();

        let context = ExpandTaskContext {
            subtask_count: request.count,
            task: TaskSummary::from(task),
            next_subtask_id: next_id,
            use_research: request.research,
            expansion_prompt: analysis.and_then(|a| a.expansion_prompt.clone()),
            additional_context: request.additional_context.clone().unwrap_or_default(),
            complexity_reasoning_context: analysis
                .and_then(|a| a.reasoning.clone())
                .unwrap_or_default(),
        };

        let response = self
            .generate("expand-task", &context, request.research)
            .await?;
        let parsed: ExpandTaskResponse = parse_ai_response(&response)?;

        if parsed.subtasks.is_empty() {
            return Err(TasksError::AiResponseParseError {
                reason: "AI returned no subtasks".to_string(),
            });
        }

        let subtasks = parsed
            .subtasks
            .into_iter()
            .zip(next_id..)
            .map(|(generated, id)| generated.into_subtask(id))
            .collect();

        Ok((subtasks, response.usage))
    }

    /// Analyze complexity of every task that is not finished.
    ///
    /// Entries for tasks outside the analyzed set are dropped.
    pub async fn analyze_complexity(
        &self,
        tasks: &[Task],
        request: &AnalyzeRequest,
    ) -> TasksResult<(ComplexityReport, TokenUsage)> {
        let candidates: Vec<&Task> = tasks.iter().filter(|t| !t.status.is_complete()).collect();

        let meta = ReportMeta {
            generated_at: Some(chrono::Utc::now().to_rfc3339()),
            tasks_analyzed: Some(candidates.len()),
            threshold_score: Some(request.threshold),
            project_name: request.project_name.clone(),
            used_research: Some(request.research),
        };

        if candidates.is_empty() {
            tracing::info!("No open tasks to analyze");
            return Ok((
                ComplexityReport {
                    meta,
                    complexity_analysis: Vec::new(),
                },
                TokenUsage::default(),
            ));
        }

        let context = AnalyzeComplexityContext {
            tasks: candidates.iter().map(|t| TaskForAnalysis::from(*t)).collect(),
            threshold: request.threshold,
            use_research: request.research,
            project_name: request.project_name.clone(),
        };

        let response = self
            .generate("analyze-complexity", &context, request.research)
            .await?;
        let parsed: AnalyzeComplexityResponse = parse_ai_response(&response)?;

        let complexity_analysis = parsed
            .into_entries()
            .into_iter()
            .filter_map(|mut entry| {
                let task = candidates.iter().find(|t| t.id == entry.task_id)?;
                if entry.task_title.is_none() {
                    entry.task_title = Some(task.title.clone());
                }
                Some(entry)
            })
            .collect();

        Ok((
            ComplexityReport {
                meta,
                complexity_analysis,
            },
            response.usage,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::ai::AIProvider;
    use crate::entities::TaskStatus;

    /// Provider that replays canned responses and records the models used
    struct ScriptedProvider {
        name: &'static str,
        replies: Mutex<Vec<TasksResult<String>>>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl AIProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn api_key_env_var(&self) -> &'static str {
            "TEST_API_KEY"
        }

        fn is_configured(&self) -> bool {
            true
        }

        fn supported_models(&self) -> Vec<&str> {
            Vec::new()
        }

        async fn generate_text(
            &self,
            model: &str,
            _messages: &[AIMessage],
            _options: &GenerateOptions,
        ) -> TasksResult<AIResponse> {
            self.calls.lock().unwrap().push(model.to_string());
            let text = self.replies.lock().unwrap().remove(0)?;
            Ok(AIResponse {
                text,
                usage: TokenUsage::default(),
                model: model.to_string(),
                provider: self.name.to_string(),
            })
        }
    }

    fn domain(
        models: ModelConfig,
        replies: Vec<TasksResult<String>>,
    ) -> (AIDomain, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(ScriptedProvider {
            name: "anthropic",
            replies: Mutex::new(replies),
            calls: Arc::clone(&calls),
        }));
        (AIDomain::with_registry(models, registry), calls)
    }

    #[test]
    fn test_subtask_count_precedence() {
        let analysis: TaskComplexityAnalysis =
            serde_json::from_str(r#"{"taskId": 1, "recommendedSubtasks": 7}"#).unwrap();

        assert_eq!(subtask_count(Some(3), Some(&analysis), 5), 3);
        assert_eq!(subtask_count(None, Some(&analysis), 5), 7);
        assert_eq!(subtask_count(None, None, 5), 5);
    }

    #[test]
    fn test_primary_model_selection() {
        let models = ModelConfig {
            main: Some(ModelSettings::new("anthropic", "claude-3-opus")),
            research: Some(ModelSettings::new("perplexity", "sonar-pro")),
            ..ModelConfig::default()
        };
        let (configured, _) = domain(models, Vec::new());

        assert_eq!(configured.primary_model(false).model_id, "claude-3-opus");
        assert_eq!(configured.primary_model(true).model_id, "sonar-pro");

        let (empty, _) = domain(ModelConfig::default(), Vec::new());
        assert_eq!(
            empty.primary_model(false).model_id,
            "claude-sonnet-4-20250514"
        );
    }

    #[tokio::test]
    async fn test_expand_assigns_ids_after_existing() {
        let (domain, _) = domain(
            ModelConfig::default(),
            vec![Ok(r#"{"subtasks": [{"title": "A"}, {"title": "B", "dependencies": [3]}]}"#
                .to_string())],
        );

        let mut task = Task::new(1, "Parent", "Desc");
        task.append_subtasks([Subtask::new(2, "Existing", "Desc")]);

        let request = ExpandRequest {
            count: 2,
            ..ExpandRequest::default()
        };
        let (subtasks, _) = domain.expand_task(&task, &request).await.unwrap();

        let ids: Vec<u32> = subtasks.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert!(subtasks.iter().all(|s| s.status == TaskStatus::Pending));
    }

    #[tokio::test]
    async fn test_fallback_used_after_failure() {
        let models = ModelConfig {
            main: Some(ModelSettings::new("anthropic", "claude-3-opus")),
            fallback: Some(ModelSettings::new("anthropic", "claude-3-haiku")),
            ..ModelConfig::default()
        };
        let (domain, calls) = domain(
            models,
            vec![
                Err(TasksError::Ai("overloaded".to_string())),
                Ok(r#"{"subtasks": [{"title": "Only"}]}"#.to_string()),
            ],
        );

        let task = Task::new(1, "Parent", "Desc");
        let (subtasks, _) = domain
            .expand_task(&task, &ExpandRequest::default())
            .await
            .unwrap();

        assert_eq!(subtasks.len(), 1);
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["claude-3-opus".to_string(), "claude-3-haiku".to_string()]
        );
    }

    #[tokio::test]
    async fn test_analyze_skips_finished_tasks() {
        let (domain, calls) = domain(
            ModelConfig::default(),
            vec![Ok(
                r#"[{"taskId": 2, "complexityScore": 8, "recommendedSubtasks": 5}, {"taskId": 99}]"#
                    .to_string(),
            )],
        );

        let mut done = Task::new(1, "Done", "Desc");
        done.status = TaskStatus::Done;
        let open = Task::new(2, "Open", "Desc");

        let request = AnalyzeRequest {
            threshold: 5.0,
            research: false,
            project_name: Some("Demo".to_string()),
        };
        let (report, _) = domain
            .analyze_complexity(&[done, open], &request)
            .await
            .unwrap();

        assert_eq!(calls.lock().unwrap().len(), 1);
        assert_eq!(report.meta.tasks_analyzed, Some(1));
        assert_eq!(report.complexity_analysis.len(), 1);
        assert_eq!(
            report.complexity_analysis[0].task_title.as_deref(),
            Some("Open")
        );
    }

    #[tokio::test]
    async fn test_analyze_without_open_tasks_skips_ai() {
        let (domain, calls) = domain(ModelConfig::default(), Vec::new());
        let mut done = Task::new(1, "Done", "Desc");
        done.status = TaskStatus::Done;

        let (report, _) = domain
            .analyze_complexity(&[done], &AnalyzeRequest::default())
            .await
            .unwrap();

        assert!(report.complexity_analysis.is_empty());
        assert!(calls.lock().unwrap().is_empty());
    }
}
