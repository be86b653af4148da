//! Provider Registry - Manages AI provider instances.

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{TasksError, TasksResult};

use super::anthropic::AnthropicProvider;
use super::openai::OpenAIProvider;
use super::provider::AIProvider;

/// Registry of AI providers keyed by provider name.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn AIProvider>>,
}

impl ProviderRegistry {
    /// Create an empty provider registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in providers registered.
    ///
    /// Providers are registered even without an API key so that a missing
    /// key can be reported by name.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(AnthropicProvider::from_env()));
        registry.register(Arc::new(OpenAIProvider::from_env()));
        registry
    }

    /// Register a provider, replacing any provider with the same name.
    pub fn register(&mut self, provider: Arc<dyn AIProvider>) {
        self.providers.insert(provider.name().to_string(), provider);
    }

    /// Get a provider by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn AIProvider>> {
        self.providers.get(name).cloned()
    }

    /// Get all registered provider names, sorted.
    pub fn provider_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get a configured provider by name.
    pub fn require(&self, name: &str) -> TasksResult<Arc<dyn AIProvider>> {
        let provider = self.get(name).ok_or_else(|| {
            TasksError::Ai(format!(
                "Provider '{name}' not found (available: {})",
                self.provider_names().join(", ")
            ))
        })?;

        if !provider.is_configured() {
            return Err(TasksError::ProviderNotConfigured {
                provider: name.to_string(),
                env_var: provider.api_key_env_var().to_string(),
            });
        }

        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = ProviderRegistry::new();
        assert!(registry.provider_names().is_empty());
    }

    #[test]
    fn test_defaults_registered() {
        let registry = ProviderRegistry::with_defaults();
        assert_eq!(registry.provider_names(), vec!["anthropic", "openai"]);
    }

    #[test]
    fn test_unconfigured_provider_names_env_var() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(AnthropicProvider::with_api_key(None)));

        match registry.require("anthropic") {
            Err(TasksError::ProviderNotConfigured { env_var, .. }) => {
                assert_eq!(env_var, "ANTHROPIC_API_KEY");
            }
            other => panic!("expected ProviderNotConfigured, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_unknown_provider_lists_registered_names() {
        let registry = ProviderRegistry::with_defaults();
        match registry.require("perplexity") {
            Err(TasksError::Ai(message)) => {
                assert!(message.contains("'perplexity'"));
                assert!(message.contains("available: anthropic, openai"));
            }
            other => panic!("expected Ai error, got {:?}", other.err()),
        }
    }
}
