//! AI integration for task management.
//!
//! This module provides:
//! - AI provider abstraction (Anthropic, OpenAI)
//! - Prompt template system with Handlebars
//! - Structured response and report schemas
//! - Provider registry keyed by provider name

pub mod prompts;
pub mod provider;
pub mod registry;
pub mod schemas;

// Provider implementations
pub mod anthropic;
pub mod openai;

pub use prompts::{PromptManager, PromptTemplate};
pub use provider::{
    parse_ai_response, AIMessage, AIProvider, AIResponse, AIRole, GenerateOptions, TokenUsage,
};
pub use registry::ProviderRegistry;
pub use schemas::*;
