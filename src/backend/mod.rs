//! Backend trait and normalized request/response types.
//!
//! The [`Backend`] trait abstracts over LLM providers, translating between
//! a normalized [`LlmRequest`]/[`LlmResponse`] pair and a provider's HTTP
//! API. Built-in implementations: [`AnthropicBackend`] for the hosted
//! Messages API and [`MockBackend`] for tests.
//!
//! ```text
//! StoryGenerator ──► LlmRequest ──► Backend::complete() ──► LlmResponse
//!                                          │
//!                               ┌──────────┴──────────┐
//!                       AnthropicBackend         MockBackend
//!                        /v1/messages          canned replies
//! ```

pub mod anthropic;
pub mod mock;

pub use anthropic::AnthropicBackend;
pub use mock::{MockBackend, MockReply};

use crate::config::LlmConfig;
use crate::error::Result;
use crate::reasoning::Reasoning;
use async_trait::async_trait;
use reqwest::Client;

/// A provider-agnostic LLM request.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// Model identifier (e.g. `"claude-sonnet-4-5-20250929"`).
    pub model: String,

    /// System instruction, sent separately from the user turn.
    pub system_prompt: String,

    /// The user prompt text.
    pub prompt: String,

    /// Token limits and extended-thinking settings.
    pub config: LlmConfig,
}

/// A normalized LLM response.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Concatenation of all plain-text content.
    pub text: String,

    /// Reasoning trace recovered from the response, if any.
    pub reasoning: Reasoning,

    /// Provider-specific metadata (token usage, model, id), logged by the generator.
    pub metadata: Option<serde_json::Value>,
}

/// Abstraction over LLM providers.
///
/// This trait is object-safe and designed to be used as `Arc<dyn Backend>`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Execute a single non-streaming completion.
    async fn complete(
        &self,
        client: &Client,
        base_url: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse>;

    /// Human-readable name for logging and diagnostics.
    fn name(&self) -> &'static str;
}
