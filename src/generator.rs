//! The story generation orchestrator.
//!
//! [`StoryGenerator::generate`] makes one provider round-trip, isolates the
//! JSON in the reply, and hands it to the story builder. Every failure is
//! returned as a [`StoryError`]; deciding what to do about it is the
//! caller's job.

use crate::backend::{AnthropicBackend, Backend, LlmRequest};
use crate::builder::build_story;
use crate::config::{GeneratorConfig, API_KEY_VAR};
use crate::error::{Result, StoryError};
use crate::extract::{extract_json_with, preview};
use crate::prompt::{user_prompt, SYSTEM_PROMPT};
use crate::story::ViralStory;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Characters of raw model text kept in parse-error diagnostics.
pub const PREVIEW_CHARS: usize = 500;

/// Generates [`ViralStory`] values through an LLM backend.
///
/// Cheap to share behind an `Arc`; holds no per-request state.
pub struct StoryGenerator {
    config: GeneratorConfig,
    client: Client,
    /// `None` when no credential is configured.
    backend: Option<Arc<dyn Backend>>,
}

impl std::fmt::Debug for StoryGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryGenerator")
            .field("config", &self.config)
            .field("backend", &self.backend.as_ref().map(|b| b.name()))
            .finish()
    }
}

impl StoryGenerator {
    /// Create a generator that talks to the Anthropic API.
    ///
    /// A missing credential is not an error here; it is reported by
    /// [`generate`](Self::generate).
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let backend = config
            .api_key
            .as_deref()
            .map(|key| Arc::new(AnthropicBackend::new(key)) as Arc<dyn Backend>);
        Self::build(config, backend)
    }

    /// Create a generator with a custom backend.
    ///
    /// The credential check in [`generate`](Self::generate) still applies.
    pub fn with_backend(config: GeneratorConfig, backend: Arc<dyn Backend>) -> Result<Self> {
        Self::build(config, Some(backend))
    }

    fn build(config: GeneratorConfig, backend: Option<Arc<dyn Backend>>) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            config,
            client,
            backend,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a story for `topic`.
    ///
    /// # Errors
    ///
    /// - [`StoryError::MissingCredential`] before any network call when no key is set.
    /// - [`StoryError::ResponseFormat`] when the reply holds no parseable JSON.
    /// - [`StoryError::NotAnObject`] / [`StoryError::InvalidScene`] from the builder.
    /// - Transport and HTTP errors from the backend.
    #[instrument(skip(self), fields(model = %self.config.model))]
    pub async fn generate(&self, topic: &str) -> Result<ViralStory> {
        let backend = match (&self.config.api_key, &self.backend) {
            (Some(_), Some(backend)) => backend,
            _ => return Err(StoryError::MissingCredential { var: API_KEY_VAR }),
        };

        let request = LlmRequest {
            model: self.config.model.clone(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            prompt: user_prompt(topic),
            config: self.config.llm.clone(),
        };

        debug!(backend = backend.name(), "Requesting story");
        let response = backend
            .complete(&self.client, &self.config.base_url, &request)
            .await?;

        let cleaned = extract_json_with(&response.text, self.config.extraction);
        let parsed: Value =
            serde_json::from_str(&cleaned).map_err(|e| StoryError::ResponseFormat {
                reason: e.to_string(),
                preview: preview(&response.text, PREVIEW_CHARS),
            })?;

        let usage = response
            .metadata
            .as_ref()
            .and_then(|meta| meta.get("usage"))
            .cloned()
            .unwrap_or(Value::Null);

        let story = build_story(topic, &parsed, &response.reasoning.into_text())?;
        info!(
            scenes = story.scenes.len(),
            total_duration = story.total_duration(),
            clickbait_score = story.clickbait_score,
            %usage,
            "Story generated"
        );
        Ok(story)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockBackend, MockReply};
    use crate::builder::PLACEHOLDER_TRACE;
    use crate::error::ErrorCategory;
    use crate::extract::ExtractionMode;
    use crate::reasoning::Reasoning;

    fn keyed() -> GeneratorConfig {
        GeneratorConfig::default().with_api_key("sk-ant-test")
    }

    fn generator(config: GeneratorConfig, mock: &Arc<MockBackend>) -> StoryGenerator {
        StoryGenerator::with_backend(config, mock.clone()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_credential_skips_network() {
        let mock = Arc::new(MockBackend::fixed("{}"));
        let gen = generator(GeneratorConfig::default(), &mock);
        let err = gen.generate("ghost town").await.unwrap_err();
        assert!(matches!(err, StoryError::MissingCredential { var: "ANTHROPIC_API_KEY" }));
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_new_without_key_reports_missing_credential() {
        let gen = StoryGenerator::new(GeneratorConfig::default()).unwrap();
        let err = gen.generate("ghost town").await.unwrap_err();
        assert!(matches!(err, StoryError::MissingCredential { .. }));
    }

    #[tokio::test]
    async fn test_fenced_reply_builds_defaulted_story() {
        let mock = Arc::new(MockBackend::fixed("```json\n{\"title\":\"X\",\"scenes\":[]}\n```"));
        let gen = generator(keyed(), &mock);
        let story = gen.generate("ghost town").await.unwrap();
        assert_eq!(story.title, "X");
        assert_eq!(story.topic, "ghost town");
        assert!(story.scenes.is_empty());
        assert_eq!(story.target_audience, "General audience");
        assert_eq!(story.clickbait_score, 85);
        assert_eq!(story.thinking_trace, PLACEHOLDER_TRACE);
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_provider_reasoning_fills_trace() {
        let mock = Arc::new(MockBackend::new(vec![MockReply::with_reasoning(
            "Here it is: {\"title\": \"Y\"}",
            Reasoning::Embedded("Fear of the unknown".into()),
        )]));
        let gen = generator(keyed(), &mock);
        let story = gen.generate("deep sea").await.unwrap();
        assert_eq!(story.title, "Y");
        assert_eq!(story.thinking_trace, "Fear of the unknown");
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_response_format_error() {
        let long = format!("I cannot comply. {}", "x".repeat(800));
        let mock = Arc::new(MockBackend::fixed(long));
        let gen = generator(keyed(), &mock);
        let err = gen.generate("t").await.unwrap_err();
        match err {
            StoryError::ResponseFormat { ref preview, .. } => {
                assert_eq!(preview.chars().count(), PREVIEW_CHARS);
                assert!(preview.starts_with("I cannot comply."));
            }
            ref other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[tokio::test]
    async fn test_invalid_scene_propagates() {
        let mock = Arc::new(MockBackend::fixed(
            r#"{"scenes": [{"id": 1, "visual_prompts": "dark forest"}]}"#,
        ));
        let gen = generator(keyed(), &mock);
        let err = gen.generate("t").await.unwrap_err();
        assert!(matches!(err, StoryError::InvalidScene { ref scene_id } if scene_id == "1"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_operation_error() {
        let mock = Arc::new(MockBackend::failing(529, "overloaded"));
        let gen = generator(keyed(), &mock);
        let err = gen.generate("t").await.unwrap_err();
        assert!(matches!(err, StoryError::HttpError { status: 529, .. }));
        assert_eq!(err.category(), ErrorCategory::Operation);
    }

    #[tokio::test]
    async fn test_balanced_extraction_mode() {
        let reply = r#"{"title": "Z"} (note: scores above 90 are rare :})"#;

        let span = generator(keyed(), &Arc::new(MockBackend::fixed(reply)));
        assert!(matches!(
            span.generate("t").await,
            Err(StoryError::ResponseFormat { .. })
        ));

        let balanced = generator(
            keyed().with_extraction(ExtractionMode::Balanced),
            &Arc::new(MockBackend::fixed(reply)),
        );
        assert_eq!(balanced.generate("t").await.unwrap().title, "Z");
    }
}
