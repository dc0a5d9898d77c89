//! Backend for the hosted Anthropic Messages API.
//!
//! Endpoint: `{base_url}/v1/messages`, with `x-api-key` authentication and
//! optional extended thinking.

use super::{Backend, LlmRequest, LlmResponse};
use crate::error::Result;
use crate::reasoning;
use crate::StoryError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error, instrument};

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Backend for the Anthropic Messages API.
///
/// # Example
///
/// ```
/// use viral_story::backend::AnthropicBackend;
///
/// let backend = AnthropicBackend::new("sk-ant-...");
/// ```
#[derive(Clone)]
pub struct AnthropicBackend {
    api_key: String,
}

impl std::fmt::Debug for AnthropicBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let masked = if self.api_key.chars().count() > 6 {
            format!("{}***", self.api_key.chars().take(6).collect::<String>())
        } else {
            "***".to_string()
        };
        f.debug_struct("AnthropicBackend")
            .field("api_key", &masked)
            .finish()
    }
}

impl AnthropicBackend {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Build the request body for `/v1/messages`.
    pub(crate) fn build_body(request: &LlmRequest) -> Value {
        let mut body = json!({
            "model": request.model,
            "max_tokens": request.config.max_tokens,
            "messages": [{"role": "user", "content": request.prompt}],
        });

        if !request.system_prompt.is_empty() {
            body["system"] = json!(request.system_prompt);
        }

        if let Some(budget) = request.config.thinking_budget {
            body["thinking"] = json!({"type": "enabled", "budget_tokens": budget});
        }

        body
    }

    /// Extract usage metadata from a Messages API response.
    fn extract_metadata(json_resp: &Value) -> Option<Value> {
        let mut meta = serde_json::Map::new();
        for key in ["id", "model", "stop_reason", "usage"] {
            if let Some(v) = json_resp.get(key) {
                meta.insert(key.into(), v.clone());
            }
        }
        if meta.is_empty() {
            None
        } else {
            Some(Value::Object(meta))
        }
    }
}

#[async_trait]
impl Backend for AnthropicBackend {
    #[instrument(skip(self, client, request), fields(model = %request.model))]
    async fn complete(
        &self,
        client: &Client,
        base_url: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse> {
        let url = format!("{}/v1/messages", base_url.trim_end_matches('/'));
        let body = Self::build_body(request);
        debug!(%url, "Sending request to Anthropic API");

        let resp = client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send request to Anthropic API");
                StoryError::Request(e)
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            error!(status, body = %text, "Anthropic API returned error");
            return Err(StoryError::HttpError { status, body: text });
        }

        let json_resp: Value = resp.json().await?;
        let (text, reasoning) = reasoning::resolve(&json_resp);
        debug!(
            text_len = text.len(),
            has_reasoning = !reasoning.is_absent(),
            "Received response from Anthropic"
        );

        Ok(LlmResponse {
            text,
            reasoning,
            metadata: Self::extract_metadata(&json_resp),
        })
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}
