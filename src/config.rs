//! Generation settings.
//!
//! [`GeneratorConfig`] is an explicit value handed to
//! [`StoryGenerator`](crate::generator::StoryGenerator). The API credential
//! is optional here and only checked when a story is requested, so a
//! process without a key still starts and serves fallback stories.

use crate::extract::ExtractionMode;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Per-request LLM settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    /// Maximum tokens to generate, reasoning included.
    pub max_tokens: u32,

    /// Extended-thinking token budget. `None` disables extended thinking.
    pub thinking_budget: Option<u32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            max_tokens: 4096,
            thinking_budget: Some(2048),
        }
    }
}

impl LlmConfig {
    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = tokens;
        self
    }

    pub fn with_thinking_budget(mut self, budget: Option<u32>) -> Self {
        self.thinking_budget = budget;
        self
    }
}

/// Everything the story generator needs from its environment.
#[derive(Clone)]
pub struct GeneratorConfig {
    /// Provider credential. `None` disables the AI path.
    pub api_key: Option<String>,
    /// Provider base URL, without the `/v1/messages` suffix.
    pub base_url: String,
    pub model: String,
    pub llm: LlmConfig,
    /// Outbound request timeout.
    pub timeout: Duration,
    pub extraction: ExtractionMode,
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("llm", &self.llm)
            .field("timeout", &self.timeout)
            .field("extraction", &self.extraction)
            .finish()
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            llm: LlmConfig::default(),
            timeout: Duration::from_secs(60),
            extraction: ExtractionMode::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                      |
    /// |-------------------------|------------------------------|
    /// | `ANTHROPIC_API_KEY`     | unset (AI path disabled)     |
    /// | `ANTHROPIC_BASE_URL`    | `https://api.anthropic.com`  |
    /// | `STORY_MODEL`           | `claude-sonnet-4-5-20250929` |
    /// | `STORY_MAX_TOKENS`      | `4096`                       |
    /// | `STORY_THINKING_BUDGET` | `2048` (`0` disables)        |
    /// | `STORY_TIMEOUT_SECS`    | `60`                         |
    /// | `STORY_EXTRACTION`      | `span`                       |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading from an arbitrary source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let set = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let budget: u32 = parse_or(
            "STORY_THINKING_BUDGET",
            set("STORY_THINKING_BUDGET"),
            defaults.llm.thinking_budget.unwrap_or(0),
        );

        Self {
            api_key: set(API_KEY_VAR),
            base_url: set("ANTHROPIC_BASE_URL").unwrap_or(defaults.base_url),
            model: set("STORY_MODEL").unwrap_or(defaults.model),
            llm: LlmConfig {
                max_tokens: parse_or("STORY_MAX_TOKENS", set("STORY_MAX_TOKENS"), defaults.llm.max_tokens),
                thinking_budget: (budget > 0).then_some(budget),
            },
            timeout: Duration::from_secs(parse_or(
                "STORY_TIMEOUT_SECS",
                set("STORY_TIMEOUT_SECS"),
                defaults.timeout.as_secs(),
            )),
            extraction: parse_or("STORY_EXTRACTION", set("STORY_EXTRACTION"), defaults.extraction),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_llm(mut self, llm: LlmConfig) -> Self {
        self.llm = llm;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_extraction(mut self, mode: ExtractionMode) -> Self {
        self.extraction = mode;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Ignoring unparseable setting, using default");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_llm_config_defaults() {
        let config = LlmConfig::default();
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.thinking_budget, Some(2048));
    }

    #[test]
    fn test_llm_config_builder() {
        let config = LlmConfig::default()
            .with_max_tokens(8000)
            .with_thinking_budget(None);
        assert_eq!(config.max_tokens, 8000);
        assert!(config.thinking_budget.is_none());
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = GeneratorConfig::from_lookup(lookup(&[]));
        assert!(!config.has_api_key());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.llm, LlmConfig::default());
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.extraction, ExtractionMode::Span);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = GeneratorConfig::from_lookup(lookup(&[
            ("ANTHROPIC_API_KEY", "sk-ant-test"),
            ("ANTHROPIC_BASE_URL", "http://localhost:9999"),
            ("STORY_MODEL", "claude-test"),
            ("STORY_MAX_TOKENS", "1024"),
            ("STORY_THINKING_BUDGET", "0"),
            ("STORY_TIMEOUT_SECS", "5"),
            ("STORY_EXTRACTION", "balanced"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("sk-ant-test"));
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.model, "claude-test");
        assert_eq!(config.llm.max_tokens, 1024);
        assert_eq!(config.llm.thinking_budget, None);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.extraction, ExtractionMode::Balanced);
    }

    #[test]
    fn test_blank_key_is_unset_and_bad_numbers_default() {
        let config = GeneratorConfig::from_lookup(lookup(&[
            ("ANTHROPIC_API_KEY", "   "),
            ("STORY_MAX_TOKENS", "lots"),
            ("STORY_EXTRACTION", "greedy"),
        ]));
        assert!(!config.has_api_key());
        assert_eq!(config.llm.max_tokens, 4096);
        assert_eq!(config.extraction, ExtractionMode::Span);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GeneratorConfig::default().with_api_key("sk-ant-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-ant-secret"));
        assert!(debug.contains("***"));
    }
}
