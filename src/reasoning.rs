//! Locating the model's reasoning trace in a provider response.
//!
//! Providers surface reasoning in different places: a dedicated
//! `thinking` content block, a top-level field, or `<thinking>` tags
//! inlined into ordinary text. [`resolve`] inspects the raw response body
//! once and returns the concatenated text plus a [`Reasoning`] tag.

use serde_json::Value;

/// Where (and whether) a reasoning trace was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reasoning {
    /// A dedicated top-level reasoning field on the response.
    Structured(String),
    /// Reasoning carried inside the content: a thinking block or inline tags.
    Embedded(String),
    Absent,
}

impl Reasoning {
    /// Build a variant, treating blank text as [`Reasoning::Absent`].
    fn non_blank(text: &str, wrap: fn(String) -> Reasoning) -> Reasoning {
        let text = text.trim();
        if text.is_empty() {
            Reasoning::Absent
        } else {
            wrap(text.to_string())
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Reasoning::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Reasoning::Structured(s) | Reasoning::Embedded(s) => Some(s),
            Reasoning::Absent => None,
        }
    }

    /// The trace text, or an empty string when absent.
    pub fn into_text(self) -> String {
        match self {
            Reasoning::Structured(s) | Reasoning::Embedded(s) => s,
            Reasoning::Absent => String::new(),
        }
    }
}

/// Split a provider response body into `(text, reasoning)`.
///
/// `text` is the concatenation of every `text` content block. Reasoning is
/// taken from, in order of preference: the last `thinking` content block,
/// a top-level `thinking` field, or inline `<thinking>`/`<think>` tags in
/// the text (which are then removed from the returned text).
pub fn resolve(body: &Value) -> (String, Reasoning) {
    let mut text = String::new();
    let mut reasoning = Reasoning::Absent;

    if let Some(Value::String(s)) = body.get("thinking") {
        reasoning = Reasoning::non_blank(s, Reasoning::Structured);
    } else if let Some(s) = body
        .get("thinking")
        .and_then(|t| t.get("content"))
        .and_then(Value::as_str)
    {
        reasoning = Reasoning::non_blank(s, Reasoning::Structured);
    }

    if let Some(blocks) = body.get("content").and_then(Value::as_array) {
        for block in blocks {
            if let Some(t) = block.get("text").and_then(Value::as_str) {
                text.push_str(t);
            } else if block.get("type").and_then(Value::as_str) == Some("thinking") {
                let trace = block
                    .get("thinking")
                    .or_else(|| block.get("content"))
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                let found = Reasoning::non_blank(trace, Reasoning::Embedded);
                if !found.is_absent() {
                    reasoning = found;
                }
            }
        }
    }

    if reasoning.is_absent() {
        if let Some((inline, cleaned)) = extract_inline_thinking(&text) {
            reasoning = Reasoning::non_blank(&inline, Reasoning::Embedded);
            text = cleaned;
        }
    }

    (text, reasoning)
}

/// Pull the first `<thinking>…</thinking>` or `<think>…</think>` block out of `text`.
///
/// Returns `(inner, text_without_block)`, or `None` if no complete block exists.
fn extract_inline_thinking(text: &str) -> Option<(String, String)> {
    [("<thinking>", "</thinking>"), ("<think>", "</think>")]
        .into_iter()
        .find_map(|(open, close)| {
            let start = text.find(open)?;
            let end = start + text[start..].find(close)?;
            let inner = text[start + open.len()..end].to_string();
            let mut cleaned = String::with_capacity(text.len());
            cleaned.push_str(&text[..start]);
            cleaned.push_str(&text[end + close.len()..]);
            Some((inner, cleaned))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_thinking_block_and_text_blocks() {
        let body = json!({
            "content": [
                {"type": "thinking", "thinking": "Core emotion: curiosity", "signature": "sig"},
                {"type": "text", "text": "{\"title\": "},
                {"type": "text", "text": "\"X\"}"}
            ]
        });
        let (text, reasoning) = resolve(&body);
        assert_eq!(text, r#"{"title": "X"}"#);
        assert_eq!(
            reasoning,
            Reasoning::Embedded("Core emotion: curiosity".into())
        );
    }

    #[test]
    fn test_thinking_block_with_content_field() {
        let body = json!({
            "content": [{"type": "thinking", "content": "plan"}, {"type": "text", "text": "{}"}]
        });
        assert_eq!(resolve(&body).1, Reasoning::Embedded("plan".into()));
    }

    #[test]
    fn test_top_level_field() {
        let body = json!({"thinking": "fear sells", "content": [{"type": "text", "text": "{}"}]});
        assert_eq!(resolve(&body).1, Reasoning::Structured("fear sells".into()));

        let body = json!({"thinking": {"content": "nested"}, "content": []});
        assert_eq!(resolve(&body).1, Reasoning::Structured("nested".into()));
    }

    #[test]
    fn test_content_block_overrides_top_level() {
        let body = json!({
            "thinking": "top",
            "content": [{"type": "thinking", "thinking": "block"}]
        });
        assert_eq!(resolve(&body).1, Reasoning::Embedded("block".into()));
    }

    #[test]
    fn test_blank_block_keeps_top_level() {
        let body = json!({
            "thinking": "top",
            "content": [{"type": "thinking", "thinking": "   "}]
        });
        assert_eq!(resolve(&body).1, Reasoning::Structured("top".into()));
    }

    #[test]
    fn test_inline_tags_are_stripped() {
        let body = json!({
            "content": [{"type": "text", "text": "<thinking>hook fast</thinking>\n{\"a\": 1}"}]
        });
        let (text, reasoning) = resolve(&body);
        assert_eq!(text, "\n{\"a\": 1}");
        assert_eq!(reasoning, Reasoning::Embedded("hook fast".into()));
    }

    #[test]
    fn test_unclosed_inline_tag_is_left_alone() {
        let body = json!({"content": [{"type": "text", "text": "<think>never closed {}"}]});
        let (text, reasoning) = resolve(&body);
        assert_eq!(text, "<think>never closed {}");
        assert!(reasoning.is_absent());
    }

    #[test]
    fn test_absent() {
        let (text, reasoning) = resolve(&json!({"content": [{"type": "text", "text": "{}"}]}));
        assert_eq!(text, "{}");
        assert_eq!(reasoning, Reasoning::Absent);
        assert_eq!(reasoning.as_str(), None);
        assert_eq!(reasoning.into_text(), "");
    }

    #[test]
    fn test_missing_content() {
        let (text, reasoning) = resolve(&json!({}));
        assert!(text.is_empty());
        assert!(reasoning.is_absent());
    }
}
