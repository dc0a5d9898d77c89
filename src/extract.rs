//! Isolating the JSON object inside free-form model output.
//!
//! Models wrap their JSON in prose, markdown fences, or both. The default
//! [`ExtractionMode::Span`] takes everything from the first `{` to the last
//! `}`; it assumes one top-level object and no stray braces in the prose
//! around it. [`ExtractionMode::Balanced`] stops at the brace that closes
//! the first `{`, which survives trailing prose containing `}` but changes
//! the result on inputs with several objects, so it is opt-in.

use std::str::FromStr;

/// How [`extract_json_with`] picks the object span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractionMode {
    /// First `{` through last `}`.
    #[default]
    Span,
    /// First `{` through its string-aware matching `}`.
    Balanced,
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "span" => Ok(ExtractionMode::Span),
            "balanced" => Ok(ExtractionMode::Balanced),
            other => Err(format!("unknown extraction mode '{other}'")),
        }
    }
}

/// Extract the substring most likely to be the model's JSON object.
///
/// Never fails: with no usable braces the trimmed input comes back as-is.
/// The result is not validated as JSON.
///
/// # Examples
///
/// ```
/// use viral_story::extract::extract_json;
///
/// let raw = "Here you go:\n```json\n{\"title\": \"X\"}\n```\nEnjoy!";
/// assert_eq!(extract_json(raw), "{\"title\": \"X\"}");
/// assert_eq!(extract_json("  no json here  "), "no json here");
/// ```
pub fn extract_json(raw_text: &str) -> String {
    extract_json_with(raw_text, ExtractionMode::Span)
}

/// [`extract_json`] with an explicit [`ExtractionMode`].
pub fn extract_json_with(raw_text: &str, mode: ExtractionMode) -> String {
    let trimmed = raw_text.trim();
    let candidate = match mode {
        ExtractionMode::Span => object_span(trimmed),
        ExtractionMode::Balanced => balanced_object(trimmed).unwrap_or_else(|| object_span(trimmed)),
    };
    strip_fences(candidate).trim().to_string()
}

/// First `{` through last `}`, or the whole text if they don't bracket anything.
fn object_span(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// First `{` through the `}` that closes it, ignoring braces inside strings.
fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Remove a leading fence line (`` ``` `` with an optional language tag)
/// and a trailing `` ``` `` line.
pub fn strip_fences(text: &str) -> &str {
    let mut out = text;

    if let Some(newline) = out.find('\n') {
        if is_opening_fence(&out[..newline]) {
            out = &out[newline + 1..];
        }
    }

    if let Some(newline) = out.rfind('\n') {
        if out[newline + 1..].trim() == "```" {
            out = &out[..newline];
        }
    }

    out
}

fn is_opening_fence(line: &str) -> bool {
    let line = line.trim_end();
    match line.strip_prefix("```") {
        Some(tag) => tag.chars().all(|c| c.is_ascii_alphanumeric()),
        None => false,
    }
}

/// Truncate to at most `max_chars` characters, on a char boundary.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
