//! Building a [`ViralStory`] from loosely-typed model JSON.
//!
//! Every field has a default, so partially filled model output still yields
//! a usable story. The one hard failure is a scene whose `visual_prompts`
//! is present but not an object.

use crate::error::{Result, StoryError};
use crate::story::{Scene, ViralStory, VisualPrompt};
use serde_json::{Map, Value};
use tracing::warn;

pub const DEFAULT_TITLE: &str = "Untitled Story";
pub const DEFAULT_AUDIENCE: &str = "General audience";
pub const DEFAULT_CLICKBAIT_SCORE: u32 = 85;
/// Substituted when neither the model JSON nor the provider supplied a trace.
pub const PLACEHOLDER_TRACE: &str = "AI reasoning: Analysis completed in thinking process. \
     Core emotion and pacing strategy determined.";
/// The opening scene should be shorter than this many seconds.
pub const HOOK_MAX_SECONDS: u32 = 5;

/// Build a story from parsed model output.
///
/// `topic` is used when the JSON has no `topic` of its own.
/// `thinking_fallback` is the provider-level reasoning trace, used when the
/// JSON has no non-blank `thinking_trace`.
///
/// # Errors
///
/// [`StoryError::NotAnObject`] if `parsed` is not a JSON object, and
/// [`StoryError::InvalidScene`] if a scene's `visual_prompts` is present but
/// not an object (`null` included).
pub fn build_story(topic: &str, parsed: &Value, thinking_fallback: &str) -> Result<ViralStory> {
    let data = parsed.as_object().ok_or(StoryError::NotAnObject {
        found: json_kind(parsed),
    })?;

    let entries = data
        .get("scenes")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    // Checked on the raw entry so a later invalid scene cannot hide it.
    let hook_duration = entries
        .first()
        .and_then(Value::as_object)
        .and_then(|scene| int_field(scene, "estimated_duration"));
    if let Some(duration) = hook_duration.filter(|d| *d >= HOOK_MAX_SECONDS) {
        warn!(
            estimated_duration = duration,
            "Scene 1 duration should be less than 5 seconds"
        );
    }

    let scenes = entries.iter().map(build_scene).collect::<Result<Vec<_>>>()?;

    Ok(ViralStory {
        title: str_field(data, "title").unwrap_or(DEFAULT_TITLE).to_string(),
        topic: str_field(data, "topic").unwrap_or(topic).to_string(),
        target_audience: str_field(data, "target_audience")
            .unwrap_or(DEFAULT_AUDIENCE)
            .to_string(),
        scenes,
        clickbait_score: int_field(data, "clickbait_score").unwrap_or(DEFAULT_CLICKBAIT_SCORE),
        thinking_trace: resolve_trace(data, thinking_fallback),
    })
}

fn build_scene(entry: &Value) -> Result<Scene> {
    let empty = Map::new();
    let data = entry.as_object().unwrap_or(&empty);

    let prompt = match data.get("visual_prompts") {
        None => VisualPrompt::default(),
        Some(Value::Object(vp)) => VisualPrompt {
            description: str_field(vp, "description").unwrap_or_default().to_string(),
            camera_angle: str_field(vp, "camera_angle").unwrap_or_default().to_string(),
            mood: str_field(vp, "mood").unwrap_or_default().to_string(),
        },
        Some(_) => {
            let scene_id = match data.get("id") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => "unknown".to_string(),
                Some(other) => other.to_string(),
            };
            return Err(StoryError::InvalidScene { scene_id });
        }
    };

    Ok(Scene {
        id: int_field(data, "id").unwrap_or(0),
        text_content: str_field(data, "text_content").unwrap_or_default().to_string(),
        visual_prompts: prompt,
        estimated_duration: int_field(data, "estimated_duration").unwrap_or(0),
    })
}

/// JSON trace, then provider trace, then the placeholder; blank counts as missing.
fn resolve_trace(data: &Map<String, Value>, fallback: &str) -> String {
    [str_field(data, "thinking_trace"), Some(fallback)]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or(PLACEHOLDER_TRACE)
        .to_string()
}

fn str_field<'a>(data: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    data.get(key).and_then(Value::as_str)
}

/// Read a non-negative integer, accepting integral floats and numeric strings.
fn int_field(data: &Map<String, Value>, key: &str) -> Option<u32> {
    match data.get(key)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
            .and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
