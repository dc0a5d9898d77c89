//! Story records shared by the builder, the fallback, and the HTTP layer.
//!
//! All records are plain values: built once per request, serialized into
//! the response, then dropped.

use serde::{Deserialize, Serialize};

/// Image-generation prompt attached to a single scene.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualPrompt {
    /// Cinematic scene description.
    pub description: String,
    pub camera_angle: String,
    pub mood: String,
}

/// One narrative beat: voiceover, image prompt, and a duration in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Expected to be sequential from 1, not enforced.
    pub id: u32,
    /// Voiceover text.
    pub text_content: String,
    pub visual_prompts: VisualPrompt,
    /// Seconds. The opening scene should stay under 5.
    pub estimated_duration: u32,
}

/// A story without the reasoning trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    pub topic: String,
    pub target_audience: String,
    pub scenes: Vec<Scene>,
    /// Model-reported rating, nominally 0-100.
    pub clickbait_score: u32,
}

/// A story together with the explanation of why it should perform well.
///
/// `thinking_trace` is never empty in values produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViralStory {
    pub title: String,
    pub topic: String,
    pub target_audience: String,
    pub scenes: Vec<Scene>,
    pub clickbait_score: u32,
    pub thinking_trace: String,
}

impl ViralStory {
    /// Total of all scene durations, in seconds.
    pub fn total_duration(&self) -> u32 {
        self.scenes.iter().map(|s| s.estimated_duration).sum()
    }
}

impl From<ViralStory> for Story {
    fn from(story: ViralStory) -> Self {
        Story {
            title: story.title,
            topic: story.topic,
            target_audience: story.target_audience,
            scenes: story.scenes,
            clickbait_score: story.clickbait_score,
        }
    }
}
