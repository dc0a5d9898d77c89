//! The fixed story served when generation fails.
//!
//! Content is deliberately static so clients can be tested end-to-end
//! without a provider. The caller's topic and platform are not applied;
//! `topic` always carries [`FALLBACK_TOPIC`].

use crate::story::{Scene, ViralStory, VisualPrompt};

pub const FALLBACK_TITLE: &str = "The Hidden Bunker: What They Don't Want You to Know";
pub const FALLBACK_TOPIC: &str = "the provided topic";

const FALLBACK_TRACE: &str = "\
AI Reasoning Analysis:

Target Audience: Mystery enthusiasts and conspiracy theorists aged 18-45 who consume true crime \
and mystery content. This demographic responds strongly to hidden secrets and government cover-ups.

Psychological Trigger: CURIOSITY - The story uses the \"hidden truth\" pattern, which triggers \
intense curiosity. The progression from discovery to investigation to revelation creates a \
narrative arc that keeps viewers engaged.

Pacing Strategy:
- Second 5: Opens on a dramatic visual (the hidden bunker entrance) and a hook about authorities \
keeping secrets, establishing intrigue before viewers can drop off.
- Second 15: Reveals the discovered documents, layering mystery on the initial hook through the \
critical retention point.
- Second 30: Promises a revelation that \"changes everything\", building anticipation for a next \
part and encouraging viewers to watch to the end and engage.

Why This Will Go Viral:
1. The topic taps into universal curiosity about hidden secrets and cover-ups
2. The pacing creates several must-see moments that stop viewers scrolling away
3. The visual progression (forest, interior, document) forms a satisfying arc
4. The title promises exclusive information, triggering fear of missing out
5. The structure expands naturally into a series, encouraging follow-up engagement";

/// Build the fallback story.
pub fn mock_story() -> ViralStory {
    ViralStory {
        title: FALLBACK_TITLE.to_string(),
        topic: FALLBACK_TOPIC.to_string(),
        target_audience: "Mystery enthusiasts and conspiracy theorists".to_string(),
        scenes: vec![
            scene(
                1,
                "A mysterious bunker discovered deep in the woods. Local authorities are keeping \
                 it secret, but we found the entrance.",
                "A dark, overgrown forest with a hidden concrete entrance partially covered by vines",
                "Low angle, dramatic",
                "Mysterious, ominous",
                5,
            ),
            scene(
                2,
                "Inside, we found documents dating back decades. The truth is more shocking than \
                 we imagined.",
                "Dimly lit bunker interior with old filing cabinets and scattered documents",
                "Medium shot, handheld",
                "Tense, investigative",
                7,
            ),
            scene(
                3,
                "The final revelation will change everything you thought you knew. This story \
                 can't be ignored.",
                "Close-up of a revealing document with dramatic lighting",
                "Extreme close-up",
                "Revelatory, shocking",
                4,
            ),
        ],
        clickbait_score: 95,
        thinking_trace: FALLBACK_TRACE.to_string(),
    }
}

fn scene(
    id: u32,
    text: &str,
    description: &str,
    camera_angle: &str,
    mood: &str,
    estimated_duration: u32,
) -> Scene {
    Scene {
        id,
        text_content: text.to_string(),
        visual_prompts: VisualPrompt {
            description: description.to_string(),
            camera_angle: camera_angle.to_string(),
            mood: mood.to_string(),
        },
        estimated_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_story_shape() {
        let story = mock_story();
        assert_eq!(story.title, FALLBACK_TITLE);
        assert_eq!(story.topic, FALLBACK_TOPIC);
        assert_eq!(story.clickbait_score, 95);
        assert_eq!(story.scenes.len(), 3);
        assert_eq!(
            story.scenes.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(story.total_duration(), 16);
        assert!(story.thinking_trace.starts_with("AI Reasoning Analysis:"));
    }

    #[test]
    fn test_mock_story_is_deterministic() {
        assert_eq!(mock_story(), mock_story());
    }
}
