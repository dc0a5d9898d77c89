//! Instructions sent to the model.

/// Fixed system instruction: think first, then emit JSON.
pub const SYSTEM_PROMPT: &str = "\
You are an expert viral scriptwriter who works in two phases.

PHASE 1: THINKING
Analyze the topic. Identify the core emotion (fear, curiosity, or anger) and plan \
the pacing. Write this analysis out explicitly.

PHASE 2: GENERATION
Produce a single JSON object following the ViralStory schema.
- The hook (scene 1) must run for less than 5 seconds.
- Visual prompts are detailed, cinematic, in English, and optimized for image generation.
- Voiceover text is in English, simple and punchy (A2/B1 level), high energy, and \
speaks directly to the viewer.";

/// Per-topic user instruction carrying the output contract.
///
/// Quotes in `topic` are escaped so the topic cannot close the quoted string.
pub fn user_prompt(topic: &str) -> String {
    let topic = topic.trim().replace('"', "\\\"");
    format!(
        r#"Generate a viral story script for the topic: "{topic}"

Requirements:
- 3-5 scenes that build suspense and keep the viewer watching
- Scene 1 (the hook) lasts less than 5 seconds
- Every scene has:
  - Voiceover text in ENGLISH, YouTuber style: high energy, direct address ("you", "your"),
    short punchy A2/B1 sentences (e.g. "You won't believe this!", "Wait until you see...")
  - A detailed, cinematic visual prompt in English with description, camera_angle and mood
  - An estimated duration in seconds
- A clickbait score between 80 and 100
- An attention-grabbing English title

Return JSON with exactly these fields:
- title: string
- topic: the topic above
- target_audience: a specific demographic or psychographic
- scenes: array of objects with
  - id: sequential integer starting at 1
  - text_content: the voiceover text
  - visual_prompts: object with description, camera_angle, mood
  - estimated_duration: integer seconds (scene 1 must be < 5)
- clickbait_score: integer 0-100
- thinking_trace: a summary of your phase 1 analysis covering the core emotion, why the
  story will spread, the psychological triggers used, how the pacing prevents drop-off,
  and why it appeals to the target audience

CRITICAL:
- Output ONLY the JSON object. No markdown fences and no text outside the JSON.
- All voiceover and visual prompt text is in English.
- Scene 1 duration is less than 5 seconds."#
    )
}
