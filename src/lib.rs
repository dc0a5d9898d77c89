//! # Viral Story
//!
//! Turns a topic into a structured short-form video script (title, audience,
//! scenes with voiceover and image prompts, clickbait score, and the model's
//! reasoning) by asking a hosted LLM, then parsing its reply defensively.
//!
//! ## Core Concepts
//!
//! - **[`StoryGenerator`]**: one provider round-trip per story; returns
//!   `Result<ViralStory, StoryError>`.
//! - **[`extract_json`]**: isolates the JSON object in prose-wrapped or
//!   fenced model output.
//! - **[`build_story`]**: turns loosely-typed JSON into a [`ViralStory`],
//!   defaulting every missing field.
//! - **[`Backend`](backend::Backend)**: provider abstraction with an
//!   Anthropic implementation and a mock for tests.
//! - **[`server`]**: axum routes that always answer with a story, falling
//!   back to [`fallback::mock_story`] when generation fails.
//!
//! ## Quick Start
//!
//! ```no_run
//! use viral_story::{GeneratorConfig, StoryGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = StoryGenerator::new(GeneratorConfig::from_env())?;
//!     let story = generator.generate("abandoned subway station").await?;
//!     println!("{} ({} scenes)", story.title, story.scenes.len());
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod generator;
pub mod prompt;
pub mod reasoning;
pub mod server;
pub mod story;

pub use builder::build_story;
pub use config::{GeneratorConfig, LlmConfig};
pub use error::{ErrorCategory, Result, StoryError};
pub use extract::{extract_json, ExtractionMode};
pub use generator::StoryGenerator;
pub use reasoning::Reasoning;
pub use story::{Scene, Story, ViralStory, VisualPrompt};
