use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::AppState;
use crate::error::StoryError;
use crate::fallback::mock_story;
use crate::story::ViralStory;

/// Response header naming where the story came from: `ai` or `fallback`.
pub const STORY_SOURCE_HEADER: &str = "x-story-source";

#[derive(Debug, Deserialize)]
pub struct GenerateStoryRequest {
    pub topic: String,
    /// Accepted but not yet used by generation.
    pub platform: String,
}

#[derive(Serialize)]
struct StatusResponse {
    message: &'static str,
}

async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Viral Story Generator API is running",
    })
}

/// Always answers 200 with a story; generation failures and overruns of the
/// generation deadline serve the fallback.
async fn generate_story(
    State(state): State<AppState>,
    Json(request): Json<GenerateStoryRequest>,
) -> ([(&'static str, &'static str); 1], Json<ViralStory>) {
    let deadline = state.generation_timeout;
    let result = tokio::time::timeout(deadline, state.generator.generate(&request.topic))
        .await
        .unwrap_or_else(|_| {
            Err(StoryError::Timeout {
                secs: deadline.as_secs(),
            })
        });

    match result {
        Ok(story) => {
            info!(topic = %request.topic, platform = %request.platform, "Serving generated story");
            ([(STORY_SOURCE_HEADER, "ai")], Json(story))
        }
        Err(err) => {
            warn!(
                error = %err,
                category = %err.category(),
                topic = %request.topic,
                "AI generation unavailable, serving fallback story"
            );
            ([(STORY_SOURCE_HEADER, "fallback")], Json(mock_story()))
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/api/generate-story", post(generate_story))
}
