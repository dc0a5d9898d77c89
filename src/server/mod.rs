//! HTTP surface: `GET /` and `POST /api/generate-story`.
//!
//! [`build_app_router`] is shared by the binary and the integration tests
//! so both run the same middleware stack.

pub mod config;
pub mod routes;

pub use config::ServerConfig;
pub use routes::{GenerateStoryRequest, STORY_SOURCE_HEADER};

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::generator::StoryGenerator;

/// Extra time the outer timeout layer allows past the generation deadline,
/// so the handler always gets to answer with the fallback itself.
pub const TIMEOUT_GRACE: Duration = Duration::from_secs(5);

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<StoryGenerator>,
    /// Deadline for one `generate` call; set from
    /// [`ServerConfig::request_timeout_secs`] by [`build_app_router`].
    pub generation_timeout: Duration,
}

impl AppState {
    pub fn new(generator: StoryGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
            generation_timeout: Duration::from_secs(ServerConfig::default().request_timeout_secs),
        }
    }
}

/// Build the full application [`Router`] with all middleware layers.
///
/// Layers, innermost first: request timeout, request/response tracing, CORS.
/// Story generation is bounded by `request_timeout_secs` inside the handler;
/// the timeout layer fires [`TIMEOUT_GRACE`] later and only guards the
/// remaining request handling.
pub fn build_app_router(mut state: AppState, config: &ServerConfig) -> Result<Router> {
    let cors = build_cors_layer(config)?;
    let deadline = Duration::from_secs(config.request_timeout_secs);
    state.generation_timeout = deadline;

    Ok(routes::router()
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            deadline + TIMEOUT_GRACE,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state))
}

/// Build the CORS layer from the configured origins.
pub fn build_cors_layer(config: &ServerConfig) -> Result<CorsLayer> {
    let origins = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_cors_origin_is_an_error() {
        let config = ServerConfig {
            cors_origins: vec!["http://ok.example".into(), "bad\norigin".into()],
            ..ServerConfig::default()
        };
        let err = build_cors_layer(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid CORS origin"));
    }
}
