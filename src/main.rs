use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use viral_story::server::{build_app_router, AppState, ServerConfig};
use viral_story::{GeneratorConfig, StoryGenerator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "viral_story=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server_config = ServerConfig::from_env()?;
    let generator_config = GeneratorConfig::from_env();

    if generator_config.has_api_key() {
        tracing::info!(model = %generator_config.model, "AI generation enabled");
    } else {
        tracing::warn!(
            "{} is not set; every request will be served the fallback story",
            viral_story::config::API_KEY_VAR
        );
    }

    let generator = StoryGenerator::new(generator_config).context("Failed to build HTTP client")?;
    let app = build_app_router(AppState::new(generator), &server_config)?;

    let addr = server_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Starting server on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
