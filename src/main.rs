use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use profile_assistant::{config::Config, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "profile_assistant=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("reading configuration")?;
    let state = std::sync::Arc::new(AppState::from_config(&config));

    if !state.gateway.is_configured() {
        tracing::warn!("no Gemini API key set; the assistant will answer with the unavailable notice");
    }

    let _purger = state.sessions.spawn_purger(config.purge_interval);

    let app = routes::create_router(&config.static_dir)
        .with_state(state)
        .layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, model = %config.model, "profile assistant listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
