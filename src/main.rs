use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use gem_concierge::config::Config;
use gem_concierge::routes;
use gem_concierge::services::agent::AgentClient;
use gem_concierge::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let agent = AgentClient::new(&config)?;

    // The runtime may come up after us; an existing global session also works.
    if let Err(err) = agent.ensure_session().await {
        tracing::warn!(%err, "could not create runtime session at startup");
    }

    let cors = build_cors(&config);
    let state = Arc::new(AppState::new(agent, config.agent_session_id.clone()));
    let app = routes::create_router().with_state(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("gem concierge listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_cors(config: &Config) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::very_permissive();
    }
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
