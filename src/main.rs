use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use insightflow::agents::InsightAgent;
use insightflow::llm::provider::{LLMProviderConfig, LLM};
use insightflow::{config::Config, routes::create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "insightflow=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    // Build the model client once; it is shared across requests.
    let api_key = match config.llm.active_api_key() {
        Some(key) => key.to_string(),
        None => {
            warn!(
                provider = %config.llm.provider,
                "No API key configured; model invocations will fail"
            );
            String::new()
        }
    };

    let llm = LLM::new(LLMProviderConfig {
        provider: config.llm.provider,
        api_key,
    });
    let agent = Arc::new(InsightAgent::new(llm, &config.llm));

    // Create shared state
    let state = AppState {
        config: config.clone(),
        agent,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
