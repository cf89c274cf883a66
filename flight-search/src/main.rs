use std::net::SocketAddr;

use flight_search::search::{CompletionPolicy, SearchConfig};
use flight_search::skyscanner::{SkyscannerClient, SkyscannerConfig};
use flight_search::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Default listen address.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("flight_search=info,tower_http=info")),
        )
        .init();

    // Get credentials from environment
    let api_key = std::env::var("SKYSCANNER_API_KEY").unwrap_or_else(|_| {
        warn!("SKYSCANNER_API_KEY not set. API calls will fail.");
        String::new()
    });

    let mut client_config = SkyscannerConfig::new(api_key);
    if let Ok(host) = std::env::var("SKYSCANNER_API_HOST") {
        client_config = client_config.with_host(host);
    }
    if let Ok(base_url) = std::env::var("SKYSCANNER_BASE_URL") {
        client_config = client_config.with_base_url(base_url);
    }
    let client = SkyscannerClient::new(client_config)?;

    let completion = match std::env::var("FLIGHT_SEARCH_COMPLETION") {
        Ok(policy) => policy.parse::<CompletionPolicy>()?,
        Err(_) => CompletionPolicy::default(),
    };
    let search_config = SearchConfig::default().with_completion(completion);
    info!(
        max_attempts = search_config.max_attempts,
        poll_interval_ms = search_config.poll_interval_ms,
        poll_timeout_ms = search_config.poll_timeout_ms,
        ?completion,
        "search configured"
    );

    let app = create_router(AppState::new(client, search_config));

    let addr: SocketAddr = std::env::var("FLIGHT_SEARCH_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    info!("Flight search listening on http://{addr}");
    info!("  GET  /health        - Health check");
    info!("  POST /api/search    - Run a search");
    info!("  GET  /api/results   - Current results (?sort=price|duration|departure)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
