//! Trending Radar API Server
//!
//! REST endpoints behind the dashboard panels.

use std::{env, net::SocketAddr, sync::Arc};

use axum::{routing::get, Router};
use coingecko::{CoinGeckoClient, CoinGeckoConfig};
use radar_db::KeyValueStore;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod error;
mod routes;

/// Application state shared across handlers
pub struct AppState {
    pub store: Arc<dyn KeyValueStore>,
    pub coingecko: CoinGeckoClient,
    /// Serializes watchlist read-modify-write cycles
    pub watchlist_lock: Mutex<()>,
}

impl AppState {
    pub fn new(store: Arc<dyn KeyValueStore>, coingecko: CoinGeckoClient) -> Self {
        Self {
            store,
            coingecko,
            watchlist_lock: Mutex::new(()),
        }
    }
}

mod defaults {
    pub const API_PORT: &str = "8080";
    pub const API_HOST: &str = "0.0.0.0";
}

/// Build the router with all routes and middleware
pub fn app(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root endpoint with API info
        .route("/", get(root))
        // Health check
        .route("/health", get(health_check))
        // API routes
        .nest("/api", routes::api_routes())
        // State and middleware
        .with_state(state)
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Trending Radar API Server...");

    let store = radar_db::initialize_store().await?;
    let coingecko = CoinGeckoClient::new(CoinGeckoConfig::from_env()?);
    tracing::info!("Proxying CoinGecko at {}", coingecko.base_url());

    let state = Arc::new(AppState::new(store, coingecko));

    let port = env::var("API_PORT")
        .unwrap_or_else(|_| defaults::API_PORT.to_string())
        .parse::<u16>()?;

    let host = env::var("API_HOST").unwrap_or_else(|_| defaults::API_HOST.to_string());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

/// Root endpoint listing the routes
async fn root() -> axum::response::Html<&'static str> {
    axum::response::Html(
        r#"<!DOCTYPE html>
<title>Crypto Trending Radar</title>
<h1>Crypto Trending Radar</h1>
<p>Market data from CoinGecko.</p>
<ul>
<li><a href="/api/markets">/api/markets</a> ?sort=score|volume|mcap&amp;limit=</li>
<li><a href="/api/markets/exploding">/api/markets/exploding</a></li>
<li><a href="/api/markets/focus">/api/markets/focus</a></li>
<li>/api/search?q=&amp;limit=</li>
<li><a href="/api/trending">/api/trending</a></li>
<li><a href="/api/sectors">/api/sectors</a>, /api/sectors/:id</li>
<li><a href="/api/watchlist">/api/watchlist</a>, POST|DELETE /api/watchlist/:id</li>
<li><a href="/api/notes">/api/notes</a>, PUT to save</li>
<li><a href="/api/status">/api/status</a></li>
</ul>
"#,
    )
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use radar_db::MemoryStore;

    use super::test_support::{send, state};

    #[tokio::test]
    async fn test_health_check() {
        let (status, _) = send(state(Arc::new(MemoryStore::new())), "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_root_lists_routes() {
        let (status, _) = send(state(Arc::new(MemoryStore::new())), "GET", "/", None).await;

        assert_eq!(status, StatusCode::OK);
    }
}
