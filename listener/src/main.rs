use std::{env, sync::Arc, time::Duration};

use coingecko::{CoinGeckoClient, CoinGeckoConfig};
use error::AppError;
use radar_db::initialize_store;
use service::PollerService;
use tokio::{
    signal,
    time::{interval, MissedTickBehavior},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod error;
mod service;

mod defaults {
    pub const POLL_INTERVAL: &str = "30";
    pub const MARKETS_PER_PAGE: &str = "150";
    pub const CATEGORY_REFRESH_TICKS: &str = "10";
}

fn setting<T: std::str::FromStr>(name: &'static str, default: &str) -> Result<T, AppError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    value
        .parse::<T>()
        .map_err(|_| AppError::InvalidSetting { name, value })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "listener=info,coingecko=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Trending Radar market poller...");

    let store = initialize_store().await?;

    let poll_interval: u64 = setting("POLL_INTERVAL", defaults::POLL_INTERVAL)?;
    let per_page: u32 = setting("MARKETS_PER_PAGE", defaults::MARKETS_PER_PAGE)?;
    let category_every: u64 = setting("CATEGORY_REFRESH_TICKS", defaults::CATEGORY_REFRESH_TICKS)?;

    let client = CoinGeckoClient::new(CoinGeckoConfig::from_env()?);
    tracing::info!("Polling {} every {} seconds", client.base_url(), poll_interval);

    let mut poller = PollerService::new(client, Arc::clone(&store), per_page, category_every);

    let mut ticker = interval(Duration::from_secs(poll_interval.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(err) = poller.poll_once().await {
                    tracing::error!("Poll failed, keeping previous board: {}", err);
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping poller");
                break;
            }
        }
    }

    Ok(())
}
