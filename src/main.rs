// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use price_history::application::history_service::HistoryService;
use price_history::application::price_provider::PriceProvider;
use price_history::infrastructure::coingecko::CoinGeckoProvider;
use price_history::infrastructure::coinpaprika::CoinPaprikaProvider;
use price_history::infrastructure::config::load_app_config;
use price_history::infrastructure::cryptocompare::CryptoCompareProvider;
use price_history::infrastructure::http_client::build_client;
use price_history::presentation::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;
    let client = build_client(&config.http)?;
    let currency = &config.providers.quote_currency;

    // Fallback chain, highest priority first
    let providers: Vec<Arc<dyn PriceProvider>> = vec![
        Arc::new(CoinGeckoProvider::new(
            client.clone(),
            &config.providers.coingecko,
            currency,
        )),
        Arc::new(CryptoCompareProvider::new(
            client.clone(),
            &config.providers.cryptocompare,
            currency,
        )),
        Arc::new(CoinPaprikaProvider::new(
            client,
            &config.providers.coinpaprika,
            currency,
        )),
    ];

    // Create application state
    let state = Arc::new(AppState {
        history_service: HistoryService::new(providers),
    });

    let router = price_history::presentation::router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {:?}", config.server.bind))?;
    tracing::info!("Starting price-history service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
