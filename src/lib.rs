#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod cache;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod ui;
pub mod utils;

use std::sync::Arc;

// Re-export commonly used types
pub use analysis::{TrendError, TrendFit, fit_linear_trend};
pub use data::{CoinGeckoClient, FetchError, FetchOutcome, MarketDataSource, MemoizedSource};
pub use domain::{Coin, PriceQuery, VsCurrency};
pub use models::{CoinInfo, PricePoint, PriceSeries};
pub use ui::DashboardApp;

use config::{CoinGeckoApiConfig, DASHBOARD};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Coin to open with: bitcoin, ethereum, ripple, litecoin or cardano
    /// (defaults to the last selection, then bitcoin)
    #[arg(long)]
    pub coin: Option<Coin>,

    /// Days of history to load, 1 to 365 (defaults to the last selection, then 90)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=365))]
    pub days: Option<u16>,

    /// Alternative CoinGecko-compatible API root, e.g. a local mirror
    #[arg(long)]
    pub base_url: Option<String>,
}

impl Cli {
    pub fn api_config(&self) -> CoinGeckoApiConfig {
        match &self.base_url {
            Some(url) => CoinGeckoApiConfig::with_base_url(url.as_str()),
            None => CoinGeckoApiConfig::default(),
        }
    }

    /// The query a headless run should make when nothing was given.
    pub fn query_or_default(&self) -> PriceQuery {
        PriceQuery::clamped(
            self.coin.unwrap_or_default(),
            self.days.unwrap_or(DASHBOARD.days.default_days),
        )
    }

    /// HTTP client wrapped in the memoizing layer.
    pub fn market_data(&self) -> Result<MemoizedSource<CoinGeckoClient>, FetchError> {
        let client = CoinGeckoClient::with_config(self.api_config())?;
        Ok(MemoizedSource::new(client))
    }

    pub fn overrides(&self) -> ui::StartupOverrides {
        ui::StartupOverrides {
            coin: self.coin,
            days: self.days,
        }
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
/// Info by default; `filters` (a `RUST_LOG`-style string) is applied on top.
pub fn log_builder(filters: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    if let Some(filters) = filters {
        builder.parse_filters(filters);
    }
    builder
}

/// Initialise logging for a binary, honouring `RUST_LOG`.
pub fn init_logging() {
    let filters = std::env::var("RUST_LOG").ok();
    log_builder(filters.as_deref()).init();
}

pub fn run_app(
    cc: &eframe::CreationContext,
    source: Arc<dyn MarketDataSource>,
    runtime: tokio::runtime::Handle,
    overrides: ui::StartupOverrides,
) -> Box<dyn eframe::App> {
    let app = ui::DashboardApp::new(cc, source, runtime, overrides);
    Box::new(app)
}
