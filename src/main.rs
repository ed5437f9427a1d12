#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::NativeOptions;
use tokio::runtime::Runtime;

use coin_dashboard::{Cli, MarketDataSource, init_logging, run_app};

// UI selection (coin, days, tab) is stored here between runs
const APP_STATE_PATH: &str = "app_state.json";

fn main() -> Result<()> {
    // A. Init Logging
    init_logging();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Runtime and data source. Fetches run on this runtime; nothing is loaded up front.
    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    let source: Arc<dyn MarketDataSource> = Arc::new(
        args.market_data()
            .context("Failed to build the CoinGecko client")?,
    );
    let runtime = rt.handle().clone();
    let overrides = args.overrides();

    // D. Run Native App
    let options = NativeOptions {
        persistence_path: Some(PathBuf::from(APP_STATE_PATH)),
        ..Default::default()
    };

    eframe::run_native(
        coin_dashboard::ui::config::UI_TEXT.window_title,
        options,
        Box::new(move |cc| Ok(run_app(cc, source, runtime, overrides))),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))?;

    log::info!("Shutting down");
    Ok(())
}
