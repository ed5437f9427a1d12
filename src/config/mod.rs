//! Configuration module for the coin dashboard.

pub mod coingecko;
pub mod dashboard;

mod debug; // Private: callers go through crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod plot;

// Re-export commonly used items
pub use coingecko::{COINGECKO, CoinGeckoApiConfig};
pub use dashboard::DASHBOARD;
pub use plot::PLOT_CONFIG;
