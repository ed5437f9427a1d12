pub mod coin_info;
pub mod price_series;

// Re-export commonly used types
pub use coin_info::CoinInfo;
pub use price_series::{PricePoint, PriceSeries};
