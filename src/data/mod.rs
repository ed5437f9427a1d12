// Market data: upstream client, memoization and the seam between them
pub mod coingecko;
pub mod memo;
pub mod outcome;
pub mod source;

// Re-export commonly used types
pub use coingecko::CoinGeckoClient;
pub use memo::{MemoWindows, MemoizedSource};
pub use outcome::{FetchError, FetchOutcome};
pub use source::MarketDataSource;
