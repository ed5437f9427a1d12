//! CoinGecko-specific configuration constants and types.

use std::time::Duration;

/// Configuration for the CoinGecko REST client
/// (This is the runtime struct used by the Http Client)
#[derive(Debug, Clone)]
pub struct CoinGeckoApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for CoinGeckoApiConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO.base_url.to_string(),
            timeout_ms: COINGECKO.client.timeout_ms,
            user_agent: COINGECKO.client.user_agent.to_string(),
        }
    }
}

impl CoinGeckoApiConfig {
    /// Point the client at another host (local proxies, test servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

/// Freshness windows for the memoized fetchers.
pub struct CacheWindows {
    /// Price history entries expire after this many seconds
    pub price_history_ttl_sec: u64,
    /// Coin metadata entries expire after this many seconds
    pub coin_info_ttl_sec: u64,
}

impl CacheWindows {
    pub const fn price_history_ttl(&self) -> Duration {
        Duration::from_secs(self.price_history_ttl_sec)
    }

    pub const fn coin_info_ttl(&self) -> Duration {
        Duration::from_secs(self.coin_info_ttl_sec)
    }
}

/// Default values for the Rest Client
pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub user_agent: &'static str,
}

/// The Master Configuration Struct
pub struct CoinGeckoConfig {
    /// Public v3 API root, no trailing slash
    pub base_url: &'static str,
    pub cache: CacheWindows,
    pub client: ClientDefaults,
    /// Coin descriptions are cut to this many characters
    pub description_excerpt_chars: usize,
}

pub const COINGECKO: CoinGeckoConfig = CoinGeckoConfig {
    base_url: "https://api.coingecko.com/api/v3",
    cache: CacheWindows {
        price_history_ttl_sec: 600, // 10 minutes
        coin_info_ttl_sec: 300,     // 5 minutes
    },
    client: ClientDefaults {
        timeout_ms: 15_000,
        user_agent: concat!("coin-dashboard/", env!("CARGO_PKG_VERSION")),
    },
    description_excerpt_chars: 300,
};
