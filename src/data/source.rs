use std::sync::Arc;

use async_trait::async_trait;

use crate::data::outcome::FetchOutcome;
use crate::domain::{Coin, PriceQuery};
use crate::models::{CoinInfo, PriceSeries};

/// Anything that can answer the dashboard's two questions.
/// Implemented by the HTTP client, by the memoizing wrapper and by test fakes.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn price_history(&self, query: &PriceQuery) -> FetchOutcome<PriceSeries>;

    async fn coin_info(&self, coin: Coin) -> FetchOutcome<CoinInfo>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

#[async_trait]
impl<T> MarketDataSource for Arc<T>
where
    T: MarketDataSource + ?Sized,
{
    async fn price_history(&self, query: &PriceQuery) -> FetchOutcome<PriceSeries> {
        (**self).price_history(query).await
    }

    async fn coin_info(&self, coin: Coin) -> FetchOutcome<CoinInfo> {
        (**self).coin_info(coin).await
    }

    fn signature(&self) -> &'static str {
        (**self).signature()
    }
}
