use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;

use crate::config::{COINGECKO, CoinGeckoApiConfig};
use crate::data::outcome::{FetchError, FetchOutcome};
use crate::data::source::MarketDataSource;
use crate::domain::{Coin, PriceQuery};
use crate::models::coin_info::excerpt;
use crate::models::{CoinInfo, PricePoint, PriceSeries};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Body of `GET /coins/{id}/market_chart`. Only `prices` is read.
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<[f64; 2]>,
}

impl TryFrom<MarketChartResponse> for PriceSeries {
    type Error = FetchError;

    fn try_from(raw: MarketChartResponse) -> Result<Self, Self::Error> {
        raw.prices
            .into_iter()
            .map(|[timestamp_ms, price]| {
                PricePoint::from_epoch_ms(timestamp_ms as i64, price).ok_or_else(|| {
                    FetchError::Decode(format!("timestamp {timestamp_ms} is out of range"))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(PriceSeries::new)
    }
}

/// Body of `GET /coins/{id}`. CoinGecko sends far more; everything we read is optional.
#[derive(Debug, Default, Deserialize)]
struct CoinDetailResponse {
    #[serde(default)]
    name: String,
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    image: Option<ImageLinks>,
    #[serde(default)]
    links: Option<ProjectLinks>,
    #[serde(default)]
    description: Option<Descriptions>,
}

#[derive(Debug, Default, Deserialize)]
struct ImageLinks {
    large: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectLinks {
    #[serde(default)]
    homepage: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Descriptions {
    en: Option<String>,
}

impl From<CoinDetailResponse> for CoinInfo {
    fn from(raw: CoinDetailResponse) -> Self {
        let description = raw.description.and_then(|d| d.en).unwrap_or_default();
        CoinInfo {
            name: raw.name,
            symbol: raw.symbol,
            image_url: raw.image.and_then(|i| i.large).unwrap_or_default(),
            homepage_url: raw
                .links
                .and_then(|l| l.homepage.into_iter().next())
                .unwrap_or_default(),
            description_excerpt: excerpt(&description, COINGECKO.description_excerpt_chars),
        }
    }
}

/// Parse a market-chart body. An empty `prices` array is `Empty`, not an error.
pub fn parse_market_chart(body: &str) -> FetchOutcome<PriceSeries> {
    let raw: MarketChartResponse = match serde_json::from_str(body) {
        Ok(raw) => raw,
        Err(e) => return FetchOutcome::Failed(FetchError::Decode(e.to_string())),
    };
    match PriceSeries::try_from(raw) {
        Ok(series) if series.is_empty() => FetchOutcome::Empty,
        Ok(series) => FetchOutcome::Ready(series),
        Err(e) => FetchOutcome::Failed(e),
    }
}

/// Parse a coin-detail body.
pub fn parse_coin_detail(body: &str) -> FetchOutcome<CoinInfo> {
    match serde_json::from_str::<CoinDetailResponse>(body) {
        Ok(raw) => FetchOutcome::Ready(raw.into()),
        Err(e) => FetchOutcome::Failed(FetchError::Decode(e.to_string())),
    }
}

/// Thin client over the public CoinGecko v3 REST API. No retries, no caching.
pub struct CoinGeckoClient {
    http_client: HttpClient,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(CoinGeckoApiConfig::default())
    }

    /// Create a client against another host (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_config(CoinGeckoApiConfig::with_base_url(base_url))
    }

    pub fn with_config(config: CoinGeckoApiConfig) -> Result<Self, FetchError> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent)
            .build()
            .map_err(FetchError::from_reqwest)?;
        Ok(Self {
            http_client,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn market_chart_url(&self, query: &PriceQuery) -> String {
        format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url,
            query.coin().slug(),
            query.currency().code(),
            query.days()
        )
    }

    pub fn coin_url(&self, coin: Coin) -> String {
        format!("{}/coins/{}", self.base_url, coin.slug())
    }

    /// GET /coins/{id}/market_chart
    pub async fn fetch_price_history(&self, query: &PriceQuery) -> FetchOutcome<PriceSeries> {
        let outcome = match self.get_body(&self.market_chart_url(query)).await {
            Ok(Some(body)) => parse_market_chart(&body),
            Ok(None) => FetchOutcome::Empty,
            Err(e) => FetchOutcome::Failed(e),
        };
        if let FetchOutcome::Failed(e) = &outcome {
            log::warn!("Price history for {} failed: {}", query, e);
        }
        outcome
    }

    /// GET /coins/{id}
    pub async fn fetch_coin_info(&self, coin: Coin) -> FetchOutcome<CoinInfo> {
        let outcome = match self.get_body(&self.coin_url(coin)).await {
            Ok(Some(body)) => parse_coin_detail(&body),
            Ok(None) => FetchOutcome::Empty,
            Err(e) => FetchOutcome::Failed(e),
        };
        if let FetchOutcome::Failed(e) = &outcome {
            log::warn!("Coin info for {} failed: {}", coin, e);
        }
        outcome
    }

    /// Returns `Ok(None)` on 404. Any other non-success status is an error.
    async fn get_body(&self, url: &str) -> Result<Option<String>, FetchError> {
        #[cfg(debug_assertions)]
        let started = std::time::Instant::now();

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_fetch_timings {
            log::info!("GET {} -> {} in {:?}", url, status, started.elapsed());
        }

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
            });
        }

        response.text().await.map(Some).map_err(FetchError::from_reqwest)
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    async fn price_history(&self, query: &PriceQuery) -> FetchOutcome<PriceSeries> {
        self.fetch_price_history(query).await
    }

    async fn coin_info(&self, coin: Coin) -> FetchOutcome<CoinInfo> {
        self.fetch_coin_info(coin).await
    }

    fn signature(&self) -> &'static str {
        "CoinGecko API"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::TimeUtils;

    fn market_chart_body(n: usize) -> String {
        let start = 1_700_000_000_000_i64;
        let pairs: Vec<String> = (0..n)
            .map(|i| format!("[{},{}]", start + i as i64 * TimeUtils::MS_IN_H, 100.0 + i as f64))
            .collect();
        format!(
            r#"{{"prices":[{}],"market_caps":[],"total_volumes":[]}}"#,
            pairs.join(",")
        )
    }

    #[test]
    fn market_chart_keeps_length_and_order() {
        for n in [1, 24, 90, 365] {
            let outcome = parse_market_chart(&market_chart_body(n));
            let points = outcome.points();
            assert_eq!(points.len(), n);
            assert!(points.windows(2).all(|w| w[0].timestamp_ms < w[1].timestamp_ms));
            assert_eq!(points[0].price, 100.0);
        }
    }

    #[test]
    fn market_chart_dates_follow_timestamps() {
        let outcome = parse_market_chart(r#"{"prices":[[1700000000000,37000.5]]}"#);
        let point = &outcome.points()[0];
        assert_eq!(point.date.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(point.price, 37000.5);
    }

    #[test]
    fn empty_prices_are_empty_not_failed() {
        assert_eq!(parse_market_chart(r#"{"prices":[]}"#), FetchOutcome::Empty);
    }

    #[test]
    fn malformed_market_chart_is_a_decode_failure() {
        for body in ["not json", r#"{"prices":[[1,2,3]]}"#, r#"{"total_volumes":[]}"#] {
            assert!(matches!(
                parse_market_chart(body),
                FetchOutcome::Failed(FetchError::Decode(_))
            ));
        }
    }

    #[test]
    fn coin_detail_extracts_display_fields() {
        let long = "x".repeat(500);
        let body = format!(
            r#"{{
                "id": "bitcoin",
                "name": "Bitcoin",
                "symbol": "btc",
                "image": {{"thumb": "t.png", "large": "https://img/large.png"}},
                "links": {{"homepage": ["https://bitcoin.org", "", ""]}},
                "description": {{"en": "{long}", "de": "ignored"}}
            }}"#
        );
        let info = parse_coin_detail(&body).into_ready().unwrap();
        assert_eq!(info.name, "Bitcoin");
        assert_eq!(info.ticker(), "BTC");
        assert_eq!(info.image_url, "https://img/large.png");
        assert_eq!(info.homepage_url, "https://bitcoin.org");
        assert_eq!(info.description_excerpt.chars().count(), 300);
    }

    #[test]
    fn coin_detail_missing_fields_default_to_empty() {
        let info = parse_coin_detail(r#"{"name":"Cardano","symbol":"ada","links":{"homepage":[]}}"#)
            .into_ready()
            .unwrap();
        assert_eq!(info.image_url, "");
        assert_eq!(info.homepage_url, "");
        assert_eq!(info.description_excerpt, "");
    }

    #[test]
    fn urls_carry_every_query_parameter() {
        let client = CoinGeckoClient::with_base_url("http://localhost:9/api/v3/").unwrap();
        let query = PriceQuery::new(Coin::Litecoin, 30).unwrap();
        assert_eq!(
            client.market_chart_url(&query),
            "http://localhost:9/api/v3/coins/litecoin/market_chart?vs_currency=usd&days=30"
        );
        assert_eq!(client.coin_url(Coin::Ripple), "http://localhost:9/api/v3/coins/ripple");
    }
}
