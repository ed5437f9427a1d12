use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::config::COINGECKO;
use crate::data::outcome::FetchOutcome;
use crate::data::source::MarketDataSource;
use crate::domain::{Coin, PriceQuery};
use crate::models::{CoinInfo, PriceSeries};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// How long each kind of answer stays fresh. The two windows are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoWindows {
    pub price_history: Duration,
    pub coin_info: Duration,
}

impl Default for MemoWindows {
    fn default() -> Self {
        Self {
            price_history: COINGECKO.cache.price_history_ttl(),
            coin_info: COINGECKO.cache.coin_info_ttl(),
        }
    }
}

/// Identity of one memoized call: which function, with which arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MemoKey {
    PriceHistory(PriceQuery),
    CoinInfo(Coin),
}

type OutcomeCache<K, V> = Mutex<TtlCache<K, FetchOutcome<V>>>;

/// Wraps a `MarketDataSource` and answers repeated questions from memory.
///
/// Every outcome is stored, failures included, so a failing upstream is asked
/// at most once per window. Concurrent callers for the same key queue on a
/// per-key lock, and the ones behind the first find its answer in the cache.
pub struct MemoizedSource<S> {
    inner: S,
    windows: MemoWindows,
    price_history: OutcomeCache<PriceQuery, PriceSeries>,
    coin_info: OutcomeCache<Coin, CoinInfo>,
    in_flight: Mutex<HashMap<MemoKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl<S: MarketDataSource> MemoizedSource<S> {
    pub fn new(inner: S) -> Self {
        Self::with_clock(inner, Arc::new(SystemClock), MemoWindows::default())
    }

    pub fn with_clock(inner: S, clock: Arc<dyn Clock>, windows: MemoWindows) -> Self {
        Self {
            inner,
            windows,
            price_history: Mutex::new(TtlCache::new(clock.clone())),
            coin_info: Mutex::new(TtlCache::new(clock)),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn windows(&self) -> MemoWindows {
        self.windows
    }

    /// Number of stored entries, fresh or stale: (price history, coin info).
    pub fn cached_entries(&self) -> (usize, usize) {
        (lock(&self.price_history).len(), lock(&self.coin_info).len())
    }

    /// Drop stale entries from both caches. Returns how many went.
    pub fn purge_expired(&self) -> usize {
        let removed =
            lock(&self.price_history).purge_expired() + lock(&self.coin_info).purge_expired();
        lock(&self.in_flight).retain(|_, key_lock| Arc::strong_count(key_lock) > 1);
        removed
    }

    fn key_lock(&self, key: MemoKey) -> Arc<tokio::sync::Mutex<()>> {
        lock(&self.in_flight).entry(key).or_default().clone()
    }

    /// `fetch` is only polled on a miss.
    async fn memoized<K, V>(
        &self,
        memo_key: MemoKey,
        key: K,
        cache: &OutcomeCache<K, V>,
        ttl: Duration,
        fetch: impl Future<Output = FetchOutcome<V>> + Send,
    ) -> FetchOutcome<V>
    where
        K: Eq + Hash + Send + Sync,
        V: Clone + Send,
    {
        let key_lock = self.key_lock(memo_key);
        let _in_flight = key_lock.lock().await;

        // The std guard must be gone before the await below.
        let lookup = lock(cache).get(&key);
        let stale = match lookup {
            Some(lookup) if lookup.fresh => {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_cache_events {
                    log::info!("cache hit: {:?}", memo_key);
                }
                return lookup.value;
            }
            Some(_) => true,
            None => false,
        };
        log::debug!(
            "cache {}: {:?}",
            if stale { "stale" } else { "miss" },
            memo_key
        );

        let outcome = fetch.await;
        lock(cache).put(key, outcome.clone(), ttl);
        outcome
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl<S: MarketDataSource> MarketDataSource for MemoizedSource<S> {
    async fn price_history(&self, query: &PriceQuery) -> FetchOutcome<PriceSeries> {
        self.memoized(
            MemoKey::PriceHistory(*query),
            *query,
            &self.price_history,
            self.windows.price_history,
            self.inner.price_history(query),
        )
        .await
    }

    async fn coin_info(&self, coin: Coin) -> FetchOutcome<CoinInfo> {
        self.memoized(
            MemoKey::CoinInfo(coin),
            coin,
            &self.coin_info,
            self.windows.coin_info,
            self.inner.coin_info(coin),
        )
        .await
    }

    fn signature(&self) -> &'static str {
        self.inner.signature()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::cache::ManualClock;
    use crate::data::outcome::FetchError;
    use crate::models::PricePoint;

    /// Counts upstream calls and answers from a script.
    #[derive(Default)]
    struct CountingSource {
        price_calls: AtomicUsize,
        info_calls: AtomicUsize,
        fail_with: Option<u16>,
    }

    impl CountingSource {
        fn failing(code: u16) -> Self {
            Self {
                fail_with: Some(code),
                ..Default::default()
            }
        }

        fn price_calls(&self) -> usize {
            self.price_calls.load(Ordering::SeqCst)
        }

        fn info_calls(&self) -> usize {
            self.info_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MarketDataSource for CountingSource {
        async fn price_history(&self, query: &PriceQuery) -> FetchOutcome<PriceSeries> {
            self.price_calls.fetch_add(1, Ordering::SeqCst);
            // Give concurrent callers a chance to pile up behind us.
            tokio::task::yield_now().await;
            if let Some(code) = self.fail_with {
                return FetchOutcome::Failed(FetchError::Status { code });
            }
            let series = (0..query.days())
                .filter_map(|d| PricePoint::from_epoch_ms(i64::from(d) * 86_400_000, 100.0))
                .collect();
            FetchOutcome::Ready(series)
        }

        async fn coin_info(&self, coin: Coin) -> FetchOutcome<CoinInfo> {
            self.info_calls.fetch_add(1, Ordering::SeqCst);
            FetchOutcome::Ready(CoinInfo {
                name: coin.display_name().to_string(),
                ..Default::default()
            })
        }

        fn signature(&self) -> &'static str {
            "counting fake"
        }
    }

    type Fixture = (MemoizedSource<Arc<CountingSource>>, Arc<CountingSource>, ManualClock);

    fn memoized_fake(source: CountingSource) -> Fixture {
        let source = Arc::new(source);
        let clock = ManualClock::new();
        let memo = MemoizedSource::with_clock(
            source.clone(),
            Arc::new(clock.clone()),
            MemoWindows::default(),
        );
        (memo, source, clock)
    }

    fn query(days: u16) -> PriceQuery {
        PriceQuery::new(Coin::Bitcoin, days).unwrap()
    }

    #[tokio::test]
    async fn repeated_call_within_window_hits_upstream_once() {
        let (memo, source, clock) = memoized_fake(CountingSource::default());

        let first = memo.price_history(&query(30)).await;
        clock.advance(Duration::from_secs(599));
        let second = memo.price_history(&query(30)).await;

        assert_eq!(source.price_calls(), 1);
        assert_eq!(first, second);
        assert_eq!(first.points().len(), 30);
    }

    #[tokio::test]
    async fn call_after_window_refetches() {
        let (memo, source, clock) = memoized_fake(CountingSource::default());

        memo.price_history(&query(30)).await;
        clock.advance(Duration::from_secs(600));
        memo.price_history(&query(30)).await;

        assert_eq!(source.price_calls(), 2);
        assert_eq!(memo.cached_entries(), (1, 0));
    }

    #[tokio::test]
    async fn different_days_do_not_share_an_entry() {
        let (memo, source, _clock) = memoized_fake(CountingSource::default());

        let month = memo.price_history(&query(30)).await;
        let quarter = memo.price_history(&query(90)).await;

        assert_eq!(source.price_calls(), 2);
        assert_eq!(month.points().len(), 30);
        assert_eq!(quarter.points().len(), 90);
    }

    #[tokio::test]
    async fn failure_is_cached_for_the_whole_window() {
        let (memo, source, clock) = memoized_fake(CountingSource::failing(500));

        let first = memo.price_history(&query(7)).await;
        clock.advance(Duration::from_secs(599));
        let second = memo.price_history(&query(7)).await;

        assert_eq!(source.price_calls(), 1);
        assert_eq!(second, FetchOutcome::Failed(FetchError::Status { code: 500 }));
        assert_eq!(first, second);

        clock.advance(Duration::from_secs(1));
        memo.price_history(&query(7)).await;
        assert_eq!(source.price_calls(), 2);
    }

    #[tokio::test]
    async fn coin_info_has_its_own_shorter_window() {
        let (memo, source, clock) = memoized_fake(CountingSource::default());

        memo.coin_info(Coin::Ethereum).await;
        memo.price_history(&query(30)).await;
        clock.advance(Duration::from_secs(300));
        memo.coin_info(Coin::Ethereum).await;
        memo.price_history(&query(30)).await;

        assert_eq!(source.info_calls(), 2);
        assert_eq!(source.price_calls(), 1);
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_fetch() {
        let (memo, source, _clock) = memoized_fake(CountingSource::default());

        let q = query(14);
        let (a, b) = futures::join!(memo.price_history(&q), memo.price_history(&q));

        assert_eq!(source.price_calls(), 1);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn purge_drops_stale_entries() {
        let (memo, _source, clock) = memoized_fake(CountingSource::default());

        memo.coin_info(Coin::Cardano).await;
        memo.price_history(&query(1)).await;
        clock.advance(Duration::from_secs(301));

        assert_eq!(memo.purge_expired(), 1);
        assert_eq!(memo.cached_entries(), (1, 0));
    }
}
