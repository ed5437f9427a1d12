use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use poll_promise::Promise;
use tokio::runtime::Handle;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::{FetchError, FetchOutcome, MarketDataSource};
use crate::domain::{Coin, PriceQuery};
use crate::models::{CoinInfo, PriceSeries};
use crate::ui::app::DashboardApp;
use crate::ui::config::UI_CONFIG;

/// Lifecycle of one piece of remote data, tagged with the key it was asked for.
///
/// `Idle -> Loading -> {Ready, Empty, Failed}`. Asking for a different key
/// while loading drops the old promise; its answer is never shown.
pub enum LoadState<K, T: Send + 'static> {
    Idle,
    Loading {
        key: K,
        promise: Promise<FetchOutcome<T>>,
    },
    Ready {
        key: K,
        value: T,
        at: DateTime<Utc>,
    },
    Empty {
        key: K,
    },
    Failed {
        key: K,
        error: FetchError,
    },
}

impl<K, T: Send + 'static> Default for LoadState<K, T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<K: PartialEq + Copy, T: Send + 'static> LoadState<K, T> {
    pub fn key(&self) -> Option<K> {
        match self {
            LoadState::Idle => None,
            LoadState::Loading { key, .. }
            | LoadState::Ready { key, .. }
            | LoadState::Empty { key }
            | LoadState::Failed { key, .. } => Some(*key),
        }
    }

    /// Whether `key` is already loaded or on its way.
    pub fn covers(&self, key: K) -> bool {
        self.key() == Some(key)
    }

    /// Start loading `key` unless that is already in hand. Returns true when
    /// `spawn` was called.
    pub fn request(&mut self, key: K, spawn: impl FnOnce() -> Promise<FetchOutcome<T>>) -> bool {
        if self.covers(key) {
            return false;
        }
        self.force(key, spawn);
        true
    }

    /// Start loading `key` whatever the current state is.
    pub fn force(&mut self, key: K, spawn: impl FnOnce() -> Promise<FetchOutcome<T>>) {
        *self = LoadState::Loading {
            key,
            promise: spawn(),
        };
    }

    /// Move a finished promise into its terminal state. Returns true on a transition.
    pub fn poll(&mut self) -> bool {
        if !matches!(self, LoadState::Loading { promise, .. } if promise.ready().is_some()) {
            return false;
        }
        let LoadState::Loading { key, promise } = std::mem::take(self) else {
            return false;
        };
        *self = match promise.try_take() {
            Ok(FetchOutcome::Ready(value)) => LoadState::Ready {
                key,
                value,
                at: Utc::now(),
            },
            Ok(FetchOutcome::Empty) => LoadState::Empty { key },
            Ok(FetchOutcome::Failed(error)) => LoadState::Failed { key, error },
            // Not reachable after the ready() check above.
            Err(promise) => LoadState::Loading { key, promise },
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading { .. })
    }

    /// The loaded value, but only if it belongs to `key`.
    pub fn value_for(&self, key: K) -> Option<&T> {
        match self {
            LoadState::Ready { key: k, value, .. } if *k == key => Some(value),
            _ => None,
        }
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        match self {
            LoadState::Ready { at, .. } => Some(*at),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading { .. } => "loading",
            LoadState::Ready { .. } => "ready",
            LoadState::Empty { .. } => "empty",
            LoadState::Failed { .. } => "failed",
        }
    }
}

/// Run an async fetch on its own thread so the UI never blocks on the network.
fn spawn_fetch<T, F>(name: &str, runtime: Handle, fetch: F) -> Promise<FetchOutcome<T>>
where
    T: Send + 'static,
    F: Future<Output = FetchOutcome<T>> + Send + 'static,
{
    Promise::spawn_thread(name, move || runtime.block_on(fetch))
}

impl DashboardApp {
    /// Make sure both data sets match the current selection.
    pub(super) fn ensure_requested(&mut self) {
        let query = self.selection.query();
        let source = Arc::clone(&self.source);
        let runtime = self.runtime.clone();
        let started = self.price_state.request(query, || {
            spawn_price_fetch(source, runtime, query)
        });

        let coin = self.selection.coin;
        let source = Arc::clone(&self.source);
        let runtime = self.runtime.clone();
        let started_info = self.info_state.request(coin, || spawn_info_fetch(source, runtime, coin));

        if started || started_info {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!(
                    "Requested data for {} (prices: {}, info: {})",
                    query,
                    started,
                    started_info
                );
            }
        }
    }

    /// Ask again even if the selection has not changed. The memoized source
    /// still answers from memory while the window is open.
    pub(super) fn refresh(&mut self) {
        let query = self.selection.query();
        let coin = self.selection.coin;
        let (source, runtime) = (Arc::clone(&self.source), self.runtime.clone());
        self.price_state
            .force(query, || spawn_price_fetch(source, runtime, query));
        let (source, runtime) = (Arc::clone(&self.source), self.runtime.clone());
        self.info_state
            .force(coin, || spawn_info_fetch(source, runtime, coin));
    }

    pub(super) fn poll_async_fetches(&mut self, ctx: &eframe::egui::Context) {
        if self.price_state.poll() {
            self.trend_view.clear_cache();
            match &self.price_state {
                LoadState::Ready { key, value, .. } => {
                    log::info!("Loaded {} price points for {}", value.len(), key)
                }
                LoadState::Empty { key } => log::info!("No price data for {}", key),
                LoadState::Failed { key, error } => {
                    log::error!("Price history for {} failed: {}", key, error)
                }
                _ => {}
            }
        }
        if self.info_state.poll() {
            if let LoadState::Failed { key, error } = &self.info_state {
                log::error!("Coin info for {} failed: {}", key, error);
            }
        }

        if self.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(UI_CONFIG.loading_repaint_ms));
        }
    }

    pub(super) fn is_loading(&self) -> bool {
        self.price_state.is_loading() || self.info_state.is_loading()
    }
}

fn spawn_price_fetch(
    source: Arc<dyn MarketDataSource>,
    runtime: Handle,
    query: PriceQuery,
) -> Promise<FetchOutcome<PriceSeries>> {
    spawn_fetch("price_history", runtime, async move {
        source.price_history(&query).await
    })
}

fn spawn_info_fetch(
    source: Arc<dyn MarketDataSource>,
    runtime: Handle,
    coin: Coin,
) -> Promise<FetchOutcome<CoinInfo>> {
    spawn_fetch("coin_info", runtime, async move { source.coin_info(coin).await })
}
