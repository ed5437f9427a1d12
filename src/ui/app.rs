use std::sync::Arc;

use eframe::{Frame, egui};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use tokio::runtime::Handle;

use crate::config::DASHBOARD;
use crate::data::MarketDataSource;
use crate::domain::{Coin, PriceQuery};
use crate::models::{CoinInfo, PriceSeries};
use crate::ui::app_async::LoadState;
use crate::ui::ui_plot_view::TrendView;
use crate::ui::utils::setup_custom_visuals;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, Display)]
pub enum DashboardTab {
    #[default]
    #[strum(to_string = "Price Chart")]
    PriceChart,
    #[strum(to_string = "Coin Info")]
    CoinInfo,
    #[strum(to_string = "Trend")]
    Trend,
}

/// What the user is looking at. This is the only state that is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub coin: Coin,
    pub days: u16,
    pub tab: DashboardTab,
    pub show_projection: bool,
    pub projection_days: u16,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            coin: Coin::default(),
            days: DASHBOARD.days.default_days,
            tab: DashboardTab::default(),
            show_projection: false,
            projection_days: DASHBOARD.trend_extension.default_days,
        }
    }
}

impl Selection {
    /// Out-of-range days (hand-edited storage, older versions) are clamped.
    pub fn query(&self) -> PriceQuery {
        PriceQuery::clamped(self.coin, self.days)
    }

    /// Apply start-up overrides on top of whatever was restored.
    pub fn with_overrides(mut self, coin: Option<Coin>, days: Option<u16>) -> Self {
        if let Some(coin) = coin {
            self.coin = coin;
        }
        if let Some(days) = days {
            self.days = days;
        }
        self.days = self.query().days();
        self.projection_days = self
            .projection_days
            .clamp(1, DASHBOARD.trend_extension.max_days);
        self
    }

    pub fn projection(&self) -> Option<u16> {
        self.show_projection.then_some(self.projection_days)
    }
}

/// Command-line choices that win over the restored selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct StartupOverrides {
    pub coin: Option<Coin>,
    pub days: Option<u16>,
}

pub struct DashboardApp {
    pub(super) selection: Selection,
    pub(super) source: Arc<dyn MarketDataSource>,
    pub(super) runtime: Handle,
    pub(super) price_state: LoadState<PriceQuery, PriceSeries>,
    pub(super) info_state: LoadState<Coin, CoinInfo>,
    pub(super) trend_view: TrendView,
    /// True while the days slider is mid-drag; fetching waits until it settles.
    pub(super) slider_dragging: bool,
}

impl DashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        source: Arc<dyn MarketDataSource>,
        runtime: Handle,
        overrides: StartupOverrides,
    ) -> Self {
        let restored = cc
            .storage
            .and_then(|storage| eframe::get_value::<Selection>(storage, eframe::APP_KEY));

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_state_serde {
            match &restored {
                Some(selection) => log::info!("Restored selection {:?}", selection),
                None => log::info!("No stored selection. Starting from defaults."),
            }
        }

        let selection = restored
            .unwrap_or_default()
            .with_overrides(overrides.coin, overrides.days);

        log::info!(
            "Dashboard starting on {} using {}",
            selection.query(),
            source.signature()
        );

        Self::with_selection(selection, source, runtime)
    }

    pub fn with_selection(
        selection: Selection,
        source: Arc<dyn MarketDataSource>,
        runtime: Handle,
    ) -> Self {
        Self {
            selection,
            source,
            runtime,
            price_state: LoadState::default(),
            info_state: LoadState::default(),
            trend_view: TrendView::new(),
            slider_dragging: false,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }
}

impl eframe::App for DashboardApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Pending promises are dropped; their threads finish on their own.
        self.price_state = LoadState::Idle;
        self.info_state = LoadState::Idle;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.selection);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.poll_async_fetches(ctx);

        self.render_top_panel(ctx);
        self.render_side_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);

        if !self.slider_dragging {
            self.ensure_requested();
        }
    }
}
