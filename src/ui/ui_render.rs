use eframe::egui::{
    Align, CentralPanel, Color32, Context, Frame, Layout, Margin, RichText, ScrollArea, SidePanel,
    TopBottomPanel, Ui,
};
use strum::IntoEnumIterator;

use crate::data::FetchError;
use crate::domain::PriceQuery;
use crate::models::{CoinInfo, PriceSeries};
use crate::ui::app::{DashboardApp, DashboardTab};
use crate::ui::app_async::LoadState;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{Panel, SelectionEvent, SelectionPanel, TrendOptionsEvent, TrendOptionsPanel};
use crate::ui::ui_plot_view::show_price_chart;
use crate::ui::utils::{format_pct, format_price, spaced_separator};
use crate::utils::time_utils::format_datetime;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

impl DashboardApp {
    pub(super) fn render_top_panel(&mut self, ctx: &Context) {
        let frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::symmetric(8, 10));
        TopBottomPanel::top("title_panel").frame(frame).show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(UI_TEXT.app_title)
                        .size(32.0)
                        .strong()
                        .color(UI_CONFIG.colors.heading),
                );
            });
        });
    }

    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::same(8));
        SidePanel::left("left_panel")
            .min_width(UI_CONFIG.side_panel_min_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                let selection_events =
                    SelectionPanel::new(self.selection.coin, self.selection.days).render(ui);
                for event in selection_events {
                    self.handle_selection_event(event);
                }

                if self.selection.tab == DashboardTab::Trend {
                    spaced_separator(ui);
                    let trend_events = TrendOptionsPanel::new(
                        self.selection.show_projection,
                        self.selection.projection_days,
                    )
                    .render(ui);
                    for event in trend_events {
                        match event {
                            TrendOptionsEvent::ShowProjection(show) => {
                                self.selection.show_projection = show
                            }
                            TrendOptionsEvent::ProjectionDays(days) => {
                                self.selection.projection_days = days
                            }
                        }
                    }
                }
            });
    }

    fn handle_selection_event(&mut self, event: SelectionEvent) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("Selection event: {:?}", event);
        }
        match event {
            SelectionEvent::Coin(coin) => self.selection.coin = coin,
            SelectionEvent::Days { days, settled } => {
                self.selection.days = days;
                self.slider_dragging = !settled;
            }
            SelectionEvent::Refresh => self.refresh(),
        }
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(12));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                self.render_tab_bar(ui);
                ui.separator();
                ui.add_space(8.0);

                match self.selection.tab {
                    DashboardTab::PriceChart => self.render_price_tab(ui),
                    DashboardTab::CoinInfo => self.render_info_tab(ui),
                    DashboardTab::Trend => self.render_trend_tab(ui),
                }
            });
    }

    fn render_tab_bar(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            for (tab, accent) in DashboardTab::iter().zip(UI_CONFIG.colors.tab_accents) {
                let selected = self.selection.tab == tab;
                let text = RichText::new(tab.to_string()).size(16.0);
                let text = if selected {
                    text.strong().color(Color32::WHITE).background_color(accent)
                } else {
                    text.color(accent)
                };
                if ui.selectable_label(selected, text).clicked() && !selected {
                    self.selection.tab = tab;
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_ui_interactions {
                        log::info!("Switched to tab {}", tab);
                    }
                }
            }
        });
    }

    fn render_price_tab(&mut self, ui: &mut Ui) {
        let query = self.selection.query();
        match price_view(&self.price_state, query) {
            PriceView::Loading => render_loading(ui, &query.to_string()),
            PriceView::Empty => {
                ui.label_error(UI_TEXT.chart_empty);
            }
            PriceView::Failed(error) => render_failure(ui, UI_TEXT.chart_load_failed, error),
            PriceView::Ready(series) => {
                ui.vertical_centered(|ui| {
                    ui.label_header(format!(
                        "{} {} {} days",
                        query.coin().display_name(),
                        UI_TEXT.price_chart_title_prefix,
                        query.days()
                    ));
                });
                render_series_summary(ui, &query, series);
                ui.add_space(6.0);
                show_price_chart(ui, &query, series);
            }
        }
    }

    fn render_info_tab(&mut self, ui: &mut Ui) {
        let coin = self.selection.coin;
        match &self.info_state {
            LoadState::Ready { key, value, .. } if *key == coin => {
                ScrollArea::vertical().show(ui, |ui| render_coin_info(ui, value));
            }
            LoadState::Empty { key } if *key == coin => {
                ui.label_error(UI_TEXT.info_empty);
            }
            LoadState::Failed { key, error } if *key == coin => {
                render_failure(ui, UI_TEXT.info_load_failed, error);
            }
            _ => render_loading(ui, coin.display_name()),
        }
    }

    fn render_trend_tab(&mut self, ui: &mut Ui) {
        let query = self.selection.query();
        ui.label_header(UI_TEXT.trend_heading);
        ui.label_subdued(UI_TEXT.trend_disclaimer);
        ui.add_space(6.0);

        match price_view(&self.price_state, query) {
            PriceView::Loading => render_loading(ui, &query.to_string()),
            PriceView::Empty | PriceView::Failed(_) => {
                ui.label_warning(UI_TEXT.trend_not_enough_data);
            }
            PriceView::Ready(series) => match self.trend_view.fit_for(query, series) {
                Err(e) => {
                    ui.label_warning(UI_TEXT.trend_not_enough_data);
                    ui.label_subdued(e.to_string());
                }
                Ok(fit) => {
                    let currency = query.currency();
                    ui.horizontal(|ui| {
                        ui.metric(
                            UI_TEXT.slope_label,
                            &format_price(fit.slope, currency),
                            slope_color(fit.slope),
                        );
                        ui.add_space(12.0);
                        ui.metric(
                            UI_TEXT.intercept_label,
                            &format_price(fit.intercept, currency),
                            UI_CONFIG.colors.label,
                        );
                        if let Some(pct) = fit.daily_change_pct() {
                            ui.add_space(12.0);
                            ui.metric(
                                UI_TEXT.daily_change_label,
                                &format_pct(pct),
                                slope_color(pct),
                            );
                        }
                    });
                    ui.add_space(6.0);
                    ui.vertical_centered(|ui| {
                        ui.label(
                            RichText::new(UI_TEXT.trend_chart_title)
                                .color(UI_CONFIG.colors.subsection_heading),
                        );
                    });
                    let projection = self.selection.projection();
                    self.trend_view
                        .show_trend_chart(ui, &query, series, projection);
                }
            },
        }
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.status_panel)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.metric(
                        UI_TEXT.status_source_label,
                        self.source.signature(),
                        UI_CONFIG.colors.label,
                    );
                    ui.separator();
                    ui.metric(
                        UI_TEXT.status_price_label,
                        self.price_state.label(),
                        state_color(self.price_state.label()),
                    );
                    ui.separator();
                    ui.metric(
                        UI_TEXT.status_info_label,
                        self.info_state.label(),
                        state_color(self.info_state.label()),
                    );
                    if let Some(at) = self.price_state.updated_at() {
                        ui.separator();
                        ui.metric(
                            UI_TEXT.status_updated_label,
                            &format_datetime(&at),
                            UI_CONFIG.colors.label,
                        );
                    }
                    if self.is_loading() {
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            ui.spinner();
                        });
                    }
                });
            });
    }
}

/// What the price-driven tabs can show for the current query.
enum PriceView<'a> {
    Loading,
    Empty,
    Failed(&'a FetchError),
    Ready(&'a PriceSeries),
}

/// Anything that belongs to a different query counts as still loading.
fn price_view(state: &LoadState<PriceQuery, PriceSeries>, query: PriceQuery) -> PriceView<'_> {
    match state {
        LoadState::Ready { key, value, .. } if *key == query => PriceView::Ready(value),
        LoadState::Empty { key } if *key == query => PriceView::Empty,
        LoadState::Failed { key, error } if *key == query => PriceView::Failed(error),
        _ => PriceView::Loading,
    }
}

fn render_loading(ui: &mut Ui, what: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.spinner();
        ui.add_space(12.0);
        ui.heading(format!("{} {}...", UI_TEXT.loading_prefix, what));
    });
}

fn render_failure(ui: &mut Ui, headline: &str, error: &FetchError) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label_error(headline);
        ui.add_space(10.0);
        ui.label_subdued(error.to_string());
    });
}

fn render_series_summary(ui: &mut Ui, query: &PriceQuery, series: &PriceSeries) {
    let currency = query.currency();
    ui.horizontal(|ui| {
        if let Some(last) = series.last() {
            ui.metric(
                UI_TEXT.latest_price_label,
                &format_price(last.price, currency),
                UI_CONFIG.colors.card_value,
            );
            ui.add_space(12.0);
        }
        if let Some(pct) = series.change_pct() {
            ui.metric(UI_TEXT.change_label, &format_pct(pct), slope_color(pct));
            ui.add_space(12.0);
        }
        if let Some((lo, hi)) = series.price_range() {
            ui.metric(
                UI_TEXT.range_label,
                &format!("{} - {}", format_price(lo, currency), format_price(hi, currency)),
                UI_CONFIG.colors.label,
            );
            ui.add_space(12.0);
        }
        ui.metric(
            UI_TEXT.samples_label,
            &series.len().to_string(),
            UI_CONFIG.colors.label,
        );
    });
}

fn render_coin_info(ui: &mut Ui, info: &CoinInfo) {
    ui.value_card(
        UI_TEXT.card_name,
        format!("{} ({})", info.name, info.ticker()),
    );
    ui.metric_card(UI_TEXT.card_website, |ui| {
        if info.has_homepage() {
            ui.hyperlink(&info.homepage_url);
        } else {
            ui.label_subdued(UI_TEXT.no_homepage);
        }
    });
    ui.metric_card(UI_TEXT.card_description, |ui| {
        ui.label(
            RichText::new(format!("{}...", info.description_excerpt))
                .color(UI_CONFIG.colors.label),
        );
    });
    if !info.image_url.is_empty() {
        ui.metric_card(UI_TEXT.card_logo, |ui| {
            ui.hyperlink(&info.image_url);
        });
    }
}

fn slope_color(value: f64) -> Color32 {
    if value >= 0.0 {
        UI_CONFIG.colors.positive
    } else {
        UI_CONFIG.colors.negative
    }
}

fn state_color(label: &str) -> Color32 {
    match label {
        "ready" => UI_CONFIG.colors.positive,
        "failed" => UI_CONFIG.colors.negative,
        "loading" => Color32::from_rgb(255, 215, 0),
        _ => Color32::GRAY,
    }
}
