use chrono::{DateTime, Duration as ChronoDuration, Utc};
use eframe::egui;
use egui_plot::{AxisHints, Corner, GridMark, HPlacement, Legend, Line, LineStyle, Plot, PlotPoint};

use crate::analysis::{TrendError, TrendFit, TrendPoint, fit_linear_trend};
use crate::config::PLOT_CONFIG;
use crate::domain::{PriceQuery, VsCurrency};
use crate::models::PriceSeries;
use crate::ui::config::UI_TEXT;
use crate::ui::utils::format_price;
use crate::utils::maths_utils;
use crate::utils::time_utils::{TimeUtils, epoch_ms_to_datetime};

/// Plots use fractional days since the Unix epoch on the x axis.
fn date_to_x(date: &DateTime<Utc>) -> f64 {
    date.timestamp_millis() as f64 / TimeUtils::MS_IN_D as f64
}

fn x_to_date_label(x: f64) -> String {
    epoch_ms_to_datetime((x * TimeUtils::MS_IN_D as f64) as i64)
        .map(|d| d.format(TimeUtils::STANDARD_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

fn series_points(series: &PriceSeries) -> Vec<[f64; 2]> {
    series
        .iter()
        .map(|p| [date_to_x(&p.date), p.price])
        .collect()
}

/// Padded y bounds over every value that will be drawn.
fn y_bounds(values: &[f64]) -> Option<(f64, f64)> {
    let (min, max) = maths_utils::get_min_max(values)?;
    Some(maths_utils::padded_range(min, max, PLOT_CONFIG.y_padding_pct))
}

fn create_x_axis() -> AxisHints<'static> {
    AxisHints::new_x()
        .label(UI_TEXT.plot_x_axis)
        .formatter(|grid_mark, _range| x_to_date_label(grid_mark.value))
}

fn create_y_axis(currency: VsCurrency) -> AxisHints<'static> {
    let label = format!("{} ({})", UI_TEXT.plot_y_axis_prefix, currency);
    AxisHints::new_y()
        .label(label)
        .formatter(move |grid_mark, _range| format_price(grid_mark.value, currency))
        .placement(HPlacement::Left)
}

/// Evenly spaced price ticks between the padded bounds.
fn y_grid_marks(y_min: f64, y_max: f64) -> Vec<GridMark> {
    let divisions = PLOT_CONFIG.y_axis_divisions.max(1);
    let step = (y_max - y_min) / divisions as f64;
    if step <= 0.0 || !step.is_finite() {
        return Vec::new();
    }
    (0..=divisions)
        .map(|i| GridMark {
            value: y_min + step * i as f64,
            step_size: step,
        })
        .collect()
}

fn base_plot(id: &str, currency: VsCurrency, y_min: f64, y_max: f64) -> Plot<'static> {
    Plot::new(id.to_string())
        .legend(Legend::default().position(Corner::LeftTop))
        .custom_x_axes(vec![create_x_axis()])
        .custom_y_axes(vec![create_y_axis(currency)])
        .y_grid_spacer(move |_input| y_grid_marks(y_min, y_max))
        .label_formatter(move |name, value: &PlotPoint| {
            let date = x_to_date_label(value.x);
            let price = format_price(value.y, currency);
            if name.is_empty() {
                format!("{date}\n{price}")
            } else {
                format!("{name}\n{date}\n{price}")
            }
        })
        .allow_scroll(false)
        .allow_boxed_zoom(false)
}

/// The plain price-over-time chart.
pub fn show_price_chart(ui: &mut egui::Ui, query: &PriceQuery, series: &PriceSeries) {
    let Some((y_min, y_max)) = y_bounds(&series.prices()) else {
        return;
    };
    let points = series_points(series);

    base_plot("price_chart", query.currency(), y_min, y_max).show(ui, |plot_ui| {
        plot_ui.line(
            Line::new(UI_TEXT.price_series_name, points)
                .color(PLOT_CONFIG.price_line_color)
                .width(PLOT_CONFIG.price_line_width),
        );
        plot_ui.set_plot_bounds_y(y_min..=y_max);
    });
}

/// Caches the fit for the series on screen; cleared whenever new data lands.
#[derive(Default)]
pub struct TrendView {
    cache: Option<(PriceQuery, Result<TrendFit, TrendError>)>,
}

impl TrendView {
    pub fn new() -> Self {
        Self { cache: None }
    }

    pub fn clear_cache(&mut self) {
        self.cache = None;
    }

    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    /// Fit once per (query, data) and hand back the stored result afterwards.
    pub fn fit_for(
        &mut self,
        query: PriceQuery,
        series: &PriceSeries,
    ) -> &Result<TrendFit, TrendError> {
        if !matches!(&self.cache, Some((cached, _)) if *cached == query) {
            self.cache = None;
        }
        let (_, fit) = self
            .cache
            .get_or_insert_with(|| (query, fit_linear_trend(series)));
        fit
    }

    /// Actual prices with the dashed trend line over them, plus the optional extension.
    pub fn show_trend_chart(
        &mut self,
        ui: &mut egui::Ui,
        query: &PriceQuery,
        series: &PriceSeries,
        projection_days: Option<u16>,
    ) {
        let Some(min_date) = series.min_date() else {
            return;
        };
        let Ok(fit) = self.fit_for(*query, series) else {
            return;
        };

        let trend_points: Vec<[f64; 2]> = series
            .iter()
            .zip(&fit.points)
            .map(|(p, t)| [date_to_x(&p.date), t.predicted_price])
            .collect();

        let projection: Vec<[f64; 2]> = projection_days
            .map(|days| {
                // Start the extension where the fitted line ends so the two join up.
                let last = fit.points.iter().map(|p| p.day_offset).max().unwrap_or(0);
                let anchor = TrendPoint {
                    day_offset: last,
                    predicted_price: fit.project(last),
                };
                std::iter::once(anchor)
                    .chain(fit.extend(days))
                    .map(|t| {
                        let date = min_date + ChronoDuration::days(t.day_offset);
                        [date_to_x(&date), t.predicted_price]
                    })
                    .collect()
            })
            .unwrap_or_default();

        let mut values = series.prices();
        values.extend(trend_points.iter().map(|p| p[1]));
        values.extend(projection.iter().map(|p| p[1]));
        let Some((y_min, y_max)) = y_bounds(&values) else {
            return;
        };
        let actual = series_points(series);

        base_plot("trend_chart", query.currency(), y_min, y_max).show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(UI_TEXT.actual_series_name, actual)
                    .color(PLOT_CONFIG.price_line_color)
                    .width(PLOT_CONFIG.price_line_width),
            );
            plot_ui.line(
                Line::new(UI_TEXT.trend_series_name, trend_points)
                    .color(PLOT_CONFIG.trend_line_color)
                    .width(PLOT_CONFIG.trend_line_width)
                    .style(LineStyle::dashed_loose()),
            );
            if !projection.is_empty() {
                plot_ui.line(
                    Line::new(UI_TEXT.projection_series_name, projection)
                        .color(PLOT_CONFIG.projection_line_color)
                        .width(PLOT_CONFIG.trend_line_width)
                        .style(LineStyle::dotted_dense()),
                );
            }
            plot_ui.set_plot_bounds_y(y_min..=y_max);
        });
    }
}
