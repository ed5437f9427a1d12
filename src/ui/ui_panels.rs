use eframe::egui::{Checkbox, ComboBox, Slider, Ui};
use strum::IntoEnumIterator;

use crate::config::DASHBOARD;
use crate::domain::Coin;
use crate::ui::config::UI_TEXT;
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{colored_subsection_heading, section_heading, spaced_separator};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

/// Coin picker and history slider
pub struct SelectionPanel {
    coin: Coin,
    days: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Coin(Coin),
    /// `settled` is false while the slider is still being dragged.
    Days { days: u16, settled: bool },
    Refresh,
}

impl SelectionPanel {
    pub fn new(coin: Coin, days: u16) -> Self {
        Self { coin, days }
    }

    fn render_coin_selector(&mut self, ui: &mut Ui) -> Option<Coin> {
        let mut changed = None;
        let previous = self.coin;

        ui.label(colored_subsection_heading(UI_TEXT.coin_selector_heading));
        ComboBox::from_id_salt("coin_selector")
            .selected_text(self.coin.display_name())
            .show_ui(ui, |ui| {
                for coin in Coin::iter() {
                    ui.selectable_value(&mut self.coin, coin, coin.display_name());
                }
            });

        if self.coin != previous {
            changed = Some(self.coin);
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("A new coin was selected: {}", self.coin);
            }
        }
        changed
    }

    fn render_days_slider(&mut self, ui: &mut Ui) -> Option<SelectionEvent> {
        ui.add_space(5.0);
        ui.label(colored_subsection_heading(UI_TEXT.days_slider_heading));

        let response = ui.add(
            Slider::new(
                &mut self.days,
                DASHBOARD.days.min_days..=DASHBOARD.days.max_days,
            )
            .integer()
            .suffix(UI_TEXT.days_slider_suffix),
        );

        if response.changed() || response.drag_stopped() {
            Some(SelectionEvent::Days {
                days: self.days,
                settled: !response.dragged(),
            })
        } else {
            None
        }
    }
}

impl Panel for SelectionPanel {
    type Event = SelectionEvent;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.selection_heading);

        if let Some(coin) = self.render_coin_selector(ui) {
            events.push(SelectionEvent::Coin(coin));
        }
        spaced_separator(ui);

        if let Some(event) = self.render_days_slider(ui) {
            events.push(event);
        }
        ui.add_space(10.0);

        if ui.button(UI_TEXT.refresh_button).clicked() {
            events.push(SelectionEvent::Refresh);
        }
        ui.add_space(20.0);
        events
    }
}

/// Opt-in extrapolation controls for the Trend tab
pub struct TrendOptionsPanel {
    show_projection: bool,
    projection_days: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendOptionsEvent {
    ShowProjection(bool),
    ProjectionDays(u16),
}

impl TrendOptionsPanel {
    pub fn new(show_projection: bool, projection_days: u16) -> Self {
        Self {
            show_projection,
            projection_days,
        }
    }
}

impl Panel for TrendOptionsPanel {
    type Event = TrendOptionsEvent;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.trend_options_heading);

        if ui
            .add(Checkbox::new(
                &mut self.show_projection,
                UI_TEXT.show_projection_label,
            ))
            .changed()
        {
            events.push(TrendOptionsEvent::ShowProjection(self.show_projection));
        }

        ui.add_enabled_ui(self.show_projection, |ui| {
            ui.label(colored_subsection_heading(UI_TEXT.projection_days_heading));
            let response = ui.add(
                Slider::new(
                    &mut self.projection_days,
                    1..=DASHBOARD.trend_extension.max_days,
                )
                .integer()
                .suffix(UI_TEXT.days_slider_suffix),
            );
            if response.changed() {
                events.push(TrendOptionsEvent::ProjectionDays(self.projection_days));
            }
        });
        ui.label_subdued(UI_TEXT.projection_helper);

        ui.add_space(20.0);
        events
    }
}
