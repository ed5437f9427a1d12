use eframe::egui::{Color32, CornerRadius, Frame, Margin, RichText, Stroke, Ui};

use crate::ui::config::UI_CONFIG;

/// Extension trait to add semantic styling methods directly to `egui::Ui`.
pub trait UiStyleExt {
    /// Renders small, gray text (good for labels like "Samples:").
    fn label_subdued(&mut self, text: impl Into<String>);

    /// Renders a "Label: Value" pair with consistent spacing and styling.
    /// The label is subdued, the value is colored.
    fn metric(&mut self, label: &str, value: &str, color: Color32);

    /// Renders a section header using the configured global color.
    fn label_header(&mut self, text: impl Into<String>);

    /// Renders an error message (Red).
    fn label_error(&mut self, text: impl Into<String>);

    /// Renders a warning/info message (Yellow/Gold).
    fn label_warning(&mut self, text: impl Into<String>);

    /// A bordered card with a small accent title above arbitrary content.
    fn metric_card(&mut self, title: &str, add_contents: impl FnOnce(&mut Ui));

    /// A card whose body is a single large value.
    fn value_card(&mut self, title: &str, value: impl Into<String>);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::GRAY));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0; // Tight spacing
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).small().color(color));
        });
    }

    fn label_header(&mut self, text: impl Into<String>) {
        let text = text.into().to_uppercase();
        self.heading(RichText::new(text).color(UI_CONFIG.colors.heading).monospace());
    }

    fn label_error(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(UI_CONFIG.colors.negative));
    }

    fn label_warning(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::from_rgb(255, 215, 0)));
    }

    fn metric_card(&mut self, title: &str, add_contents: impl FnOnce(&mut Ui)) {
        Frame::new()
            .fill(UI_CONFIG.colors.card_fill)
            .stroke(Stroke::new(1.0, UI_CONFIG.colors.card_border))
            .corner_radius(CornerRadius::same(UI_CONFIG.card_corner_radius))
            .inner_margin(Margin::same(16))
            .show(self, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(title)
                        .size(16.0)
                        .color(UI_CONFIG.colors.card_title),
                );
                ui.add_space(4.0);
                add_contents(ui);
            });
        self.add_space(8.0);
    }

    fn value_card(&mut self, title: &str, value: impl Into<String>) {
        let value = value.into();
        self.metric_card(title, |ui| {
            ui.label(
                RichText::new(value)
                    .size(24.0)
                    .color(UI_CONFIG.colors.card_value),
            );
        });
    }
}
