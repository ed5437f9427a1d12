use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub status_panel: Color32,
    pub card_fill: Color32,
    pub card_border: Color32,
    pub card_title: Color32,
    pub card_value: Color32,
    pub tab_accents: [Color32; 3],
    pub positive: Color32,
    pub negative: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub side_panel_min_width: f32,
    pub card_corner_radius: u8,
    /// Repaint cadence while any fetch is still running
    pub loading_repaint_ms: u64,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::from_rgb(201, 209, 217), // This sets every label globally to this color
        heading: Color32::from_rgb(10, 255, 239), // Sets every heading
        subsection_heading: Color32::from_rgb(139, 92, 246),
        central_panel: Color32::from_rgb(13, 17, 23),
        side_panel: Color32::from_rgb(8, 11, 16),
        status_panel: Color32::from_rgb(18, 18, 20),
        card_fill: Color32::from_rgba_premultiplied(8, 8, 8, 8),
        card_border: Color32::from_rgb(44, 44, 46),
        card_title: Color32::from_rgb(255, 0, 204),
        card_value: Color32::from_rgb(10, 255, 239),
        tab_accents: [
            Color32::from_rgb(139, 92, 246), // Price Chart
            Color32::from_rgb(255, 0, 204),  // Coin Info
            Color32::from_rgb(0, 255, 136),  // Trend
        ],
        positive: Color32::from_rgb(130, 200, 140),
        negative: Color32::from_rgb(255, 100, 100),
    },
    side_panel_min_width: 180.0,
    card_corner_radius: 16,
    loading_repaint_ms: 100,
};
