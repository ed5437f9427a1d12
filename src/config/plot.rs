//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    pub price_line_color: Color32,
    pub trend_line_color: Color32,
    pub projection_line_color: Color32,
    /// Width of the price series line
    pub price_line_width: f32,
    /// Width of the fitted trend line (drawn dashed)
    pub trend_line_width: f32,
    /// Vertical headroom above and below the price range (fraction of span)
    pub y_padding_pct: f64,
    /// Number of labelled ticks on the price axis
    pub y_axis_divisions: u32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    price_line_color: Color32::from_rgb(139, 92, 246), // Violet
    trend_line_color: Color32::from_rgb(10, 255, 239), // Cyan
    projection_line_color: Color32::from_rgb(255, 0, 204), // Magenta
    price_line_width: 3.0,
    trend_line_width: 2.0,
    y_padding_pct: 0.1,
    y_axis_divisions: 5,
};
