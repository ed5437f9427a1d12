use eframe::egui::{Context, RichText, Ui, Visuals};

use crate::domain::VsCurrency;
use crate::ui::config::UI_CONFIG;

/// Creates a colored heading with uppercase text and monospace font
pub fn colored_heading(text: impl Into<String>) -> RichText {
    let uppercase_text = text.into().to_uppercase() + ":";
    RichText::new(uppercase_text)
        .color(UI_CONFIG.colors.heading)
        .monospace()
}

/// Creates a colored sub-section heading using the configured label color
pub fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;
    visuals.extreme_bg_color = UI_CONFIG.colors.central_panel;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.hyperlink_color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// Creates a section heading with standard spacing
pub fn section_heading(ui: &mut Ui, text: impl Into<String>) {
    ui.add_space(10.0);
    ui.heading(colored_heading(text));
    ui.add_space(5.0);
}

/// Creates a separator with standard spacing
pub fn spaced_separator(ui: &mut Ui) {
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

/// Price with a currency symbol and precision that scales with magnitude.
/// - Large (>=1000): 2 decimals, thousands grouped ($95,123.50)
/// - Medium (>=1): 4 decimals ($12.4829)
/// - Pennies (>=0.01): 5 decimals
/// - Below that: 8 decimals ($0.00000231)
pub fn format_price(price: f64, currency: VsCurrency) -> String {
    let symbol = currency.symbol();
    if price == 0.0 {
        return format!("{symbol}0.00");
    }
    let sign = if price < 0.0 { "-" } else { "" };
    let abs_price = price.abs();

    let body = if abs_price >= 1000.0 {
        group_thousands(&format!("{:.2}", abs_price))
    } else if abs_price >= 1.0 {
        format!("{:.4}", abs_price)
    } else if abs_price >= 0.01 {
        format!("{:.5}", abs_price)
    } else {
        format!("{:.8}", abs_price)
    };
    format!("{sign}{symbol}{body}")
}

/// Signed percentage with two decimals, e.g. "+3.25%".
pub fn format_pct(pct: f64) -> String {
    format!("{:+.2}%", pct)
}

fn group_thousands(fixed: &str) -> String {
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed, ""));
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(fixed.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    if frac_part.is_empty() {
        grouped
    } else {
        format!("{grouped}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_precision_follows_magnitude() {
        let usd = VsCurrency::Usd;
        assert_eq!(format_price(95_123.5, usd), "$95,123.50");
        assert_eq!(format_price(1_234_567.891, usd), "$1,234,567.89");
        assert_eq!(format_price(12.48291, usd), "$12.4829");
        assert_eq!(format_price(0.0523, usd), "$0.05230");
        assert_eq!(format_price(0.00000231, usd), "$0.00000231");
        assert_eq!(format_price(0.0, usd), "$0.00");
        assert_eq!(format_price(-2500.0, usd), "-$2,500.00");
    }

    #[test]
    fn pct_is_signed() {
        assert_eq!(format_pct(3.254), "+3.25%");
        assert_eq!(format_pct(-0.5), "-0.50%");
    }
}
