//! Every user-visible string in one place.

pub struct UiText {
    pub app_title: &'static str,
    pub window_title: &'static str,

    // Side panel
    pub selection_heading: &'static str,
    pub coin_selector_heading: &'static str,
    pub days_slider_heading: &'static str,
    pub days_slider_suffix: &'static str,
    pub trend_options_heading: &'static str,
    pub show_projection_label: &'static str,
    pub projection_days_heading: &'static str,
    pub projection_helper: &'static str,
    pub refresh_button: &'static str,

    // Price chart tab
    pub price_chart_title_prefix: &'static str,
    pub price_series_name: &'static str,
    pub plot_x_axis: &'static str,
    pub plot_y_axis_prefix: &'static str,
    pub chart_load_failed: &'static str,
    pub chart_empty: &'static str,

    // Coin info tab
    pub card_name: &'static str,
    pub card_website: &'static str,
    pub card_description: &'static str,
    pub card_logo: &'static str,
    pub info_load_failed: &'static str,
    pub info_empty: &'static str,
    pub no_homepage: &'static str,

    // Trend tab
    pub trend_heading: &'static str,
    pub trend_chart_title: &'static str,
    pub actual_series_name: &'static str,
    pub trend_series_name: &'static str,
    pub projection_series_name: &'static str,
    pub trend_not_enough_data: &'static str,
    pub trend_disclaimer: &'static str,
    pub slope_label: &'static str,
    pub intercept_label: &'static str,
    pub daily_change_label: &'static str,

    // Summary metrics
    pub latest_price_label: &'static str,
    pub change_label: &'static str,
    pub range_label: &'static str,
    pub samples_label: &'static str,

    // Status bar and loading
    pub loading_prefix: &'static str,
    pub status_source_label: &'static str,
    pub status_price_label: &'static str,
    pub status_info_label: &'static str,
    pub status_updated_label: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    app_title: "Ultra Crypto Dashboard",
    window_title: "Coin Dashboard",

    selection_heading: "Selection",
    coin_selector_heading: "Choose coin",
    days_slider_heading: "History (days)",
    days_slider_suffix: " days",
    trend_options_heading: "Trend options",
    show_projection_label: "Extend trend line",
    projection_days_heading: "Extend by",
    projection_helper: "Straight-line extrapolation, not a prediction.",
    refresh_button: "Refresh",

    price_chart_title_prefix: "Price for",
    price_series_name: "Price",
    plot_x_axis: "Date",
    plot_y_axis_prefix: "Price",
    chart_load_failed: "Failed to load chart data",
    chart_empty: "No price data for this selection",

    card_name: "Name",
    card_website: "Website",
    card_description: "Description",
    card_logo: "Logo",
    info_load_failed: "Failed to load coin info",
    info_empty: "No information available for this coin",
    no_homepage: "No homepage listed",

    trend_heading: "Price Trend",
    trend_chart_title: "Linear trend based on history",
    actual_series_name: "Actual",
    trend_series_name: "Trend",
    projection_series_name: "Extension",
    trend_not_enough_data: "Not enough data for a trend line.",
    trend_disclaimer: "Least-squares fit over the selected history. Descriptive only.",
    slope_label: "Slope / day",
    intercept_label: "Start value",
    daily_change_label: "Daily drift",

    latest_price_label: "Latest",
    change_label: "Change",
    range_label: "Range",
    samples_label: "Samples",

    loading_prefix: "Loading",
    status_source_label: "Source",
    status_price_label: "Prices",
    status_info_label: "Info",
    status_updated_label: "Updated",
};
