//! Dashboard selection limits and defaults

/// Configuration for the History (days) slider
pub struct DaysRangeConfig {
    pub min_days: u16,
    pub max_days: u16,
    pub default_days: u16,
}

/// Settings for the opt-in trend extrapolation on the Trend tab
pub struct TrendExtensionConfig {
    pub default_days: u16,
    pub max_days: u16,
}

/// The Master Dashboard Configuration
pub struct DashboardConfig {
    pub days: DaysRangeConfig,
    pub trend_extension: TrendExtensionConfig,
    /// How many predicted values the trend report prints before eliding
    pub report_max_rows: usize,
}

pub const DASHBOARD: DashboardConfig = DashboardConfig {
    days: DaysRangeConfig {
        min_days: 1,
        max_days: 365,
        default_days: 90,
    },
    trend_extension: TrendExtensionConfig {
        default_days: 7,
        max_days: 90,
    },
    report_max_rows: 10,
};
