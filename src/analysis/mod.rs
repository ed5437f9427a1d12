// Statistical helpers over price history
pub mod trend;

// Re-export commonly used types
pub use trend::{TrendError, TrendFit, TrendPoint, fit_linear_trend};
