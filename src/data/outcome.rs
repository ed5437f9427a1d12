use crate::models::{PricePoint, PriceSeries};

/// Why a fetch produced no data. Cloneable so a failure can sit in the cache.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Transport(String),
    #[error("upstream returned HTTP {code}")]
    Status { code: u16 },
    #[error("could not decode upstream response: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::Status { code: 429 })
    }

    /// Network trouble on our side, as opposed to an answer from the upstream.
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Timeout(_) | FetchError::Transport(_))
    }
}

/// Result of one upstream lookup.
///
/// `Empty` means the upstream answered but had nothing for us (an empty price
/// array, or no such coin). `Failed` means we did not get a usable answer.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Ready(T),
    Empty,
    Failed(FetchError),
}

impl<T> FetchOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, FetchOutcome::Ready(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FetchOutcome::Empty)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchOutcome::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            FetchOutcome::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Ready(value) => FetchOutcome::Ready(f(value)),
            FetchOutcome::Empty => FetchOutcome::Empty,
            FetchOutcome::Failed(err) => FetchOutcome::Failed(err),
        }
    }

    /// Short tag for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            FetchOutcome::Ready(_) => "ready",
            FetchOutcome::Empty => "empty",
            FetchOutcome::Failed(_) => "failed",
        }
    }
}

impl FetchOutcome<PriceSeries> {
    /// The fetched points, or an empty slice for `Empty` / `Failed`.
    pub fn points(&self) -> &[PricePoint] {
        self.ready().map(PriceSeries::points).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_price_outcome_has_no_points() {
        let outcome: FetchOutcome<PriceSeries> =
            FetchOutcome::Failed(FetchError::Status { code: 500 });
        assert!(outcome.points().is_empty());
        assert!(outcome.is_failed());
        assert_eq!(outcome.label(), "failed");
    }

    #[test]
    fn error_kinds_are_distinguishable() {
        assert!(FetchError::Status { code: 429 }.is_rate_limited());
        assert!(!FetchError::Status { code: 500 }.is_network());
        assert!(FetchError::Timeout("slow".into()).is_network());
    }

    #[test]
    fn map_keeps_the_variant() {
        let ready: FetchOutcome<u32> = FetchOutcome::Ready(2);
        assert_eq!(ready.map(|v| v * 10), FetchOutcome::Ready(20));
        let empty: FetchOutcome<u32> = FetchOutcome::Empty;
        assert_eq!(empty.map(|v| v * 10), FetchOutcome::Empty);
    }
}
