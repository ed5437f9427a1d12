use crate::config::DASHBOARD;
use crate::domain::coin::{Coin, VsCurrency};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("history must be between {min} and {max} days, got {days}")]
    DaysOutOfRange { days: u16, min: u16, max: u16 },
}

/// Everything that shapes a price-history request.
/// Also the cache key, so every field that changes the upstream answer lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriceQuery {
    coin: Coin,
    days: u16,
    currency: VsCurrency,
}

impl PriceQuery {
    pub fn new(coin: Coin, days: u16) -> Result<Self, QueryError> {
        Self::with_currency(coin, days, VsCurrency::default())
    }

    pub fn with_currency(coin: Coin, days: u16, currency: VsCurrency) -> Result<Self, QueryError> {
        let (min, max) = (DASHBOARD.days.min_days, DASHBOARD.days.max_days);
        if !(min..=max).contains(&days) {
            return Err(QueryError::DaysOutOfRange { days, min, max });
        }
        Ok(Self {
            coin,
            days,
            currency,
        })
    }

    /// Slider input is already bounded, so clamp instead of failing.
    pub fn clamped(coin: Coin, days: u16) -> Self {
        Self {
            coin,
            days: days.clamp(DASHBOARD.days.min_days, DASHBOARD.days.max_days),
            currency: VsCurrency::default(),
        }
    }

    pub fn coin(&self) -> Coin {
        self.coin
    }

    pub fn days(&self) -> u16 {
        self.days
    }

    pub fn currency(&self) -> VsCurrency {
        self.currency
    }
}

impl std::fmt::Display for PriceQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} ({}d)", self.coin, self.currency.code(), self.days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_whole_slider_range() {
        assert!(PriceQuery::new(Coin::Bitcoin, 1).is_ok());
        assert!(PriceQuery::new(Coin::Bitcoin, 365).is_ok());
    }

    #[test]
    fn rejects_days_outside_range() {
        assert_eq!(
            PriceQuery::new(Coin::Ethereum, 0),
            Err(QueryError::DaysOutOfRange {
                days: 0,
                min: 1,
                max: 365
            })
        );
        assert!(PriceQuery::new(Coin::Ethereum, 366).is_err());
    }

    #[test]
    fn clamped_pulls_days_into_range() {
        assert_eq!(PriceQuery::clamped(Coin::Ripple, 0).days(), 1);
        assert_eq!(PriceQuery::clamped(Coin::Ripple, 1000).days(), 365);
    }
}
