use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::maths_utils;
use crate::utils::time_utils::epoch_ms_to_datetime;

/// One upstream sample. `date` is derived from `timestamp_ms` when the point is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
    pub date: DateTime<Utc>,
}

impl PricePoint {
    /// `None` when the timestamp is outside chrono's representable range.
    pub fn from_epoch_ms(timestamp_ms: i64, price: f64) -> Option<Self> {
        let date = epoch_ms_to_datetime(timestamp_ms)?;
        Some(Self {
            timestamp_ms,
            price,
            date,
        })
    }
}

/// Price history in the order the upstream returned it (never re-sorted).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Earliest date in the series (not necessarily the first point).
    pub fn min_date(&self) -> Option<DateTime<Utc>> {
        self.points.iter().map(|p| p.date).min()
    }

    pub fn price_range(&self) -> Option<(f64, f64)> {
        maths_utils::get_min_max(&self.prices())
    }

    /// Move from the first to the last sample, in percent.
    pub fn change_pct(&self) -> Option<f64> {
        let first = self.first()?;
        let last = self.last()?;
        maths_utils::percent_change(first.price, last.price)
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
