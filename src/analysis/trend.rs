//! Least-squares straight line through a price series.
//!
//! The x axis is whole days since the earliest sample, so intraday points on
//! the same calendar offset share an x value. This is a descriptive trend,
//! not a forecast; extrapolation is only available through [`TrendFit::extend`].

use statrs::statistics::Statistics;

use crate::models::PriceSeries;
use crate::utils::time_utils::whole_days_between;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrendError {
    #[error(
        "need at least two points on different days to fit a trend (got {points} points over {distinct_offsets} day offsets)"
    )]
    InsufficientData {
        points: usize,
        distinct_offsets: usize,
    },
    #[error("price series contains a non-finite value")]
    NonFinite,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub day_offset: i64,
    pub predicted_price: f64,
}

/// `price = slope * day_offset + intercept`, plus the fitted value for every
/// input point (same length, same order).
#[derive(Debug, Clone, PartialEq)]
pub struct TrendFit {
    pub slope: f64,
    pub intercept: f64,
    pub points: Vec<TrendPoint>,
}

impl TrendFit {
    /// Value of the line at any offset, inside the sample or not.
    pub fn project(&self, day_offset: i64) -> f64 {
        self.slope * day_offset as f64 + self.intercept
    }

    /// One point per day after the last fitted offset, `days_ahead` of them.
    pub fn extend(&self, days_ahead: u16) -> Vec<TrendPoint> {
        let last = self.points.iter().map(|p| p.day_offset).max().unwrap_or(0);
        (1..=i64::from(days_ahead))
            .map(|step| {
                let day_offset = last + step;
                TrendPoint {
                    day_offset,
                    predicted_price: self.project(day_offset),
                }
            })
            .collect()
    }

    /// Change per day as a percentage of the line's starting value.
    pub fn daily_change_pct(&self) -> Option<f64> {
        (self.intercept != 0.0).then(|| self.slope / self.intercept * 100.0)
    }
}

/// Ordinary least squares over (day offset, price).
pub fn fit_linear_trend(series: &PriceSeries) -> Result<TrendFit, TrendError> {
    let offsets = day_offsets(series);
    let prices = series.prices();

    if prices.iter().any(|p| !p.is_finite()) {
        return Err(TrendError::NonFinite);
    }

    let mut distinct = offsets.clone();
    distinct.sort_unstable();
    distinct.dedup();
    let insufficient = TrendError::InsufficientData {
        points: prices.len(),
        distinct_offsets: distinct.len(),
    };
    if distinct.len() < 2 {
        return Err(insufficient);
    }

    let xs: Vec<f64> = offsets.iter().map(|&d| d as f64).collect();
    let x_variance = xs.iter().variance();
    if x_variance == 0.0 || !x_variance.is_finite() {
        return Err(insufficient);
    }

    // Sample covariance over sample variance; the n-1 terms cancel.
    let slope = xs.iter().covariance(prices.iter()) / x_variance;
    let intercept = prices.iter().mean() - slope * xs.iter().mean();
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(TrendError::NonFinite);
    }

    let points = offsets
        .iter()
        .map(|&day_offset| TrendPoint {
            day_offset,
            predicted_price: slope * day_offset as f64 + intercept,
        })
        .collect();

    Ok(TrendFit {
        slope,
        intercept,
        points,
    })
}

/// Whole days from the earliest sample to each point, in series order.
pub fn day_offsets(series: &PriceSeries) -> Vec<i64> {
    let Some(min_date) = series.min_date() else {
        return Vec::new();
    };
    series
        .iter()
        .map(|p| whole_days_between(min_date, p.date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricePoint;
    use crate::utils::TimeUtils;

    const T0: i64 = 1_700_000_000_000;

    fn series(samples: &[(i64, f64)]) -> PriceSeries {
        samples
            .iter()
            .map(|&(ts, price)| PricePoint::from_epoch_ms(ts, price).unwrap())
            .collect()
    }

    fn daily(prices: &[f64]) -> PriceSeries {
        let samples: Vec<(i64, f64)> = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| (T0 + i as i64 * TimeUtils::MS_IN_D, p))
            .collect();
        series(&samples)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn perfect_line_is_recovered() {
        let fit = fit_linear_trend(&daily(&[100.0, 102.0, 104.0])).unwrap();
        assert!(close(fit.slope, 2.0));
        assert!(close(fit.intercept, 100.0));
        let predicted: Vec<f64> = fit.points.iter().map(|p| p.predicted_price).collect();
        assert_eq!(predicted.len(), 3);
        for (got, want) in predicted.iter().zip([100.0, 102.0, 104.0]) {
            assert!(close(*got, want), "{got} != {want}");
        }
    }

    #[test]
    fn noisy_series_gets_least_squares_line() {
        // x = 0..4, y = 1, 3, 2, 5 -> slope 1.1, intercept 1.1
        let fit = fit_linear_trend(&daily(&[1.0, 3.0, 2.0, 5.0])).unwrap();
        assert!(close(fit.slope, 1.1));
        assert!(close(fit.intercept, 1.1));
    }

    #[test]
    fn fitting_twice_gives_the_same_answer() {
        let s = daily(&[5.0, 9.0, 4.0, 12.0, 7.5]);
        assert_eq!(fit_linear_trend(&s), fit_linear_trend(&s));
    }

    #[test]
    fn too_few_points_is_insufficient() {
        assert_eq!(
            fit_linear_trend(&PriceSeries::default()),
            Err(TrendError::InsufficientData {
                points: 0,
                distinct_offsets: 0
            })
        );
        assert!(matches!(
            fit_linear_trend(&daily(&[42.0])),
            Err(TrendError::InsufficientData { points: 1, .. })
        ));
    }

    #[test]
    fn same_day_points_are_insufficient() {
        let s = series(&[
            (T0, 100.0),
            (T0 + TimeUtils::MS_IN_H, 101.0),
            (T0 + 5 * TimeUtils::MS_IN_H, 99.0),
        ]);
        assert_eq!(
            fit_linear_trend(&s),
            Err(TrendError::InsufficientData {
                points: 3,
                distinct_offsets: 1
            })
        );
    }

    #[test]
    fn offsets_are_whole_days_from_the_earliest_point() {
        let s = series(&[
            (T0 + 2 * TimeUtils::MS_IN_D, 3.0),
            (T0, 1.0),
            (T0 + TimeUtils::MS_IN_D + 23 * TimeUtils::MS_IN_H, 2.0),
        ]);
        assert_eq!(day_offsets(&s), vec![2, 0, 1]);
        let fit = fit_linear_trend(&s).unwrap();
        assert_eq!(
            fit.points.iter().map(|p| p.day_offset).collect::<Vec<_>>(),
            vec![2, 0, 1]
        );
    }

    #[test]
    fn non_finite_prices_are_rejected() {
        assert_eq!(
            fit_linear_trend(&daily(&[1.0, f64::NAN, 3.0])),
            Err(TrendError::NonFinite)
        );
    }

    #[test]
    fn extension_continues_after_the_last_offset() {
        let fit = fit_linear_trend(&daily(&[100.0, 102.0, 104.0])).unwrap();
        let ahead = fit.extend(2);
        assert_eq!(ahead.len(), 2);
        assert_eq!(ahead[0].day_offset, 3);
        assert_eq!(ahead[1].day_offset, 4);
        assert!(close(ahead[0].predicted_price, 106.0));
        assert!(close(ahead[1].predicted_price, 108.0));
        assert!(fit.extend(0).is_empty());
    }
}
