use argminmax::ArgMinMax;

pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// `None` for an empty slice (argminmax has no answer for it).
pub fn get_min_max(vec: &[f64]) -> Option<(f64, f64)> {
    if vec.is_empty() {
        return None;
    }
    Some((get_min(vec), get_max(vec)))
}

/// Widens `(min, max)` by `padding_pct` of its span on both sides.
/// A flat range still gets a small non-zero span so plot bounds stay valid.
pub fn padded_range(min: f64, max: f64, padding_pct: f64) -> (f64, f64) {
    let span = (max - min).max(1e-8);
    let padding = span * padding_pct;
    (min - padding, max + padding)
}

/// Percentage move from `first` to `last`. `None` when `first` is zero.
pub fn percent_change(first: f64, last: f64) -> Option<f64> {
    if first == 0.0 {
        return None;
    }
    Some((last - first) / first * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_max_of_prices() {
        assert_eq!(get_min_max(&[3.0, 1.5, 9.25, 4.0]), Some((1.5, 9.25)));
        assert_eq!(get_min_max(&[]), None);
    }

    #[test]
    fn padding_is_symmetric() {
        let (lo, hi) = padded_range(100.0, 200.0, 0.1);
        assert!((lo - 90.0).abs() < 1e-9);
        assert!((hi - 210.0).abs() < 1e-9);
    }

    #[test]
    fn percent_change_handles_zero_base() {
        assert_eq!(percent_change(0.0, 10.0), None);
        let pct = percent_change(100.0, 104.0).unwrap();
        assert!((pct - 4.0).abs() < 1e-9);
    }
}
