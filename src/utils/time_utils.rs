use chrono::{DateTime, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    pub const STANDARD_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
}

/// Converts upstream epoch milliseconds into a UTC calendar date-time.
/// Returns `None` for values chrono cannot represent.
pub fn epoch_ms_to_datetime(epoch_ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(epoch_ms)
}

pub fn epoch_ms_to_utc(epoch_ms: i64) -> String {
    // Used for display purposes
    match epoch_ms_to_datetime(epoch_ms) {
        Some(dt) => dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string(),
        None => String::new(),
    }
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(TimeUtils::STANDARD_DATETIME_FORMAT).to_string()
}

/// Whole days from `earlier` to `later`, truncated towards zero.
/// 47 hours counts as 1 day.
pub fn whole_days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    (later - earlier).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_epoch_ms_to_date() {
        // 2024-01-01T00:00:00Z
        assert_eq!(epoch_ms_to_utc(1_704_067_200_000), "2024-01-01");
    }

    #[test]
    fn partial_days_are_truncated() {
        let start = epoch_ms_to_datetime(0).unwrap();
        let almost_two = epoch_ms_to_datetime(TimeUtils::MS_IN_D * 2 - 1).unwrap();
        assert_eq!(whole_days_between(start, almost_two), 1);
        assert_eq!(whole_days_between(start, start), 0);
    }
}
