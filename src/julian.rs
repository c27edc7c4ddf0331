//! Julian Date Conversion Module
//!
//! Converts between calendar instants and Julian dates. All conversions go
//! through UTC; the display offset of an instant never affects its Julian date.

use chrono::{DateTime, TimeZone, Utc};

// ===================== CONSTANTS =====================

/// Milliseconds per day
pub const DAY_MS: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Julian date of 1970-01-01 12:00 UTC
pub const J1970: f64 = 2_440_588.0;

/// Julian date of the J2000.0 epoch (2000-01-01 12:00 TT)
pub const J2000: f64 = 2_451_545.0;

/// Correction between a day count starting at midnight and the Julian day,
/// which starts at noon. Subtracted when converting to Julian dates and
/// added back when converting from them.
pub const JULIAN_DAY_CORRECTION: f64 = 0.5;

// ===================== CONVERSIONS =====================

/// Convert a calendar instant to a Julian date.
///
/// # Arguments
/// * `date` - Instant in any timezone (converted to UTC first)
///
/// # Returns
/// Continuous Julian date, e.g. `2451545.0` for 2000-01-01 12:00 UTC
pub fn to_julian_date<Tz: TimeZone>(date: &DateTime<Tz>) -> f64 {
    date.timestamp_millis() as f64 / DAY_MS - JULIAN_DAY_CORRECTION + J1970
}

/// Convert a Julian date back to a UTC calendar instant.
///
/// Non-finite input (typically a NaN produced by an unsolvable hour angle)
/// and dates outside the representable range yield `None`, the
/// "not available" sentinel, instead of a corrupted instant.
///
/// # Arguments
/// * `j` - Julian date
///
/// # Returns
/// The instant rounded to the nearest millisecond, or `None`
pub fn from_julian_date(j: f64) -> Option<DateTime<Utc>> {
    if !j.is_finite() {
        log::debug!("julian date {j} is not finite; no calendar instant");
        return None;
    }
    let ms = ((j + JULIAN_DAY_CORRECTION - J1970) * DAY_MS).round();
    if ms.abs() >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(ms as i64)
}

/// Days elapsed since J2000.0.
pub fn days_since_j2000<Tz: TimeZone>(date: &DateTime<Tz>) -> f64 {
    to_julian_date(date) - J2000
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::FixedOffset;
    use proptest::prelude::*;

    #[test]
    fn test_j2000_epoch() {
        let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_abs_diff_eq!(to_julian_date(&epoch), J2000, epsilon = 1e-9);
        assert_abs_diff_eq!(days_since_j2000(&epoch), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unix_epoch_is_half_day_before_j1970() {
        let unix = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert_abs_diff_eq!(to_julian_date(&unix), 2_440_587.5, epsilon = 1e-9);
    }

    #[test]
    fn test_offset_does_not_change_julian_date() {
        let utc = Utc.with_ymd_and_hms(2015, 5, 29, 2, 0, 0).unwrap();
        let sydney = utc.with_timezone(&FixedOffset::east_opt(10 * 3600).unwrap());
        assert_eq!(to_julian_date(&utc), to_julian_date(&sydney));
    }

    #[test]
    fn test_nan_yields_sentinel() {
        assert!(from_julian_date(f64::NAN).is_none());
        assert!(from_julian_date(f64::INFINITY).is_none());
        assert!(from_julian_date(f64::NEG_INFINITY).is_none());
        assert!(from_julian_date(1e300).is_none());
    }

    #[test]
    fn test_from_julian_known_date() {
        let t = from_julian_date(J2000).unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap());
    }

    proptest! {
        #[test]
        fn julian_round_trip_within_one_second(secs in -6_000_000_000i64..=6_000_000_000i64) {
            let t = DateTime::from_timestamp(secs, 0).unwrap();
            let back = from_julian_date(to_julian_date(&t)).unwrap();
            prop_assert!((back - t).num_milliseconds().abs() <= 1000);
        }
    }
}
