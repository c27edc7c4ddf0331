//! Sun Brightness Module
//!
//! A linear daylight ramp: 0 at night, rising to 1 between dawn and the end
//! of sunrise, 1 through the day, falling back to 0 between the start of
//! sunset and dusk.
//!
//! This is not physical and ignores the actual sun altitude. Instants are
//! compared in whole minutes since local midnight of the transit's date in
//! the day info's display offset. Phases before that midnight count as
//! negative minutes and phases after the next one count past 1440.

use chrono::{DateTime, FixedOffset, TimeZone};

use crate::coords::HorizonState;
use crate::day_info::{DayInfo, SunEvent};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Local midnight opening the day described by `info`.
pub fn day_start(info: &DayInfo) -> Option<DateTime<FixedOffset>> {
    let transit = info.transit?;
    transit.date_naive().and_hms_opt(0, 0, 0)?.and_local_timezone(*transit.offset()).single()
}

/// Whole minutes from `start` to `t`, rounded down.
pub fn minutes_since<Tz: TimeZone>(start: &DateTime<FixedOffset>, t: &DateTime<Tz>) -> i64 {
    (t.with_timezone(start.offset()) - *start).num_seconds().div_euclid(60)
}

/// Ramp boundaries of a day in minutes since its local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMinutes {
    pub midnight: DateTime<FixedOffset>,
    pub rise_start: i64,
    pub rise_end: i64,
    pub set_start: i64,
    pub set_end: i64,
}

impl DayMinutes {
    /// Boundaries of `info`, or `None` if the whole disc never clears the
    /// horizon or never starts to set.
    ///
    /// No dawn or dusk means the sun never sinks to -6°; the ramps then
    /// start at minute 0 and end at minute 1440.
    pub fn new(info: &DayInfo) -> Option<Self> {
        let midnight = day_start(info)?;
        let at = |e: SunEvent| e.map(|t| minutes_since(&midnight, &t));

        Some(Self {
            midnight,
            rise_start: at(info.dawn).unwrap_or(0),
            rise_end: at(info.sunrise.end)?,
            set_start: at(info.sunset.start)?,
            set_end: at(info.dusk).unwrap_or(MINUTES_PER_DAY),
        })
    }

    /// Minute of `t` on this day's scale.
    pub fn minute_of<Tz: TimeZone>(&self, t: &DateTime<Tz>) -> i64 {
        minutes_since(&self.midnight, t)
    }
}

/// Brightness for an empty ramp is its endpoint value.
fn ramp(cur: i64, start: i64, end: i64) -> f64 {
    if end <= start {
        return 1.0;
    }
    (cur - start) as f64 / (end - start) as f64
}

/// Brightness of the sky in [0, 1] at `time` for the day described by `info`.
///
/// # Arguments
/// * `info` - Light phases of the day containing `time`
/// * `time` - Query instant, any timezone
pub fn sun_brightness<Tz: TimeZone>(info: &DayInfo, time: &DateTime<Tz>) -> f64 {
    let Some(day) = DayMinutes::new(info) else {
        return match info.daylight {
            HorizonState::AlwaysAbove => 1.0,
            HorizonState::AlwaysBelow => 0.0,
            // Sun only grazes the horizon
            HorizonState::Crosses => 0.0,
        };
    };

    let cur = day.minute_of(time);

    if cur >= day.rise_start && cur <= day.rise_end {
        return ramp(cur, day.rise_start, day.rise_end);
    }

    if cur >= day.set_start && cur <= day.set_end {
        return 1.0 - ramp(cur, day.set_start, day.set_end);
    }

    if cur < day.rise_start || cur > day.set_end {
        return 0.0;
    }

    1.0
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day_info::SunCalc;
    use chrono::{Duration, FixedOffset, Utc};
    use proptest::prelude::*;

    fn paris_summer() -> DayInfo {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let noon = offset.with_ymd_and_hms(2021, 7, 14, 12, 0, 0).unwrap();
        SunCalc::new(48.85, 2.35).with_offset(offset).day_info(&noon, false)
    }

    #[test]
    fn test_boundary_values() {
        let info = paris_summer();

        assert_eq!(sun_brightness(&info, &info.dawn.unwrap()), 0.0);
        assert_eq!(sun_brightness(&info, &info.sunrise.end.unwrap()), 1.0);
        assert_eq!(sun_brightness(&info, &info.sunset.start.unwrap()), 1.0);
        assert_eq!(sun_brightness(&info, &info.dusk.unwrap()), 0.0);
        assert_eq!(sun_brightness(&info, &info.transit.unwrap()), 1.0);
    }

    #[test]
    fn test_night_is_dark() {
        let info = paris_summer();
        let early = info.dawn.unwrap() - Duration::minutes(30);
        let late = info.dusk.unwrap() + Duration::minutes(30);

        assert_eq!(sun_brightness(&info, &early), 0.0);
        assert_eq!(sun_brightness(&info, &late), 0.0);
    }

    #[test]
    fn test_ramps_are_monotonic() {
        let info = paris_summer();

        let mut t = info.dawn.unwrap();
        let mut prev = -1.0;
        while t <= info.sunrise.end.unwrap() {
            let b = sun_brightness(&info, &t);
            assert!(b >= prev && (0.0..=1.0).contains(&b));
            prev = b;
            t += Duration::minutes(1);
        }

        let mut t = info.sunset.start.unwrap();
        let mut prev = 2.0;
        while t <= info.dusk.unwrap() {
            let b = sun_brightness(&info, &t);
            assert!(b <= prev && (0.0..=1.0).contains(&b));
            prev = b;
            t += Duration::minutes(1);
        }
    }

    #[test]
    fn test_query_timezone_is_converted() {
        let info = paris_summer();
        let transit_utc = info.transit.unwrap().with_timezone(&Utc);
        assert_eq!(sun_brightness(&info, &transit_utc), 1.0);

        let midnight_utc = Utc.with_ymd_and_hms(2021, 7, 14, 22, 30, 0).unwrap();
        assert_eq!(sun_brightness(&info, &midnight_utc), 0.0);
    }

    #[test]
    fn test_polar_fallbacks() {
        let calc = SunCalc::new(70.0, 0.0);
        let winter_noon = Utc.with_ymd_and_hms(2015, 12, 21, 12, 0, 0).unwrap();
        let summer_noon = Utc.with_ymd_and_hms(2015, 6, 21, 12, 0, 0).unwrap();

        let winter = calc.day_info(&winter_noon, false);
        let summer = calc.day_info(&summer_noon, false);

        assert_eq!(sun_brightness(&winter, &winter_noon), 0.0);
        assert_eq!(sun_brightness(&summer, &summer_noon), 1.0);
        assert_eq!(sun_brightness(&summer, &(summer_noon + Duration::hours(12))), 1.0);
    }

    #[test]
    fn test_missing_dusk_extends_ramp_to_midnight() {
        // 62°N around the June solstice: sunset happens, -6° does not
        let offset = FixedOffset::east_opt(0).unwrap();
        let noon = offset.with_ymd_and_hms(2021, 6, 21, 12, 0, 0).unwrap();
        let info = SunCalc::new(62.0, 0.0).day_info(&noon, false);

        assert!(info.dusk.is_none() && info.sunset.start.is_some());
        let b = sun_brightness(&info, &offset.with_ymd_and_hms(2021, 6, 21, 23, 59, 0).unwrap());
        assert!(b > 0.0 && b < 1.0, "brightness {b}");
    }

    fn helsinki_midsummer() -> (FixedOffset, DayInfo) {
        let offset = FixedOffset::east_opt(3 * 3600).unwrap();
        let noon = offset.with_ymd_and_hms(2021, 6, 21, 12, 0, 0).unwrap();
        (offset, SunCalc::new(60.17, 24.94).with_offset(offset).day_info(&noon, false))
    }

    #[test]
    fn test_dusk_after_local_midnight() {
        let (offset, info) = helsinki_midsummer();
        let dusk = info.dusk.unwrap();
        assert_eq!(dusk.date_naive(), chrono::NaiveDate::from_ymd_opt(2021, 6, 22).unwrap());

        let day = DayMinutes::new(&info).unwrap();
        assert_eq!(day.set_end, 24 * 60 + 43);

        for hour in [10, 15, 20, 22] {
            let t = offset.with_ymd_and_hms(2021, 6, 21, hour, 0, 0).unwrap();
            assert_eq!(sun_brightness(&info, &t), 1.0, "at {t}");
        }

        let late = offset.with_ymd_and_hms(2021, 6, 21, 23, 30, 0).unwrap();
        let b = sun_brightness(&info, &late);
        assert!(b > 0.0 && b < 1.0, "brightness {b}");

        assert_eq!(sun_brightness(&info, &info.sunset.start.unwrap()), 1.0);
        assert_eq!(sun_brightness(&info, &dusk), 0.0);
        assert_eq!(sun_brightness(&info, &(dusk + Duration::minutes(10))), 0.0);
    }

    #[test]
    fn test_dawn_on_previous_utc_day() {
        let noon = Utc.with_ymd_and_hms(2015, 5, 29, 2, 0, 0).unwrap();
        let info = SunCalc::new(-33.86, 151.21).day_info(&noon, false);

        let day = DayMinutes::new(&info).unwrap();
        assert!(day.rise_start < 0 && day.rise_end < 0);
        assert!(day.set_start > 0 && day.set_end < 24 * 60);

        assert_eq!(sun_brightness(&info, &info.dawn.unwrap()), 0.0);
        assert_eq!(sun_brightness(&info, &info.sunrise.end.unwrap()), 1.0);
        assert_eq!(sun_brightness(&info, &info.transit.unwrap()), 1.0);
        assert_eq!(sun_brightness(&info, &Utc.with_ymd_and_hms(2015, 5, 29, 4, 0, 0).unwrap()), 1.0);

        let evening = sun_brightness(&info, &Utc.with_ymd_and_hms(2015, 5, 29, 7, 10, 0).unwrap());
        assert!(evening > 0.0 && evening < 1.0, "brightness {evening}");
        assert_eq!(sun_brightness(&info, &Utc.with_ymd_and_hms(2015, 5, 29, 12, 0, 0).unwrap()), 0.0);
    }

    proptest! {
        #[test]
        fn boundary_values_hold_in_local_offset(
            day in 0i64..36_500,
            lat in -55.0f64..55.0,
            lon in -180.0f64..180.0,
        ) {
            let hours = (lon / 15.0).round() as i32;
            let offset = FixedOffset::east_opt(hours * 3600).unwrap();
            let noon = offset.with_ymd_and_hms(1970, 1, 1, 12, 0, 0).unwrap() + Duration::days(day);
            let info = SunCalc::new(lat, lon).with_offset(offset).day_info(&noon, false);

            prop_assert_eq!(sun_brightness(&info, &info.dawn.unwrap()), 0.0);
            prop_assert_eq!(sun_brightness(&info, &info.sunrise.end.unwrap()), 1.0);
            prop_assert_eq!(sun_brightness(&info, &info.transit.unwrap()), 1.0);
            prop_assert_eq!(sun_brightness(&info, &info.sunset.start.unwrap()), 1.0);
            prop_assert_eq!(sun_brightness(&info, &info.dusk.unwrap()), 0.0);
        }
    }
}
