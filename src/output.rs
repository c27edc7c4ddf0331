//! Output Formatting Module
//!
//! String renderings of sun events and day info, and the terminal output of
//! the command-line tool. A missing event renders as [`NOT_AVAILABLE`].

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::coords::HorizonState;
use crate::day_info::{DayInfo, SunEvent};
use crate::moon::MoonPosition;
use crate::solar::Position;
use crate::time::{format_hms, format_offset};

/// Rendering of an event that does not happen
pub const NOT_AVAILABLE: &str = "n.a.";

// ===================== EVENT FORMATTING =====================

/// Format an event with a chrono pattern, or "n.a." if it is missing.
pub fn format_event(e: SunEvent, pattern: &str) -> String {
    match e {
        Some(t) => t.format(pattern).to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `HH:MM:SS`
pub fn format_time(e: SunEvent) -> String {
    format_event(e, "%H:%M:%S")
}

/// `YYYY-MM-DD`
pub fn format_date(e: SunEvent) -> String {
    format_event(e, "%Y-%m-%d")
}

/// `YYYY-MM-DD HH:MM:SS`
pub fn format_date_time(e: SunEvent) -> String {
    format_event(e, "%Y-%m-%d %H:%M:%S")
}

// ===================== LEGENDS =====================

/// Level of detail of a day legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legend {
    /// Dawn, sunrise, solar noon, sunset, dusk
    Compact,
    /// Every phase of the day as a time range
    Detailed,
}

/// Render a day as a multi-line legend.
///
/// The detailed legend needs [`DayInfo::extended`]; without it the compact
/// legend is returned.
pub fn info_to_string(info: &DayInfo, legend: Legend) -> String {
    match (legend, info.extended.as_ref()) {
        (Legend::Detailed, Some(ext)) => {
            let range = |start: SunEvent, end: SunEvent, label: &str| {
                format!("{}-{} - {}", format_time(start), format_time(end), label)
            };

            let lines = [
                format!("00:00:00-{} - night", format_time(ext.morning_twilight_astronomical.start)),
                range(
                    ext.morning_twilight_astronomical.start,
                    ext.morning_twilight_astronomical.end,
                    "astronomical twilight",
                ),
                range(
                    ext.morning_twilight_nautical.start,
                    ext.morning_twilight_nautical.end,
                    "nautical twilight",
                ),
                range(ext.morning_twilight_civil.start, ext.morning_twilight_civil.end, "civil twilight"),
                range(info.sunrise.start, info.sunrise.end, "sunrise"),
                range(info.sunrise.end, info.sunset.start, "daylight"),
                range(info.sunset.start, info.sunset.end, "sunset"),
                range(ext.night_twilight_civil.start, ext.night_twilight_civil.end, "civil twilight"),
                range(
                    ext.night_twilight_nautical.start,
                    ext.night_twilight_nautical.end,
                    "nautical twilight",
                ),
                range(
                    ext.night_twilight_astronomical.start,
                    ext.night_twilight_astronomical.end,
                    "astronomical twilight",
                ),
                format!("{}-00:00:00 - night", format_time(ext.night_twilight_astronomical.end)),
                format!(
                    "{} - {} - date range",
                    format_date(ext.morning_twilight_astronomical.start),
                    format_date(ext.night_twilight_astronomical.end)
                ),
            ];
            lines.join("\n")
        }
        _ => [
            format!("{} - dawn", format_time(info.dawn)),
            format!("{} - sunrise", format_time(info.sunrise.start)),
            format!("{} - solar noon", format_time(info.transit)),
            format!("{} - sunset", format_time(info.sunset.end)),
            format!("{} - dusk", format_time(info.dusk)),
        ]
        .join("\n"),
    }
}

/// Human description of a day without sunrise or sunset.
pub fn describe_horizon_state(state: HorizonState) -> &'static str {
    match state {
        HorizonState::AlwaysAbove => "Polar Day (Midnight Sun).",
        HorizonState::AlwaysBelow => "Polar Night.",
        HorizonState::Crosses => "Sun does not cross target altitude today.",
    }
}

// ===================== JSON OUTPUT =====================

/// Everything the tool reports for one query, for `--json`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub at: DateTime<FixedOffset>,
    pub sun: &'a Position,
    pub brightness: f64,
    pub day: &'a DayInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moon: Option<&'a MoonPosition>,
}

// ===================== TERMINAL OUTPUT =====================

/// Print the query header.
pub fn print_header(info: &DayInfo, offset: &FixedOffset) {
    println!("Location : lat={:.6}, lon={:.6}", info.lat, info.lon);
    println!("Offset   : {}", format_offset(offset));
    println!("Date     : {}", format_date(info.transit));
    println!();
}

/// Print sun position and brightness at a specific time.
///
/// # Arguments
/// * `dt` - DateTime for the position
/// * `pos` - Sun position
/// * `brightness` - Linear brightness estimate
pub fn print_sun_position_at_time(dt: DateTime<FixedOffset>, pos: &Position, brightness: f64) {
    println!("Sun position at {}:", dt.format("%Y-%m-%d %H:%M:%S"));
    println!("  Azimuth       : {:8.3}° ({:.3} rad from south)", pos.bearing_deg(), pos.azimuth);
    println!("  Altitude      : {:8.3}°", pos.altitude_deg());
    println!("  Brightness    : {:8.3}", brightness);
}

/// Print moon position at a specific time.
pub fn print_moon_position_at_time(dt: DateTime<FixedOffset>, pos: &MoonPosition) {
    println!("Moon position at {}:", dt.format("%Y-%m-%d %H:%M:%S"));
    println!(
        "  Azimuth       : {:8.3}°",
        (pos.azimuth.to_degrees() + 180.0).rem_euclid(360.0)
    );
    println!("  Altitude      : {:8.3}°", pos.altitude.to_degrees());
    println!("  Distance      : {:8.0} km", pos.distance);
    println!("  Parallactic   : {:8.3}°", pos.parallactic_angle.to_degrees());
}

/// Print the day legend, the day length, and the polar state if any.
pub fn print_day_info(info: &DayInfo, legend: Legend, len_tomorrow: Option<i64>) {
    println!("{}", info_to_string(info, legend));
    println!();

    match info.day_length_secs() {
        Some(len_today) => {
            println!("Daylight    : {}", format_hms(len_today));

            if let Some(len_tomorrow) = len_tomorrow {
                let diff = len_tomorrow - len_today;
                if diff == 0 {
                    println!("Tomorrow day is same length");
                } else {
                    println!(
                        "Tomorrow day is {} {}",
                        format_hms(diff),
                        if diff > 0 { "longer" } else { "shorter" }
                    );
                }
            }
        }
        None => println!("{}", describe_horizon_state(info.daylight)),
    }
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day_info::SunCalc;
    use chrono::{TimeZone, Utc};

    fn reference_day(detailed: bool) -> DayInfo {
        let date = Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap();
        SunCalc::new(50.5, 30.5).day_info(&date, detailed)
    }

    #[test]
    fn test_missing_event_renders_na() {
        assert_eq!(format_time(None), "n.a.");
        assert_eq!(format_date(None), "n.a.");
        assert_eq!(format_date_time(None), "n.a.");
    }

    #[test]
    fn test_event_formats() {
        let info = reference_day(false);
        assert_eq!(format_time(info.transit), "10:10:57");
        assert_eq!(format_date(info.transit), "2013-03-05");
        assert_eq!(format_date_time(info.transit), "2013-03-05 10:10:57");
    }

    #[test]
    fn test_compact_legend() {
        let info = reference_day(false);
        let expected = "04:02:17 - dawn\n\
                        04:34:56 - sunrise\n\
                        10:10:57 - solar noon\n\
                        15:46:57 - sunset\n\
                        16:19:36 - dusk";
        assert_eq!(info_to_string(&info, Legend::Compact), expected);
    }

    #[test]
    fn test_detailed_legend_without_extended_falls_back() {
        let info = reference_day(false);
        assert_eq!(info_to_string(&info, Legend::Detailed), info_to_string(&info, Legend::Compact));
    }

    #[test]
    fn test_detailed_legend() {
        let info = reference_day(true);
        let legend = info_to_string(&info, Legend::Detailed);
        let lines: Vec<&str> = legend.lines().collect();

        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "00:00:00-02:46:17 - night");
        assert_eq!(lines[1], "02:46:17-03:24:31 - astronomical twilight");
        assert_eq!(lines[3], "04:02:17-04:34:56 - civil twilight");
        assert!(lines[5].ends_with(" - daylight"));
        assert_eq!(lines[10], "17:35:36-00:00:00 - night");
        assert_eq!(lines[11], "2013-03-05 - 2013-03-05 - date range");
    }

    #[test]
    fn test_polar_legend_uses_na() {
        let date = Utc.with_ymd_and_hms(2015, 12, 21, 12, 0, 0).unwrap();
        let info = SunCalc::new(70.0, 0.0).day_info(&date, false);
        let legend = info_to_string(&info, Legend::Compact);

        assert!(legend.contains("n.a. - sunrise"));
        assert!(legend.contains("n.a. - sunset"));
        assert!(!legend.contains("n.a. - solar noon"));
    }

    #[test]
    fn test_report_serializes() {
        let info = reference_day(false);
        let at = info.transit.unwrap();
        let sun = SunCalc::new(50.5, 30.5).sun_position(&at);
        let report = Report { at, sun: &sun, brightness: 1.0, day: &info, moon: None };
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["day"]["daylight"], "crosses");
        assert!(json["day"]["extended"].is_null());
        assert!(json.get("moon").is_none());
        assert!(json["day"]["sunrise"]["start"].as_str().unwrap().starts_with("2013-03-05T04:34:56"));
    }
}
