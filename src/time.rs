//! Time and Offset Utilities Module
//!
//! Provides time parsing, display-offset resolution, and duration formatting.
//! Offsets are plain fixed UTC offsets; there is no timezone database.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, Offset, Timelike, Utc};

/// Largest accepted display offset magnitude in minutes
pub const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

// ===================== TIME PARSING =====================

/// Parse a time string in HH:MM[:SS[.fffffffff]] format.
///
/// # Arguments
/// * `s` - Time string to parse
///
/// # Returns
/// Tuple of (hours, minutes, seconds, nanoseconds)
///
/// # Errors
/// Returns an error if the time format is invalid
pub fn parse_time_ns(s: &str) -> Result<(u32, u32, u32, u32), Box<dyn std::error::Error>> {
    let formats = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

    for fmt in formats {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            return Ok((t.hour(), t.minute(), t.second(), t.nanosecond()));
        }
    }
    Err("Invalid time format. Use HH:MM, HH:MM:SS, or HH:MM:SS.ns".into())
}

// ===================== DISPLAY OFFSETS =====================

/// Get the system's current UTC offset.
pub fn system_offset() -> FixedOffset {
    Local::now().offset().fix()
}

/// Offset of `minutes` east of UTC, if within a day.
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    if minutes.abs() > MAX_OFFSET_MINUTES {
        return None;
    }
    FixedOffset::east_opt(minutes * 60)
}

/// Resolve a display offset from its command-line form.
///
/// Accepts `"system"`, `"utc"`, or a signed number of minutes east of UTC
/// (`"120"`, `"+600"`, `"-300"`).
///
/// # Errors
/// Returns a message for anything else or an offset of a day or more
pub fn resolve_offset(value: &str) -> Result<FixedOffset, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "system" => Ok(system_offset()),
        "utc" | "z" => Ok(Utc.fix()),
        other => {
            let minutes: i32 = other
                .trim_start_matches('+')
                .parse()
                .map_err(|_| format!("Invalid offset '{}': use system, utc, or minutes", value))?;
            offset_from_minutes(minutes).ok_or_else(|| {
                format!(
                    "Offset must be between -{0} and {0} minutes, got {1}",
                    MAX_OFFSET_MINUTES, minutes
                )
            })
        }
    }
}

/// Noon of a calendar date in the given offset.
///
/// Noon anchors the transit solve on that date's solar noon.
pub fn local_noon(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    date.and_hms_opt(12, 0, 0)?.and_local_timezone(offset).single()
}

// ===================== FORMATTING =====================

/// Format a duration in seconds as "Xh Ym Zs".
///
/// # Arguments
/// * `seconds` - Duration in seconds (can be negative, abs value is used)
///
/// # Returns
/// Formatted string like "5h 30m 45s"
pub fn format_hms(seconds: i64) -> String {
    let total_seconds = seconds.abs();
    if total_seconds == 0 {
        return "0s".to_string();
    }

    let h = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;

    let mut parts = Vec::new();
    if h > 0 {
        parts.push(format!("{}h", h));
    }
    if m > 0 {
        parts.push(format!("{}m", m));
    }
    if s > 0 {
        parts.push(format!("{}s", s));
    }

    parts.join(" ")
}

/// Format an offset as "UTC+HH:MM".
pub fn format_offset(offset: &FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let abs = secs.abs();
    format!("UTC{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_at_time_parsing_invalid() {
        assert!(parse_time_ns("a").is_err());
        assert!(parse_time_ns("21").is_err());
        assert!(parse_time_ns("25:00").is_err());
        assert!(parse_time_ns("12:60").is_err());
        assert!(parse_time_ns("12:30:99").is_err());
    }

    #[test]
    fn test_at_time_parsing_valid() {
        assert_eq!(parse_time_ns("12:30").unwrap(), (12, 30, 0, 0));
        assert_eq!(parse_time_ns("00:00").unwrap(), (0, 0, 0, 0));
        assert_eq!(parse_time_ns("23:59").unwrap(), (23, 59, 0, 0));
        assert_eq!(parse_time_ns("12:30:45").unwrap(), (12, 30, 45, 0));
        assert_eq!(parse_time_ns("12:30:45.123").unwrap(), (12, 30, 45, 123_000_000));
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(3661), "1h 1m 1s");
        assert_eq!(format_hms(7200), "2h");
        assert_eq!(format_hms(45), "45s");
        assert_eq!(format_hms(0), "0s");
        assert_eq!(format_hms(-3660), "1h 1m");
    }

    #[test]
    fn test_resolve_offset() {
        assert_eq!(resolve_offset("utc").unwrap(), Utc.fix());
        assert_eq!(resolve_offset("UTC").unwrap(), Utc.fix());
        assert_eq!(resolve_offset("600").unwrap().local_minus_utc(), 36_000);
        assert_eq!(resolve_offset("+330").unwrap().local_minus_utc(), 19_800);
        assert_eq!(resolve_offset("-300").unwrap().local_minus_utc(), -18_000);
        assert!(resolve_offset("1440").is_err());
        assert!(resolve_offset("-1440").is_err());
        assert!(resolve_offset("Europe/Helsinki").is_err());
        assert!(resolve_offset("system").is_ok());
    }

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(&Utc.fix()), "UTC+00:00");
        assert_eq!(format_offset(&offset_from_minutes(330).unwrap()), "UTC+05:30");
        assert_eq!(format_offset(&offset_from_minutes(-210).unwrap()), "UTC-03:30");
    }

    #[test]
    fn test_local_noon() {
        let offset = offset_from_minutes(600).unwrap();
        let date = NaiveDate::from_ymd_opt(2015, 5, 29).unwrap();
        let noon = local_noon(date, offset).unwrap();

        assert_eq!((noon.day(), noon.hour()), (29, 12));
        assert_eq!(noon.with_timezone(&Utc).hour(), 2);
    }
}
