//! Command-Line Interface Module
//!
//! Handles argument parsing and validation for the suncalc application.

use chrono::FixedOffset;
use clap::Parser;
use serde::Deserialize;

use suncalc::time::resolve_offset;

// ===================== CLI =====================

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Observer latitude in decimal degrees (-90 to 90)
    #[arg(
        long,
        required_unless_present = "show_build_info",
        allow_hyphen_values = true,
        value_parser = parse_latitude,
        env = "SUNCALC_LATITUDE"
    )]
    pub latitude: Option<f64>,
    /// Observer longitude in decimal degrees (-180 to 180)
    #[arg(
        long,
        required_unless_present = "show_build_info",
        allow_hyphen_values = true,
        value_parser = parse_longitude,
        env = "SUNCALC_LONGITUDE"
    )]
    pub longitude: Option<f64>,
    /// Display offset: "system", "utc", or minutes east of UTC (e.g. 120, -300)
    #[arg(long, default_value = "system", allow_hyphen_values = true, value_parser = resolve_offset, env = "SUNCALC_OFFSET")]
    pub offset: FixedOffset,

    /// Date for calculations (e.g., "2024-12-25" or "today"); defaults to today
    #[arg(long)]
    pub date: Option<String>,
    /// Show positions at a specific time (HH:MM[:SS[.fffffffff]] or "now")
    #[arg(long)]
    pub at: Option<String>,

    /// Show every twilight phase of the day
    #[arg(long, env = "SUNCALC_DETAILED")]
    pub detailed: bool,
    /// Also show the moon position
    #[arg(long)]
    pub moon: bool,
    /// Draw the day as a text timeline
    #[arg(long)]
    pub timeline: bool,
    /// Timeline width in characters
    #[arg(long, default_value_t = 48, value_parser = parse_width)]
    pub timeline_width: usize,
    /// Compare with the same date 6 and 3 months ago and 3 months ahead
    #[arg(long)]
    pub seasons: bool,
    /// Print one JSON object instead of text
    #[arg(long, conflicts_with = "seasons")]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
    /// Show build info from Cargo.lock at time of building
    #[arg(long)]
    pub show_build_info: bool,
}

// Define the structure to match what we serialized in build.rs
#[derive(Debug, Deserialize)]
pub struct DepInfo {
    pub name: String,
    pub version: String,
    pub checksum: Option<String>,
    pub source: Option<String>,
}

// ===================== CLI VALUE PARSERS =====================

fn parse_latitude(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(-90.0..=90.0).contains(&v) {
        return Err(format!("Latitude must be between -90 and 90, got {}", v));
    }
    Ok(v)
}

fn parse_longitude(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(-180.0..=180.0).contains(&v) {
        return Err(format!("Longitude must be between -180 and 180, got {}", v));
    }
    Ok(v)
}

fn parse_width(s: &str) -> Result<usize, String> {
    let v: usize = s.parse().map_err(|_| format!("Invalid width: {}", s))?;
    if !(8..=1440).contains(&v) {
        return Err(format!("Timeline width must be between 8 and 1440, got {}", v));
    }
    Ok(v)
}

// ===================== TESTS =====================
