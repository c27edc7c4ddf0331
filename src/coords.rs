//! Spherical Astronomy Helpers Module
//!
//! Coordinate conversions shared by the sun and moon calculations:
//! ecliptic to equatorial, sidereal time, equatorial to horizontal, the
//! hour-angle solve used for rise/set times, and atmospheric refraction.
//!
//! All angles are radians. Longitudes passed as `lw` are measured
//! positive to the west (`lw = -lon`), matching the hour-angle convention.

use serde::Serialize;
use std::f64::consts::PI;

// ===================== CONSTANTS =====================

/// Degrees to radians
pub const RAD: f64 = PI / 180.0;

/// Obliquity of the Earth's axis
pub const OBLIQUITY: f64 = 23.4397 * RAD;

/// Sidereal time at J2000.0
pub const TH0: f64 = 280.16 * RAD;

/// Sidereal rotation per day
pub const TH1: f64 = 360.985_623_5 * RAD;

// ===================== TYPES =====================

/// Whether the sun crosses a given altitude threshold on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizonState {
    /// Rises above and sets below the threshold
    Crosses,
    /// Stays above the threshold all day (polar day)
    AlwaysAbove,
    /// Stays below the threshold all day (polar night)
    AlwaysBelow,
}

// ===================== EQUATORIAL =====================

/// Right ascension from ecliptic longitude `l` and latitude `b`.
pub fn right_ascension(l: f64, b: f64) -> f64 {
    (l.sin() * OBLIQUITY.cos() - b.tan() * OBLIQUITY.sin()).atan2(l.cos())
}

/// Declination from ecliptic longitude `l` and latitude `b`.
pub fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY.cos() + b.cos() * OBLIQUITY.sin() * l.sin()).asin()
}

/// Local sidereal time.
///
/// # Arguments
/// * `d` - Days since J2000.0
/// * `lw` - West longitude in radians
pub fn sidereal_time(d: f64, lw: f64) -> f64 {
    TH0 + TH1 * d - lw
}

// ===================== HORIZONTAL =====================

/// Azimuth for hour angle `h`, latitude `phi` and declination `dec`.
///
/// Measured from south, positive towards west, in (-π, π].
pub fn azimuth(h: f64, phi: f64, dec: f64) -> f64 {
    h.sin().atan2(h.cos() * phi.sin() - dec.tan() * phi.cos())
}

/// Altitude above the horizon in [-π/2, π/2].
pub fn altitude(h: f64, phi: f64, dec: f64) -> f64 {
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos()).asin()
}

/// Parallactic angle of a body at hour angle `h` (Meeus, formula 14.1).
pub fn parallactic_angle(h: f64, phi: f64, dec: f64) -> f64 {
    h.sin().atan2(phi.tan() * dec.cos() - dec.sin() * h.cos())
}

// ===================== HOUR ANGLE =====================

/// Argument of the arc cosine in the hour-angle solve.
fn hour_angle_cos(h: f64, phi: f64, dec: f64) -> f64 {
    (h.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos())
}

/// Classify whether altitude `h` is crossed for latitude `phi` and
/// declination `dec`.
pub fn horizon_state(h: f64, phi: f64, dec: f64) -> HorizonState {
    let x = hour_angle_cos(h, phi, dec);
    if x < -1.0 {
        HorizonState::AlwaysAbove
    } else if x > 1.0 {
        HorizonState::AlwaysBelow
    } else {
        // NaN (phi = ±90°) also lands here and is rejected by hour_angle
        HorizonState::Crosses
    }
}

/// Hour angle at which the sun reaches altitude `h`.
///
/// # Returns
/// The hour angle in [0, π], or `None` when the threshold is never crossed
/// (polar day or night) or the geometry is degenerate.
pub fn hour_angle(h: f64, phi: f64, dec: f64) -> Option<f64> {
    let x = hour_angle_cos(h, phi, dec);
    if (-1.0..=1.0).contains(&x) {
        Some(x.acos())
    } else {
        log::debug!(
            "altitude {:.3}° not crossed at latitude {:.3}° (cos w = {x})",
            h.to_degrees(),
            phi.to_degrees()
        );
        None
    }
}

// ===================== REFRACTION =====================

/// Atmospheric refraction lift for a body at true altitude `h`.
///
/// Meeus, formula 16.4 (`1.02 / tan(h + 10.26 / (h + 5.10))` arcminutes with
/// `h` in degrees), with constants converted to radians. The formula only
/// holds above the horizon: altitudes at or below zero get no correction,
/// which also keeps clear of its pole at `h = -0.08901179`.
///
/// Clamping `h` to 0 and still applying the formula would lift a body at
/// the horizon by about 0.0084 rad. Returning 0 instead leaves apparent
/// altitude jumping by that amount as a body crosses the horizon.
pub fn astro_refraction(h: f64) -> f64 {
    if h <= 0.0 {
        return 0.0;
    }
    0.000_296_7 / (h + 0.003_125_36 / (h + 0.089_011_79)).tan()
}

// ===================== TESTS =====================
