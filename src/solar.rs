//! Solar Position Calculation Module
//!
//! Low-precision solar ephemeris: mean anomaly, equation of center,
//! ecliptic longitude, declination and right ascension, plus the transit
//! and hour-angle solve used to place sunrise, sunset and twilight.
//!
//! Accuracy is around a minute for event times and a fraction of a degree for
//! positions; there is no nutation, aberration or delta-T.

use serde::Serialize;
use std::f64::consts::PI;

use crate::coords::{self, OBLIQUITY, RAD};
use crate::julian::J2000;

// ===================== CONSTANTS =====================

/// Mean anomaly at J2000.0
pub const M0: f64 = 357.5291 * RAD;
/// Mean anomaly rate per day
pub const M1: f64 = 0.985_600_28 * RAD;

/// Transit epoch correction in days
pub const J0: f64 = 0.0009;
/// Transit correction amplitude for the mean anomaly term
pub const J1: f64 = 0.0053;
/// Transit correction amplitude for the ecliptic longitude term
pub const J2: f64 = -0.0069;

/// Equation of center coefficients
pub const C1: f64 = 1.9148 * RAD;
pub const C2: f64 = 0.0200 * RAD;
pub const C3: f64 = 0.0003 * RAD;

/// Longitude of perihelion
pub const P: f64 = 102.9372 * RAD;

/// Standard sunset altitude: upper limb on the horizon, with refraction
pub const H0: f64 = -0.833 * RAD;
/// Apparent diameter of the sun; `H0 + D0` is the lower limb on the horizon
pub const D0: f64 = 0.53 * RAD;
/// Civil twilight ends (dusk) / nautical begins
pub const H1: f64 = -6.0 * RAD;
/// Nautical twilight ends / astronomical begins
pub const H2: f64 = -12.0 * RAD;
/// Astronomical twilight ends (full darkness)
pub const H3: f64 = -18.0 * RAD;

// ===================== TYPES =====================

/// Position of a body relative to an observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    /// Radians from south, positive towards west, in (-π, π]
    pub azimuth: f64,
    /// Radians above the horizon, in [-π/2, π/2]
    pub altitude: f64,
}

impl Position {
    /// Azimuth as a compass bearing in degrees (0 = north, 90 = east).
    pub fn bearing_deg(&self) -> f64 {
        (self.azimuth.to_degrees() + 180.0).rem_euclid(360.0)
    }

    pub fn altitude_deg(&self) -> f64 {
        self.altitude.to_degrees()
    }

    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }
}

// ===================== SOLAR PRIMITIVES =====================

/// Mean anomaly of the sun at Julian date `j`.
pub fn solar_mean_anomaly(j: f64) -> f64 {
    M0 + M1 * (j - J2000)
}

/// Equation of center for mean anomaly `m`.
pub fn equation_of_center(m: f64) -> f64 {
    C1 * m.sin() + C2 * (2.0 * m).sin() + C3 * (3.0 * m).sin()
}

/// Ecliptic longitude of the sun from mean anomaly and equation of center.
pub fn ecliptic_longitude(m: f64, c: f64) -> f64 {
    m + P + c + PI
}

/// Declination of the sun (ecliptic latitude is taken as zero).
pub fn sun_declination(l: f64) -> f64 {
    (l.sin() * OBLIQUITY.sin()).asin()
}

/// Right ascension of the sun.
pub fn sun_right_ascension(l: f64) -> f64 {
    (l.sin() * OBLIQUITY.cos()).atan2(l.cos())
}

/// Sidereal time at Julian date `j` for west longitude `lw`.
pub fn sidereal_time(j: f64, lw: f64) -> f64 {
    coords::sidereal_time(j - J2000, lw)
}

// ===================== POSITION =====================

/// Sun position for a Julian date.
///
/// # Arguments
/// * `j` - Julian date (UTC)
/// * `lw` - West longitude in radians (`-lon`)
/// * `phi` - Latitude in radians
pub fn sun_position_julian(j: f64, lw: f64, phi: f64) -> Position {
    let m = solar_mean_anomaly(j);
    let c = equation_of_center(m);
    let l = ecliptic_longitude(m, c);
    let dec = sun_declination(l);
    let ra = sun_right_ascension(l);
    let h = sidereal_time(j, lw) - ra;

    Position { azimuth: coords::azimuth(h, phi, dec), altitude: coords::altitude(h, phi, dec) }
}

// ===================== TRANSIT SOLVER =====================

/// Number of the solar transit nearest to Julian date `j`.
///
/// Rounds to the closest local noon, so an instant at local midnight can
/// resolve to the previous day's transit.
pub fn julian_cycle(j: f64, lw: f64) -> f64 {
    (j - J2000 - J0 - lw / (2.0 * PI)).round()
}

/// Approximate Julian date at which the hour angle equals `ht` in cycle `n`.
pub fn approx_solar_transit(ht: f64, lw: f64, n: f64) -> f64 {
    J2000 + J0 + (ht + lw) / (2.0 * PI) + n
}

/// Refine an approximate transit with the equation of time terms.
pub fn solar_transit(js: f64, m: f64, l: f64) -> f64 {
    js + J1 * m.sin() + J2 * (2.0 * l).sin()
}

/// Julian date at which the sun sets through the altitude with hour angle `w`.
pub fn sunset_julian_date(w: f64, m: f64, l: f64, lw: f64, n: f64) -> f64 {
    solar_transit(approx_solar_transit(w, lw, n), m, l)
}

/// Mirror a setting time around the transit to get the matching rise.
pub fn sunrise_julian_date(j_transit: f64, j_set: f64) -> f64 {
    j_transit - (j_set - j_transit)
}

/// Solar quantities fixed for one transit, shared by every threshold.
#[derive(Debug, Clone, Copy)]
pub struct TransitSolver {
    /// West longitude in radians
    pub lw: f64,
    /// Latitude in radians
    pub phi: f64,
    /// Julian cycle
    pub n: f64,
    /// Mean anomaly at the approximate transit
    pub m: f64,
    /// Ecliptic longitude at the approximate transit
    pub l: f64,
    /// Declination at the approximate transit
    pub dec: f64,
    /// Julian date of the solar transit
    pub transit: f64,
}

impl TransitSolver {
    /// Anchor the solve on the transit nearest to Julian date `j`.
    pub fn new(j: f64, lw: f64, phi: f64) -> Self {
        let n = julian_cycle(j, lw);
        let js = approx_solar_transit(0.0, lw, n);
        let m = solar_mean_anomaly(js);
        let c = equation_of_center(m);
        let l = ecliptic_longitude(m, c);
        let dec = sun_declination(l);
        let transit = solar_transit(js, m, l);

        Self { lw, phi, n, m, l, dec, transit }
    }

    /// Rise and set Julian dates for altitude `h`.
    ///
    /// # Returns
    /// `(rise, set)`, or `None` when the sun does not cross `h` that day
    pub fn rise_set(&self, h: f64) -> Option<(f64, f64)> {
        let w = coords::hour_angle(h, self.phi, self.dec)?;
        let set = sunset_julian_date(w, self.m, self.l, self.lw, self.n);
        Some((sunrise_julian_date(self.transit, set), set))
    }

    /// Whether altitude `h` is crossed on this day.
    pub fn horizon_state(&self, h: f64) -> coords::HorizonState {
        coords::horizon_state(h, self.phi, self.dec)
    }
}

// ===================== TESTS =====================
