//! Moon Position Module
//!
//! Geocentric lunar position from mean orbital elements with the two largest
//! periodic terms, converted to horizontal coordinates and lifted by
//! atmospheric refraction.

use serde::Serialize;

use crate::coords::{self, RAD};

/// Mean Earth-Moon distance term in km
const MEAN_DISTANCE_KM: f64 = 385_001.0;
/// Eccentricity term of the distance in km
const DISTANCE_AMPLITUDE_KM: f64 = 20_905.0;

/// Position of the moon relative to an observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoonPosition {
    /// Radians from south, positive towards west
    pub azimuth: f64,
    /// Apparent altitude in radians, refraction included
    pub altitude: f64,
    /// Distance to the moon in km
    pub distance: f64,
    /// Radians
    pub parallactic_angle: f64,
}

/// Geocentric ecliptic coordinates of the moon.
#[derive(Debug, Clone, Copy)]
struct MoonCoords {
    ra: f64,
    dec: f64,
    dist: f64,
}

fn moon_coords(d: f64) -> MoonCoords {
    let l0 = RAD * (218.316 + 13.176_396 * d); // ecliptic longitude
    let m = RAD * (134.963 + 13.064_993 * d); // mean anomaly
    let f = RAD * (93.272 + 13.229_350 * d); // mean distance

    let l = l0 + RAD * 6.289 * m.sin();
    let b = RAD * 5.128 * f.sin();

    MoonCoords {
        ra: coords::right_ascension(l, b),
        dec: coords::declination(l, b),
        dist: MEAN_DISTANCE_KM - DISTANCE_AMPLITUDE_KM * m.cos(),
    }
}

/// Moon position for a given number of days since J2000.0.
///
/// # Arguments
/// * `d` - Days since J2000.0
/// * `lw` - West longitude in radians
/// * `phi` - Latitude in radians
pub fn moon_position_days(d: f64, lw: f64, phi: f64) -> MoonPosition {
    let c = moon_coords(d);
    let h = coords::sidereal_time(d, lw) - c.ra;
    let alt = coords::altitude(h, phi, c.dec);

    MoonPosition {
        azimuth: coords::azimuth(h, phi, c.dec),
        altitude: alt + coords::astro_refraction(alt),
        distance: c.dist,
        parallactic_angle: coords::parallactic_angle(h, phi, c.dec),
    }
}
