//! Day Information Module
//!
//! The [`SunCalc`] calculator context and the light-phase boundaries it
//! produces for one day at one location.
//!
//! Everything is computed in UTC. The context's display offset only decides
//! which offset the returned instants are expressed in.

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use serde::Serialize;

use crate::coords::{HorizonState, RAD};
use crate::julian::{days_since_j2000, from_julian_date, to_julian_date};
use crate::moon::{self, MoonPosition};
use crate::solar::{self, D0, H0, H1, H2, H3, Position, TransitSolver};

// ===================== TYPES =====================

/// Instant of a sun event, `None` when it does not happen that day.
pub type SunEvent = Option<DateTime<FixedOffset>>;

/// Interval bounded by two sun events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeRange {
    pub start: SunEvent,
    pub end: SunEvent,
}

impl TimeRange {
    pub fn new(start: SunEvent, end: SunEvent) -> Self {
        Self { start, end }
    }

    /// Length of the range in seconds, if both ends exist.
    pub fn duration_secs(&self) -> Option<i64> {
        Some((self.end? - self.start?).num_seconds())
    }
}

/// Morning and evening twilight phases, only computed on request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtendedDayInfo {
    pub morning_twilight_astronomical: TimeRange,
    pub morning_twilight_nautical: TimeRange,
    pub morning_twilight_civil: TimeRange,
    pub night_twilight_civil: TimeRange,
    pub night_twilight_nautical: TimeRange,
    pub night_twilight_astronomical: TimeRange,
}

/// Light-phase boundaries for one day at one location.
///
/// For locations that see a regular day the boundaries are ordered
/// `dawn <= sunrise.start <= sunrise.end <= transit <= sunset.start <=
/// sunset.end <= dusk`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayInfo {
    /// Start of morning civil twilight (sun at -6°)
    pub dawn: SunEvent,
    /// Upper limb appears until the whole disc is above the horizon
    pub sunrise: TimeRange,
    /// Solar noon
    pub transit: SunEvent,
    /// Lower limb touches the horizon until the upper limb disappears
    pub sunset: TimeRange,
    /// End of evening civil twilight (sun at -6°)
    pub dusk: SunEvent,
    /// Whether the sun rises and sets (-0.833°) on this day
    pub daylight: HorizonState,
    /// Whether the sun crosses -6° on this day
    pub civil: HorizonState,
    pub lat: f64,
    pub lon: f64,
    pub extended: Option<ExtendedDayInfo>,
}

impl DayInfo {
    /// Sunrise to sunset in seconds, if the sun rises and sets.
    pub fn day_length_secs(&self) -> Option<i64> {
        TimeRange::new(self.sunrise.start, self.sunset.end).duration_secs()
    }

    /// Display offset the instants are expressed in.
    pub fn offset(&self) -> Option<FixedOffset> {
        self.transit.map(|t| *t.offset())
    }
}

// ===================== CALCULATOR CONTEXT =====================

/// Context for sun and moon calculations at one location.
///
/// Computation always happens in UTC; `offset` only controls the offset of
/// returned instants and of local-time renderings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunCalc {
    /// Observer latitude in degrees (south negative)
    pub lat: f64,
    /// Observer longitude in degrees (west negative)
    pub lon: f64,
    /// Display offset for returned instants
    pub offset: FixedOffset,
}

impl SunCalc {
    /// Calculator for a location, returning instants in UTC.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon, offset: Utc.fix() }
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Set the display offset in minutes east of UTC.
    ///
    /// Returns `None` if the offset is a day or more.
    pub fn with_offset_minutes(self, minutes: i32) -> Option<Self> {
        let offset = FixedOffset::east_opt(minutes.checked_mul(60)?)?;
        Some(self.with_offset(offset))
    }

    /// West longitude in radians.
    fn lw(&self) -> f64 {
        -self.lon * RAD
    }

    /// Latitude in radians.
    fn phi(&self) -> f64 {
        self.lat * RAD
    }

    fn event(&self, j: f64) -> SunEvent {
        from_julian_date(j).map(|t| t.with_timezone(&self.offset))
    }

    /// Get the sun position at a given instant.
    pub fn sun_position<Tz: TimeZone>(&self, t: &DateTime<Tz>) -> Position {
        solar::sun_position_julian(to_julian_date(t), self.lw(), self.phi())
    }

    /// Get the moon position at a given instant.
    pub fn moon_position<Tz: TimeZone>(&self, t: &DateTime<Tz>) -> MoonPosition {
        moon::moon_position_days(days_since_j2000(t), self.lw(), self.phi())
    }

    /// Compute the light phases of the day whose solar noon is nearest `date`.
    ///
    /// Pass an instant close to local noon to get that calendar day; an
    /// instant near local midnight may land on the neighbouring day.
    ///
    /// # Arguments
    /// * `date` - Anchor instant
    /// * `detailed` - Also compute the nautical and astronomical twilights
    pub fn day_info<Tz: TimeZone>(&self, date: &DateTime<Tz>, detailed: bool) -> DayInfo {
        let solver = TransitSolver::new(to_julian_date(date), self.lw(), self.phi());
        let transit = solver.transit;

        let split = |h: f64| match solver.rise_set(h) {
            Some((rise, set)) => (self.event(rise), self.event(set)),
            None => (None, None),
        };

        let (rise, set) = split(H0);
        let (rise_end, set_start) = split(H0 + D0);
        let (civil_dawn, civil_dusk) = split(H1);

        let extended = detailed.then(|| {
            let (nautical_dawn, nautical_dusk) = split(H2);
            let (night_end, night) = split(H3);

            ExtendedDayInfo {
                morning_twilight_astronomical: TimeRange::new(night_end, nautical_dawn),
                morning_twilight_nautical: TimeRange::new(nautical_dawn, civil_dawn),
                morning_twilight_civil: TimeRange::new(civil_dawn, rise),
                night_twilight_civil: TimeRange::new(set, civil_dusk),
                night_twilight_nautical: TimeRange::new(civil_dusk, nautical_dusk),
                night_twilight_astronomical: TimeRange::new(nautical_dusk, night),
            }
        });

        DayInfo {
            dawn: civil_dawn,
            sunrise: TimeRange::new(rise, rise_end),
            transit: self.event(transit),
            sunset: TimeRange::new(set_start, set),
            dusk: civil_dusk,
            daylight: solver.horizon_state(H0),
            civil: solver.horizon_state(H1),
            lat: self.lat,
            lon: self.lon,
            extended,
        }
    }
}

// ===================== TESTS =====================
