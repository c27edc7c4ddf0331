//! Day Timeline Module
//!
//! Renders the light phases of a day as a one-line text bar covering
//! 00:00 to 24:00 in the day info's display offset, under an hour-tick
//! header. Glyphs and width come from a [`TimelineStyle`] value.

use crate::brightness::{DayMinutes, MINUTES_PER_DAY, day_start, minutes_since};
use crate::coords::HorizonState;
use crate::day_info::DayInfo;

/// Hours that get a label in the header.
const TICK_HOURS: [usize; 4] = [0, 6, 12, 18];

/// Light phase of a moment of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Night,
    Twilight,
    Day,
}

/// Appearance of a rendered timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineStyle {
    /// Number of cells for the whole day
    pub width: usize,
    pub night: char,
    pub twilight: char,
    pub day: char,
}

impl Default for TimelineStyle {
    fn default() -> Self {
        Self { width: 48, night: '.', twilight: '-', day: '#' }
    }
}

impl TimelineStyle {
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn with_glyphs(mut self, night: char, twilight: char, day: char) -> Self {
        self.night = night;
        self.twilight = twilight;
        self.day = day;
        self
    }

    fn glyph(&self, phase: Phase) -> char {
        match phase {
            Phase::Night => self.night,
            Phase::Twilight => self.twilight,
            Phase::Day => self.day,
        }
    }
}

/// Light phase at a minute since local midnight of the day's transit date.
///
/// Phases that spill into the neighbouring days are cut at 00:00 and 24:00.
/// Days without sunrise or sunset are all day under a midnight sun, and
/// otherwise twilight between dawn and dusk if those exist.
pub fn phase_at(info: &DayInfo, minute: i64) -> Phase {
    let clamp = |m: i64| m.clamp(0, MINUTES_PER_DAY);

    let Some(day) = DayMinutes::new(info) else {
        if info.daylight == HorizonState::AlwaysAbove {
            return Phase::Day;
        }
        let twilight = day_start(info).and_then(|midnight| {
            let dawn = minutes_since(&midnight, &info.dawn?);
            let dusk = minutes_since(&midnight, &info.dusk?);
            Some((clamp(dawn), clamp(dusk)))
        });
        return match twilight {
            Some((start, end)) if minute >= start && minute <= end => Phase::Twilight,
            _ => Phase::Night,
        };
    };

    if minute < clamp(day.rise_start) || minute > clamp(day.set_end) {
        Phase::Night
    } else if minute < clamp(day.rise_end) || minute > clamp(day.set_start) {
        Phase::Twilight
    } else {
        Phase::Day
    }
}

/// Render the day as an hour-tick header line and a phase bar.
///
/// Each cell shows the phase at the middle of the time span it covers.
///
/// # Arguments
/// * `info` - Light phases of the day
/// * `style` - Width and glyphs
pub fn render_timeline(info: &DayInfo, style: &TimelineStyle) -> String {
    let width = style.width.max(1);
    let minutes_per_day = MINUTES_PER_DAY as usize;

    let mut header = vec![' '; width];
    for hour in TICK_HOURS {
        let cell = hour * 60 * width / minutes_per_day;
        let label = format!("{:02}", hour);
        for (i, c) in label.chars().enumerate() {
            if let Some(slot) = header.get_mut(cell + i) {
                *slot = c;
            }
        }
    }

    let bar: String = (0..width)
        .map(|i| {
            let minute = (2 * i + 1) * minutes_per_day / (2 * width);
            style.glyph(phase_at(info, minute as i64))
        })
        .collect();

    format!("{}\n{}", header.into_iter().collect::<String>(), bar)
}

// ===================== TESTS =====================
