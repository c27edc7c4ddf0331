//! Sun and moon ephemeris.
//!
//! Sun position, solar noon, sunrise and sunset, twilight phases, moon
//! position, and a simple sky brightness estimate for any location and
//! instant. Results are accurate to about a minute for dates within a few
//! centuries of 2000.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use suncalc::SunCalc;
//!
//! let noon = Utc.with_ymd_and_hms(2013, 3, 5, 12, 0, 0).unwrap();
//! let calc = SunCalc::new(50.5, 30.5);
//! let info = calc.day_info(&noon, false);
//! assert!(info.sunrise.start < info.transit);
//! ```

pub mod brightness;
pub mod coords;
pub mod day_info;
pub mod julian;
pub mod moon;
pub mod output;
pub mod solar;
pub mod time;
pub mod timeline;

pub use brightness::sun_brightness;
pub use coords::HorizonState;
pub use day_info::{DayInfo, ExtendedDayInfo, SunCalc, SunEvent, TimeRange};
pub use julian::{from_julian_date, to_julian_date};
pub use moon::MoonPosition;
pub use solar::Position;
pub use timeline::{TimelineStyle, render_timeline};
