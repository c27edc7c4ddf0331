use chrono::{DateTime, Duration, FixedOffset, Months, NaiveDate, Utc};
use chrono_english::{Dialect, parse_date_string};
use clap::Parser;
use log::{debug, warn};

use suncalc::output::{self, Legend, Report};
use suncalc::time::{local_noon, parse_time_ns};
use suncalc::{SunCalc, TimelineStyle, render_timeline, sun_brightness};

mod cli;

use cli::{Args, DepInfo};

/// Months around the query date shown by `--seasons`.
const SEASON_SHIFTS: [i32; 4] = [-6, -3, 0, 3];

// ===================== MAIN =====================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if args.show_build_info {
        print_build_info()?;
        return Ok(());
    }

    let (Some(lat), Some(lon)) = (args.latitude, args.longitude) else {
        return Err("--latitude and --longitude are required".into());
    };

    let offset = args.offset;
    let now = Utc::now().with_timezone(&offset);

    // Anchor 'today' to the display offset
    let date = match &args.date {
        Some(s) => parse_date_string(s, now, Dialect::Us)?,
        None => now,
    };
    let day = date.date_naive();

    // Noon keeps the transit solve on this calendar day
    let anchor = local_noon(day, offset).ok_or("Invalid date")?;
    debug!("Solving day {} from anchor {}", day, anchor);

    let calc = SunCalc::new(lat, lon).with_offset(offset);
    let info = calc.day_info(&anchor, args.detailed);
    let style = TimelineStyle::default().with_width(args.timeline_width);

    let target_dt: DateTime<FixedOffset> = match args.at.as_deref() {
        Some("now") => {
            if args.date.is_some() {
                warn!("--at now ignores --date; day info is still for {}", day);
            }
            now
        }
        Some(at) => {
            let (h, m, s, ns) = parse_time_ns(at)?;
            let naive_dt = day.and_hms_nano_opt(h, m, s, ns).ok_or("Invalid time digits")?;
            naive_dt.and_local_timezone(offset).single().ok_or("Time does not exist in offset")?
        }
        // A given date without a time shows solar noon
        None if args.date.is_some() => info.transit.unwrap_or(anchor),
        None => now,
    };

    let pos = calc.sun_position(&target_dt);
    let brightness = sun_brightness(&info, &target_dt);
    let moon_pos = args.moon.then(|| calc.moon_position(&target_dt));

    if args.json {
        let report =
            Report { at: target_dt, sun: &pos, brightness, day: &info, moon: moon_pos.as_ref() };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.seasons {
        print_seasons(&calc, day, offset, args.timeline.then_some(&style))?;
        return Ok(());
    }

    let len_tomorrow = calc.day_info(&(anchor + Duration::days(1)), false).day_length_secs();

    output::print_header(&info, &offset);
    output::print_sun_position_at_time(target_dt, &pos, brightness);
    if let Some(moon) = &moon_pos {
        output::print_moon_position_at_time(target_dt, moon);
    }
    println!();

    let legend = if args.detailed { Legend::Detailed } else { Legend::Compact };
    output::print_day_info(&info, legend, len_tomorrow);

    if args.timeline {
        println!();
        println!("{}", render_timeline(&info, &style));
    }

    Ok(())
}

// ===================== SEASONS =====================

/// Print the day for the query date 6 and 3 months ago, the date itself,
/// and 3 months ahead.
fn print_seasons(
    calc: &SunCalc,
    day: NaiveDate,
    offset: FixedOffset,
    style: Option<&TimelineStyle>,
) -> Result<(), Box<dyn std::error::Error>> {
    for shift in SEASON_SHIFTS {
        let months = Months::new(shift.unsigned_abs());
        let shifted =
            if shift < 0 { day.checked_sub_months(months) } else { day.checked_add_months(months) };
        let shifted = shifted.ok_or("Date out of range")?;
        let anchor = local_noon(shifted, offset).ok_or("Invalid date")?;
        let info = calc.day_info(&anchor, false);

        println!("=== {} ===", shifted);
        println!("{}", output::info_to_string(&info, Legend::Compact));
        if let Some(style) = style {
            println!("{}", render_timeline(&info, style));
        }
        println!();
    }
    Ok(())
}

// ===================== BUILD INFO =====================

fn print_build_info() -> Result<(), Box<dyn std::error::Error>> {
    println!("Built from Git commit: {}\n", env!("SUNCALC_GIT_HASH"));
    const DEP_INFO_RAW: &str = include_str!(env!("SUNCALC_DEPS_PATH"));
    let deps: Vec<DepInfo> = serde_json::from_str(DEP_INFO_RAW)?;

    println!("Found {} dependencies.", deps.len());
    for dep in deps {
        println!("- {} v{}", dep.name, dep.version);
        if let Some(sum) = dep.checksum {
            println!("    Checksum: {}", sum);
        }
        if let Some(src) = dep.source {
            println!("    Source:   {}", src);
        }
    }
    Ok(())
}
