//! Resolution of raw date, time-of-day, and exact timestamp values.
//!
//! Every resolver returns seconds since the Unix epoch. Values that cannot
//! be recognized resolve to 0, which downstream code reads as "no timestamp".

use chrono::{NaiveDate, NaiveTime};

use tdedup_model::TimestampGranularity;

/// Resolve `raw` according to the granularity of its source column.
pub fn resolve(raw: &str, granularity: TimestampGranularity) -> i64 {
    match granularity {
        TimestampGranularity::Exact => parse_exact(raw),
        TimestampGranularity::TimeOfDay => parse_time_of_day(raw),
        TimestampGranularity::Date => parse_date(raw),
        TimestampGranularity::Unknown => 0,
    }
}

/// Parse an integer timestamp.
pub fn parse_exact(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(0)
}

/// Parse a calendar date to midnight UTC.
///
/// Supported forms: `2018-02-23`, `23 February 2018`, `23-Feb-18`.
pub fn parse_date(raw: &str) -> i64 {
    let value = raw.trim();
    if value.is_empty() {
        return 0;
    }
    parse_iso_date(value)
        .or_else(|| parse_long_date(value))
        .or_else(|| parse_short_date(value))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map_or(0, |dt| dt.and_utc().timestamp())
}

fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// `DD Month YYYY`
fn parse_long_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split_whitespace();
    let day = parts.next()?.parse::<u32>().ok()?;
    let month = month_number(parts.next()?)?;
    let year = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// `DD-Mon-YY`, years taken as 20YY.
fn parse_short_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('-');
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    let month = month_number(parts.next()?)?;
    let year = parts.next()?.trim().parse::<i32>().ok()? + 2000;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Month number from a month name; only the first three letters count.
fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.trim().chars().take(3).collect();
    let month = match prefix.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Parse `hh:mm:ss`, optionally followed by `AM`/`PM`.
///
/// The time is placed on 2000-01-01 UTC so results do not depend on the
/// day the program runs.
pub fn parse_time_of_day(raw: &str) -> i64 {
    let value = raw.trim().to_ascii_uppercase();
    if value.is_empty() {
        return 0;
    }
    let (clock, pm) = if let Some(rest) = value.strip_suffix("PM") {
        (rest.trim_end(), Some(true))
    } else if let Some(rest) = value.strip_suffix("AM") {
        (rest.trim_end(), Some(false))
    } else {
        (value.as_str(), None)
    };

    let Some(time) = parse_clock(clock, pm) else {
        return 0;
    };
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .map(|date| date.and_time(time))
        .map_or(0, |dt| dt.and_utc().timestamp())
}

fn parse_clock(clock: &str, pm: Option<bool>) -> Option<NaiveTime> {
    let mut parts = clock.split(':');
    let mut hours = parts.next()?.trim().parse::<u32>().ok()?;
    let minutes = parts.next()?.trim().parse::<u32>().ok()?;
    // fractional seconds are dropped
    let seconds = parts.next()?.trim().split('.').next()?.parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if let Some(pm) = pm {
        if hours == 12 {
            hours = 0;
        }
        if pm {
            hours += 12;
        }
    }
    NaiveTime::from_hms_opt(hours, minutes, seconds)
}
