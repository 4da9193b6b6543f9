//! Date and time resolution for loosely formatted user input.
//!
//! Users write instants in many shapes ("2021-08-24", "24/08/21 6pm",
//! "1800"). Each supported shape is one grammar; grammars are attempted in a
//! fixed order and the first match wins. A grammar matches only when the
//! whole token has the exact digit widths of its pattern, so "6:30" is not a
//! valid `HH:mm` and "24/08/21" resolves through `dd/MM/yy` rather than
//! being misread as year 24.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{Result, TaskError};

/// Date grammars attempted in order, first match wins.
pub const DATE_FORMATS: [&str; 6] = [
    "yyyy/MM/dd",
    "yyyy-MM-dd",
    "dd-MM-yyyy",
    "dd/MM/yyyy",
    "dd/MM/yy",
    "dd-MM-yy",
];

/// Time grammars attempted in order, first match wins.
pub const TIME_FORMATS: [&str; 6] = ["HH:mm", "HHmm", "h:mma", "h.mma", "hha", "ha"];

// Shape gates for DATE_FORMATS, same order. `y` is a four-digit year, `yy` a
// two-digit year mapped to 2000-2099.
static DATE_GRAMMARS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^(?P<y>\d{4})/(?P<m>\d{2})/(?P<d>\d{2})$",
        r"^(?P<y>\d{4})-(?P<m>\d{2})-(?P<d>\d{2})$",
        r"^(?P<d>\d{2})-(?P<m>\d{2})-(?P<y>\d{4})$",
        r"^(?P<d>\d{2})/(?P<m>\d{2})/(?P<y>\d{4})$",
        r"^(?P<d>\d{2})/(?P<m>\d{2})/(?P<yy>\d{2})$",
        r"^(?P<d>\d{2})-(?P<m>\d{2})-(?P<yy>\d{2})$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("date grammar"))
    .collect()
});

// Shape gates for TIME_FORMATS, same order. `hha` and `ha` differ only in
// whether the hour must be zero-padded.
static TIME_GRAMMARS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^(?P<h>\d{2}):(?P<min>\d{2})$",
        r"^(?P<h>\d{2})(?P<min>\d{2})$",
        r"^(?P<h>\d{1,2}):(?P<min>\d{2})(?P<ap>[AaPp][Mm])$",
        r"^(?P<h>\d{1,2})\.(?P<min>\d{2})(?P<ap>[AaPp][Mm])$",
        r"^(?P<h>\d{2})(?P<ap>[AaPp][Mm])$",
        r"^(?P<h>\d{1,2})(?P<ap>[AaPp][Mm])$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("time grammar"))
    .collect()
});

/// Current date and time in the local timezone, without offset information.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Sentinel time for date-only deadlines and event ends.
pub fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).expect("23:59 is a valid time")
}

fn field(caps: &Captures<'_>, name: &str) -> u32 {
    caps.name(name)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Resolves `text` as a calendar date.
///
/// Grammars that match the shape but name an impossible date (month 13,
/// 30 February) do not abort the search; the remaining grammars are still
/// tried before the text is declared unparseable.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    for grammar in DATE_GRAMMARS.iter() {
        let Some(caps) = grammar.captures(text) else {
            continue;
        };
        let year = match caps.name("y") {
            Some(y) => y.as_str().parse::<i32>().unwrap_or(0),
            None => 2000 + field(&caps, "yy") as i32,
        };
        if let Some(date) = NaiveDate::from_ymd_opt(year, field(&caps, "m"), field(&caps, "d")) {
            return Ok(date);
        }
    }
    Err(TaskError::UnparseableDate(text.to_string()))
}

/// Resolves `text` as a time of day. Grammars without minutes default the
/// minutes to zero; the am/pm marker is case-insensitive.
pub fn parse_time(text: &str) -> Result<NaiveTime> {
    for grammar in TIME_GRAMMARS.iter() {
        let Some(caps) = grammar.captures(text) else {
            continue;
        };
        let minute = field(&caps, "min");
        let hour = match caps.name("ap") {
            Some(marker) => match clock_hour(field(&caps, "h"), marker.as_str()) {
                Some(h) => h,
                None => continue,
            },
            None => field(&caps, "h"),
        };
        if let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) {
            return Ok(time);
        }
    }
    Err(TaskError::UnparseableTime(text.to_string()))
}

// 12-hour clock hours run 1-12; 12am is midnight, 12pm is noon.
fn clock_hour(hour: u32, marker: &str) -> Option<u32> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    let hour = hour % 12;
    if marker.eq_ignore_ascii_case("pm") {
        Some(hour + 12)
    } else {
        Some(hour)
    }
}

/// Resolves `text` as a combined `<date> <time>` instant.
///
/// No date grammar contains a space and no date shape overlaps a time shape,
/// so trying every date/time grammar pair in order is equivalent to splitting
/// at the single space and resolving each half; the error carries whichever
/// half failed.
pub fn parse_date_time(text: &str) -> Result<NaiveDateTime> {
    let Some((date_part, time_part)) = text.split_once(' ') else {
        return Err(TaskError::UnparseableDate(text.to_string()));
    };
    let date = parse_date(date_part)?;
    let time = parse_time(time_part)?;
    Ok(date.and_time(time))
}

/// Resolves free text into a full instant with tiered fallback: combined
/// date+time, then date-only completed with `default_time`, then time-only
/// placed on `default_date`. Only exhaustion of every tier is an error, and
/// the error reports the last tier tried.
pub fn resolve_instant(
    text: &str,
    default_date: NaiveDate,
    default_time: NaiveTime,
) -> Result<NaiveDateTime> {
    if let Ok(instant) = parse_date_time(text) {
        return Ok(instant);
    }
    if let Ok(date) = parse_date(text) {
        return Ok(date.and_time(default_time));
    }
    let time = parse_time(text)?;
    Ok(default_date.and_time(time))
}

/// How a comparison argument was understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// A bare date; comparisons happen at date granularity.
    Date(NaiveDate),
    /// A full instant.
    Instant(NaiveDateTime),
}

/// Resolves the free text of a before/after query. Input with a space must be
/// a combined instant; a single token is first a pure date and otherwise a
/// time of day on `today`.
pub fn resolve_query(text: &str, today: NaiveDate) -> Result<Resolved> {
    if text.contains(' ') {
        return Ok(Resolved::Instant(parse_date_time(text)?));
    }
    if let Ok(date) = parse_date(text) {
        return Ok(Resolved::Date(date));
    }
    let time = parse_time(text)?;
    Ok(Resolved::Instant(today.and_time(time)))
}
