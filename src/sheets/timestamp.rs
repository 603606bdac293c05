// src/sheets/timestamp.rs
//! Timestamp normalization for the order time column.
//!
//! The upstream sheet mixes two kinds of values: instants carrying an explicit
//! UTC marker (`Z` or `±HH:MM`) and naive wall-clock timestamps. Only the
//! former receive the configured minute correction; naive values are read as
//! local time in the display zone and left unchanged.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, SecondsFormat, TimeDelta, TimeZone, Utc};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use super::status::PLACEHOLDER;

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

fn zone_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"(Z|[+-][0-9]{2}:[0-9]{2})$").expect("Hardcode regex pattern"))
}

/// True when the raw string ends with `Z` or a `±HH:MM` offset (ASCII digits).
pub fn has_zone_marker(raw: &str) -> bool {
    zone_marker().is_match(raw.trim())
}

/// Zone used to read naive timestamps and to render `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayZone {
    /// Machine zone, with its DST rules applied per timestamp
    Local,
    Fixed(FixedOffset),
}

impl DisplayZone {
    fn to_utc(&self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            DisplayZone::Local => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc)),
            DisplayZone::Fixed(offset) => offset
                .from_local_datetime(naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc)),
        }
    }

    fn short_time(&self, instant: &DateTime<Utc>) -> String {
        match self {
            DisplayZone::Local => instant.with_timezone(&Local).format("%H:%M").to_string(),
            DisplayZone::Fixed(offset) => instant.with_timezone(offset).format("%H:%M").to_string(),
        }
    }
}

impl From<FixedOffset> for DisplayZone {
    fn from(offset: FixedOffset) -> Self {
        DisplayZone::Fixed(offset)
    }
}

impl fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayZone::Local => write!(f, "local"),
            DisplayZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

/// Result of normalizing one raw timestamp cell.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTime {
    /// Short `HH:MM` time in the display zone, or the placeholder.
    pub display: String,
    /// The corrected instant, absent when the raw value is unparseable.
    pub instant: Option<DateTime<Utc>>,
}

impl NormalizedTime {
    fn unparseable() -> Self {
        Self {
            display: PLACEHOLDER.to_string(),
            instant: None,
        }
    }

    /// ISO-8601 UTC form with millisecond precision.
    pub fn iso(&self) -> Option<String> {
        self.instant
            .map(|instant| instant.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TimeNormalizer {
    /// Minutes added to marked instants; `None` disables the correction.
    fix_minutes: Option<i64>,
    display_zone: DisplayZone,
}

impl TimeNormalizer {
    pub fn new(fix_minutes: Option<i64>, display_zone: impl Into<DisplayZone>) -> Self {
        Self {
            fix_minutes,
            display_zone: display_zone.into(),
        }
    }

    pub fn normalize(&self, raw: &str) -> NormalizedTime {
        let raw = raw.trim();
        if raw.is_empty() {
            return NormalizedTime::unparseable();
        }

        let instant = if has_zone_marker(raw) {
            parse_marked(raw).and_then(|parsed| match self.fix_minutes {
                // out-of-range corrections read as unparseable
                Some(minutes) => TimeDelta::try_minutes(minutes)
                    .and_then(|delta| parsed.checked_add_signed(delta)),
                None => Some(parsed),
            })
        } else {
            parse_naive(raw).and_then(|naive| self.display_zone.to_utc(&naive))
        };

        match instant {
            Some(instant) => NormalizedTime {
                display: self.display_zone.short_time(&instant),
                instant: Some(instant),
            },
            None => NormalizedTime::unparseable(),
        }
    }
}

fn parse_marked(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    // rfc3339 requires seconds and a `T`; accept the looser forms too
    let (body, offset) = split_marker(raw)?;
    let naive = parse_naive(body.trim_end())?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
}

fn split_marker(raw: &str) -> Option<(&str, FixedOffset)> {
    if let Some(body) = raw.strip_suffix('Z') {
        return Some((body, FixedOffset::east_opt(0)?));
    }
    let at = raw.len().checked_sub(6)?;
    if !raw.is_char_boundary(at) {
        return None;
    }
    let (body, suffix) = raw.split_at(at);
    let bytes = suffix.as_bytes();
    let sign = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let digits = [bytes[1], bytes[2], bytes[4], bytes[5]];
    if bytes[3] != b':' || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let hours = i32::from(digits[0] - b'0') * 10 + i32::from(digits[1] - b'0');
    let minutes = i32::from(digits[2] - b'0') * 10 + i32::from(digits[3] - b'0');
    Some((body, FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))?))
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}
