//! Date handling for sheet cells
//!
//! Serial numbers follow the 1900 date system: serial 1 is 1900-01-01 and
//! serial 60 is the phantom 1900-02-29, which has no calendar date.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::fmt::Write;
use std::sync::OnceLock;

/// Formats tried, in order, when parsing date text without a matching pattern
const FALLBACK_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

const FALLBACK_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y", "%Y%m%d"];

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Serial of 9999-12-31, the last date a sheet can hold
const MAX_SERIAL: f64 = 2_958_465.0;

fn epoch(days: i64) -> Option<NaiveDateTime> {
    // Serials below 60 predate the phantom leap day and sit one day later
    let base = if days < 60 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    base.and_hms_opt(0, 0, 0)
}

/// Convert a 1900-system serial number to a date-time
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(1.0..MAX_SERIAL + 1.0).contains(&serial) {
        return None;
    }
    let days = serial.floor() as i64;
    if days == 60 {
        return None;
    }
    let millis = ((serial - serial.floor()) * MILLIS_PER_DAY).round() as i64;
    epoch(days)?.checked_add_signed(Duration::days(days) + Duration::milliseconds(millis))
}

fn token_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"'[^']*'|yyyy|yy|MMMM|MMM|MM|M|dddd|ddd|dd|d|HH|H|hh|h|mm|m|ss|s|fff|tt")
                .ok()
        })
        .as_ref()
}

/// Translate a display pattern into a chrono format string.
///
/// Accepts `yyyy-MM-dd HH:mm:ss` style tokens, optionally wrapped as
/// `{0:...}`, or a chrono `%` pattern which is returned unchanged. Returns
/// `None` when the pattern asks for the default text form (`{0}` or empty).
pub fn to_chrono_format(pattern: &str) -> Option<String> {
    let pattern = pattern.trim();
    let inner = match pattern.strip_prefix("{0").and_then(|p| p.strip_suffix('}')) {
        Some(rest) => rest.strip_prefix(':').unwrap_or(rest),
        None => pattern,
    };
    if inner.is_empty() {
        return None;
    }
    if inner.contains('%') {
        return Some(inner.to_string());
    }

    let regex = token_pattern()?;
    let mut out = String::with_capacity(inner.len() * 2);
    let mut last = 0;
    for m in regex.find_iter(inner) {
        out.push_str(&inner[last..m.start()]);
        let token = m.as_str();
        let mapped = match token {
            "yyyy" => "%Y",
            "yy" => "%y",
            "MMMM" => "%B",
            "MMM" => "%b",
            "MM" => "%m",
            "M" => "%-m",
            "dddd" => "%A",
            "ddd" => "%a",
            "dd" => "%d",
            "d" => "%-d",
            "HH" => "%H",
            "H" => "%-H",
            "hh" => "%I",
            "h" => "%-I",
            "mm" => "%M",
            "m" => "%-M",
            "ss" => "%S",
            "s" => "%-S",
            "fff" => "%3f",
            "tt" => "%p",
            quoted => {
                out.push_str(&quoted[1..quoted.len() - 1].replace('%', "%%"));
                ""
            }
        };
        out.push_str(mapped);
        last = m.end();
    }
    out.push_str(&inner[last..]);
    Some(out)
}

/// Render a date-time with a display pattern; `None` if the pattern is unusable
pub fn format_datetime(value: NaiveDateTime, pattern: &str) -> Option<String> {
    let format = to_chrono_format(pattern)?;
    let mut out = String::new();
    write!(out, "{}", value.format(&format)).ok()?;
    Some(out)
}

/// Calendar parse of date text, trying the field's own pattern first
pub fn parse_datetime(text: &str, pattern: Option<&str>) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(format) = pattern.and_then(to_chrono_format) {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, &format) {
            return Some(dt);
        }
        if let Ok(d) = NaiveDate::parse_from_str(text, &format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    for format in FALLBACK_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
