//! CF-style time decoding for coordinate variables.
//!
//! A numeric time coordinate usually carries a `units` attribute of the form
//! `"<unit> since <epoch>"` (e.g. `"hours since 1990-01-01 00:00:00"`).
//! When time decoding is enabled, such coordinates are converted to
//! ISO-8601 text, as the Python/xarray backend of the legacy system did.
//! Calendars other than the standard one are not interpreted.

use std::sync::OnceLock;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use crate::app::models::Value;

/// A decoded `units` attribute: the epoch and the length of one unit step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeEncoding {
    epoch: DateTime<Utc>,
    seconds_per_unit: f64,
}

fn units_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^\s*(seconds?|minutes?|hours?|days?)\s+since\s+(.+?)\s*$")
            .expect("time units pattern is valid")
    })
}

impl TimeEncoding {
    /// Parse a CF `units` string; `None` when it is not a time encoding
    pub fn parse(units: &str) -> Option<Self> {
        let captures = units_pattern().captures(units)?;
        let seconds_per_unit = match captures[1].to_ascii_lowercase().as_str() {
            "second" | "seconds" => 1.0,
            "minute" | "minutes" => 60.0,
            "hour" | "hours" => 3_600.0,
            "day" | "days" => 86_400.0,
            _ => return None,
        };
        let epoch = parse_epoch(&captures[2])?;
        Some(Self {
            epoch,
            seconds_per_unit,
        })
    }

    /// Decode one coordinate value to a time value; non-finite offsets and
    /// offsets outside the representable range stay numeric-missing
    pub fn decode(&self, offset: f64) -> Value {
        if !offset.is_finite() {
            return Value::Missing;
        }
        let millis = offset * self.seconds_per_unit * 1_000.0;
        if millis.abs() > i64::MAX as f64 {
            return Value::Missing;
        }
        match self
            .epoch
            .checked_add_signed(Duration::milliseconds(millis.round() as i64))
        {
            Some(t) => Value::Time(t),
            None => Value::Missing,
        }
    }
}

/// Parse the epoch half of a `units` string. Accepts the common layouts:
/// `1990-01-01 00:00:00`, `1990-01-01T00:00:00Z`, `1990-01-01`.
fn parse_epoch(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Some(t.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(text, format) {
            return Some(t.and_utc());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
