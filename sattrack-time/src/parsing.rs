//! Parsing of the time and duration literals accepted by the CLIs.

use crate::errors::{TimeError, TimeResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::time::Duration;

const TIME_PATTERNS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an instant from any of the accepted literals: `2018-11-01`,
/// `2018-11-01 06:30:00`, or RFC 3339.
pub fn parse_time(s: &str) -> TimeResult<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }
    for pattern in TIME_PATTERNS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, pattern) {
            return Ok(t.and_utc());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(t) = d.and_hms_opt(0, 0, 0) {
            return Ok(t.and_utc());
        }
    }
    Err(TimeError::InvalidTime(s.to_string()))
}

/// Parses a duration literal such as `90m`, `72h`, `30s`, `2d` or a
/// concatenation like `1h30m`.
pub fn parse_duration(s: &str) -> TimeResult<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TimeError::InvalidDuration(s.to_string()));
    }

    let mut total = Duration::ZERO;
    let mut digits = String::new();
    let mut seen_component = false;

    for ch in s.chars() {
        if ch.is_ascii_digit() || ch == '.' {
            digits.push(ch);
            continue;
        }
        let value: f64 = digits
            .parse()
            .map_err(|_| TimeError::InvalidDuration(s.to_string()))?;
        let seconds = match ch {
            's' => value,
            'm' => value * 60.0,
            'h' => value * 3_600.0,
            'd' => value * 86_400.0,
            _ => return Err(TimeError::InvalidDuration(s.to_string())),
        };
        total += Duration::from_secs_f64(seconds);
        digits.clear();
        seen_component = true;
    }

    if !digits.is_empty() || !seen_component {
        return Err(TimeError::InvalidDuration(s.to_string()));
    }
    Ok(total)
}
