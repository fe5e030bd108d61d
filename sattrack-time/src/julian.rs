//! Julian dates split into a day part and a day fraction.
//!
//! TLE epochs and propagation offsets need more sub-second resolution than
//! a single `f64` Julian date carries, so the day number and the day
//! fraction are kept separate and only summed when a caller wants the
//! plain value.

use crate::errors::{TimeError, TimeResult};
use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use sattrack_core::constants::{
    CNES_ZERO_POINT, DUBLIN_ZERO_POINT, MINUTES_PER_DAY, MJD_ZERO_POINT, SECONDS_PER_DAY,
    SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
use std::fmt;

/// A Julian date as `day + fraction`.
///
/// `day` holds the Julian day number at 0h (a half-integer), `fraction`
/// the elapsed fraction of that day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JulianDate {
    day: f64,
    fraction: f64,
}

impl JulianDate {
    /// Creates a Julian date, normalizing the fraction into `[0, 1)`.
    ///
    /// A negative fraction borrows from the day part; a fraction of one or
    /// more carries into it.
    pub fn new(day: f64, fraction: f64) -> Self {
        let mut day = day;
        let mut fraction = fraction;
        if fraction < 0.0 {
            let borrow = (-fraction).ceil();
            day -= borrow;
            fraction += borrow;
        } else if fraction >= 1.0 {
            let carry = fraction.floor();
            day += carry;
            fraction -= carry;
        }
        Self { day, fraction }
    }

    pub fn day(&self) -> f64 {
        self.day
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn value(&self) -> f64 {
        self.day + self.fraction
    }

    /// Standard Modified Julian Day (epoch 1858-11-17).
    pub fn mjd(&self) -> f64 {
        self.value() - MJD_ZERO_POINT
    }

    /// CNES Modified Julian Day (epoch 1950-01-01).
    pub fn mjd_cnes(&self) -> f64 {
        self.value() - CNES_ZERO_POINT
    }

    /// Dublin Julian Day (epoch 1900-01-01 12h).
    pub fn dublin(&self) -> f64 {
        self.value() - DUBLIN_ZERO_POINT
    }

    /// Returns this date shifted by an offset in minutes.
    pub fn add_minutes(&self, minutes: f64) -> Self {
        Self::new(self.day, self.fraction + minutes / MINUTES_PER_DAY)
    }

    /// Julian date of a civil calendar instant.
    ///
    /// Fliegel-Van Flandern day number with the time of day carried in the
    /// fraction part.
    pub fn from_calendar(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        let y = year as i64;
        let m = month as i64;
        let d = day as i64;

        let f = (second
            + minute as f64 * SECONDS_PER_MINUTE
            + hour as f64 * SECONDS_PER_HOUR)
            / SECONDS_PER_DAY;
        let c = (m - 14) / 12;

        let jdn = d - 32075 + (1461 * (y + 4800 + c)) / 4 + (367 * (m - 2 - c * 12)) / 12
            - (3 * ((y + 4900 + c) / 100)) / 4;

        Self::new(jdn as f64 - 0.5, f)
    }

    pub fn from_datetime(t: &DateTime<Utc>) -> Self {
        let second = t.second() as f64 + t.nanosecond() as f64 * 1e-9;
        Self::from_calendar(t.year(), t.month(), t.day(), t.hour(), t.minute(), second)
    }

    /// Julian date of a TLE epoch given as year and fractional day of year.
    pub fn from_day_of_year(year: i32, days: f64) -> TimeResult<Self> {
        let (month, day, hour, minute, second) = calendar_from_day_of_year(year, days)?;
        Ok(Self::from_calendar(year, month, day, hour, minute, second))
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.9}", self.value())
    }
}

/// Breaks a fractional day of year into calendar and clock components.
pub fn calendar_from_day_of_year(year: i32, days: f64) -> TimeResult<(u32, u32, u32, u32, f64)> {
    const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    let leap = year % 4 == 0;
    let days_in_year = if leap { 366 } else { 365 };
    let day_of_year = days.trunc() as i64;
    if day_of_year < 1 || day_of_year > days_in_year {
        return Err(TimeError::InvalidDayOfYear { year, day: days });
    }

    let mut day_of_year = day_of_year as u32;
    let mut month = 0usize;
    while month < 11 {
        let mut len = MONTH_LENGTHS[month];
        if month == 1 && leap {
            len += 1;
        }
        if day_of_year <= len {
            break;
        }
        day_of_year -= len;
        month += 1;
    }

    let temp = days.fract() * 24.0;
    let hour = temp.trunc();
    let temp = (temp - hour) * 60.0;
    let minute = temp.trunc();
    let second = (temp - minute) * 60.0;

    Ok((
        month as u32 + 1,
        day_of_year,
        hour as u32,
        minute as u32,
        second,
    ))
}

/// Civil instant of a TLE epoch given as year and fractional day of year.
pub fn datetime_from_day_of_year(year: i32, days: f64) -> TimeResult<DateTime<Utc>> {
    let (month, day, hour, minute, second) = calendar_from_day_of_year(year, days)?;
    let whole = second.trunc() as u32;
    let nanos = ((second.fract()) * 1e9).round().min(999_999_999.0) as u32;

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_nano_opt(hour, minute, whole, nanos))
        .map(|ndt| ndt.and_utc())
        .ok_or(TimeError::InvalidDayOfYear { year, day: days })
}
