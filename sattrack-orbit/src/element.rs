//! Two-line element decoding.
//!
//! Fields are cut out of the fixed NORAD columns, then rescaled into the
//! unit system the kernel wants: angles in radians, mean motion and its
//! derivatives in radians per minute (per minute², per minute³), implicit
//! decimal points expanded.

use crate::errors::{OrbitError, OrbitResult, TLE_LINE_LEN};
use chrono::{DateTime, Utc};
use sattrack_core::constants::{MINUTES_PER_DAY, XPDOTP};
use sattrack_time::julian::datetime_from_day_of_year;
use sattrack_time::JulianDate;
use std::ops::Range;
use std::str::FromStr;

const YEAR_PIVOT: i32 = 57;

/// A decoded TLE record.
///
/// Immutable after construction; the two raw lines are preserved verbatim
/// for output headers.
#[derive(Debug, Clone)]
pub struct Element {
    /// Satellite catalog number.
    pub sid: u32,
    /// Epoch as a civil instant.
    pub when: DateTime<Utc>,
    /// Epoch as a split Julian date.
    pub epoch: JulianDate,

    pub year: i32,
    pub day_of_year: f64,
    /// First derivative of mean motion, rad/min².
    pub mean1: f64,
    /// Second derivative of mean motion, rad/min³.
    pub mean2: f64,
    /// B* drag term, 1/earth-radii.
    pub bstar: f64,
    pub ephemeris: u8,

    /// Inclination, radians.
    pub inclination: f64,
    /// Right ascension of the ascending node, radians.
    pub ascension: f64,
    pub eccentricity: f64,
    /// Argument of perigee, radians.
    pub perigee: f64,
    /// Mean anomaly, radians.
    pub anomaly: f64,
    /// Mean motion, rad/min.
    pub motion: f64,
    pub revolution: u32,

    /// The raw TLE pair.
    pub lines: [String; 2],
}

impl Element {
    pub fn new(row1: &str, row2: &str) -> OrbitResult<Self> {
        if row1.len() != TLE_LINE_LEN {
            return Err(OrbitError::InvalidLength(row1.len()));
        }
        if row2.len() != TLE_LINE_LEN {
            return Err(OrbitError::InvalidLength(row2.len()));
        }

        let mut element = Self {
            sid: 0,
            when: DateTime::<Utc>::UNIX_EPOCH,
            epoch: JulianDate::new(0.0, 0.0),
            year: 0,
            day_of_year: 0.0,
            mean1: 0.0,
            mean2: 0.0,
            bstar: 0.0,
            ephemeris: 0,
            inclination: 0.0,
            ascension: 0.0,
            eccentricity: 0.0,
            perigee: 0.0,
            anomaly: 0.0,
            motion: 0.0,
            revolution: 0,
            lines: [row1.to_string(), row2.to_string()],
        };
        element.scan_line1(row1)?;
        element.scan_line2(row2)?;
        Ok(element)
    }

    fn scan_line1(&mut self, line: &str) -> OrbitResult<()> {
        check_line_number(line, 1, '1')?;

        self.sid = field(line, 1, 2..7)?;
        let year: i32 = field(line, 1, 18..20)?;
        self.day_of_year = field(line, 1, 20..32)?;

        let mean1: f64 = field(line, 1, 33..43)?;
        let mean2: f64 = field(line, 1, 44..50)?;
        let mean2_exp: i32 = field(line, 1, 50..52)?;
        let bstar: f64 = field(line, 1, 53..59)?;
        let bstar_exp: i32 = field(line, 1, 59..61)?;
        self.ephemeris = field_or(line, 62..63, 0);

        self.mean1 = mean1 / (XPDOTP * MINUTES_PER_DAY);
        self.mean2 = (mean2 / 1e5) * 10f64.powi(mean2_exp) / (XPDOTP * MINUTES_PER_DAY * MINUTES_PER_DAY);
        self.bstar = (bstar / 1e5) * 10f64.powi(bstar_exp);

        self.year = if year < YEAR_PIVOT {
            year + 2000
        } else {
            year + 1900
        };
        self.epoch = JulianDate::from_day_of_year(self.year, self.day_of_year)
            .map_err(|e| OrbitError::parse(1, e.to_string()))?;
        self.when = datetime_from_day_of_year(self.year, self.day_of_year)
            .map_err(|e| OrbitError::parse(1, e.to_string()))?;

        Ok(())
    }

    fn scan_line2(&mut self, line: &str) -> OrbitResult<()> {
        check_line_number(line, 2, '2')?;

        let inclination: f64 = field(line, 2, 8..16)?;
        let ascension: f64 = field(line, 2, 17..25)?;
        let eccentricity: f64 = field(line, 2, 26..33)?;
        let perigee: f64 = field(line, 2, 34..42)?;
        let anomaly: f64 = field(line, 2, 43..51)?;
        let motion: f64 = field(line, 2, 52..63)?;
        self.revolution = field_or(line, 63..68, 0);

        self.inclination = inclination.to_radians();
        self.ascension = ascension.to_radians();
        self.eccentricity = eccentricity / 1e7;
        self.perigee = perigee.to_radians();
        self.anomaly = anomaly.to_radians();
        self.motion = motion / XPDOTP;

        Ok(())
    }
}

fn check_line_number(line: &str, row: usize, expected: char) -> OrbitResult<()> {
    match line.chars().next() {
        Some(ch) if ch == expected => Ok(()),
        other => Err(OrbitError::LineNumber {
            row,
            found: other.map(String::from).unwrap_or_default(),
        }),
    }
}

/// Cuts a column range out of a line and parses it, reporting the columns
/// on failure.
fn field<T: FromStr>(line: &str, row: usize, columns: Range<usize>) -> OrbitResult<T> {
    let raw = line
        .get(columns.clone())
        .ok_or_else(|| OrbitError::parse(row, format!("columns {columns:?} out of line")))?
        .trim();
    raw.parse().map_err(|_| {
        OrbitError::parse(row, format!("bad field {raw:?} at columns {columns:?}"))
    })
}

/// Like [`field`] but substitutes a default when the columns are blank.
fn field_or<T: FromStr + Copy>(line: &str, columns: Range<usize>, default: T) -> T {
    line.get(columns)
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
