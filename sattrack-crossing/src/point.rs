//! Analyzer-side trajectory points.

use crate::errors::{AnalysisError, AnalysisResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use sattrack_coords::geodetic_to_ecef;
use sattrack_core::constants::ELLIPSOID_SEMI_MAJOR_KM;
use sattrack_core::Vector3;

/// Number of comma-separated fields in an annotated trajectory row.
pub const ROW_FIELDS: usize = 8;

const ROW_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// One annotated, already-converted trajectory sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub when: DateTime<Utc>,
    /// Geodetic latitude, degrees.
    pub lat: f64,
    /// Geodetic longitude, degrees.
    pub lon: f64,
    /// Altitude, kilometers.
    pub alt: f64,
    /// Full-eclipse flag.
    pub eclipse: bool,
    /// Region-crossing flag.
    pub saa: bool,
}

impl Point {
    /// Decodes one CSV row of the annotated trajectory format:
    /// `[0]` timestamp, `[2]` altitude, `[3]` latitude, `[4]` longitude,
    /// `[5]` eclipse, `[6]` crossing.
    pub fn from_row(line: &str) -> AnalysisResult<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != ROW_FIELDS {
            return Err(AnalysisError::parse(format!(
                "expected {ROW_FIELDS} fields, got {}",
                fields.len()
            )));
        }

        let when = NaiveDateTime::parse_from_str(fields[0].trim(), ROW_TIME_FORMAT)
            .map_err(|_| AnalysisError::parse(format!("bad timestamp {:?}", fields[0])))?
            .and_utc();

        Ok(Self {
            when,
            alt: number(fields[2])?,
            lat: number(fields[3])?,
            lon: number(fields[4])?,
            eclipse: flag(fields[5])?,
            saa: flag(fields[6])?,
        })
    }

    /// ECEF position in kilometers.
    pub fn ecef(&self) -> Vector3 {
        geodetic_to_ecef(self.lat, self.lon, self.alt)
    }

    /// Chord distance to another point in kilometers.
    pub fn distance(&self, other: &Point) -> f64 {
        self.ecef().distance(&other.ecef())
    }

    /// Great-circle distance to another point in kilometers, ignoring
    /// altitude.
    pub fn haversine(&self, other: &Point) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let h = (dlat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * ELLIPSOID_SEMI_MAJOR_KM * h.sqrt().asin()
    }
}

fn number(field: &str) -> AnalysisResult<f64> {
    field
        .trim()
        .parse()
        .map_err(|_| AnalysisError::parse(format!("bad number {field:?}")))
}

fn flag(field: &str) -> AnalysisResult<bool> {
    match field.trim() {
        "0" => Ok(false),
        "1" => Ok(true),
        other => other
            .parse()
            .map_err(|_| AnalysisError::parse(format!("bad flag {field:?}"))),
    }
}
