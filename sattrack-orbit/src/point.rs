//! Annotated trajectory samples.
//!
//! The propagator emits [`TemePoint`]s: raw kernel output plus the derived
//! flags. Converting one yields a [`GeoPoint`] in geographic coordinates;
//! the conversion only exists on the raw type, so a converted point cannot
//! be converted again.

use chrono::{DateTime, Utc};
use sattrack_coords::{
    geocentric_from_ecef, geocentric_spherical, geodetic_from_ecef, teme_to_ecef,
};
use sattrack_core::constants::CNES_ZERO_POINT;
use sattrack_core::Vector3;
use sattrack_time::greenwich_sidereal_time;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A raw propagation sample: TEME position in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemePoint {
    #[serde(rename = "dtstamp")]
    pub when: DateTime<Utc>,
    /// Julian date of the sample.
    #[serde(rename = "jd")]
    pub epoch: f64,
    #[serde(flatten)]
    pub position: Vector3,
    /// Region-crossing flag.
    #[serde(rename = "crossing")]
    pub saa: bool,
    /// Full eclipse (umbra).
    #[serde(rename = "eclipse")]
    pub total: bool,
    /// Partial eclipse (penumbra).
    #[serde(skip)]
    pub partial: bool,
}

/// A converted sample: geographic coordinates in degrees, altitude in
/// kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    #[serde(rename = "dtstamp")]
    pub when: DateTime<Utc>,
    #[serde(rename = "jd")]
    pub epoch: f64,
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
    #[serde(rename = "crossing")]
    pub saa: bool,
    #[serde(rename = "eclipse")]
    pub total: bool,
    #[serde(skip)]
    pub partial: bool,
}

impl TemePoint {
    /// CNES Modified Julian Day of the sample.
    pub fn mjd(&self) -> f64 {
        self.epoch - CNES_ZERO_POINT
    }

    /// ECEF position in kilometers, rotated by the sidereal time of the
    /// sample's own Julian date.
    pub fn ecef(&self) -> Vector3 {
        teme_to_ecef(greenwich_sidereal_time(self.epoch), &self.position)
    }

    /// Geodetic conversion over the oblate ellipsoid.
    pub fn geodetic(&self) -> GeoPoint {
        let (lat, lon, alt) = geodetic_from_ecef(&self.ecef());
        self.with_coordinates(lat, lon, alt)
    }

    /// Geocentric conversion over the oblate ellipsoid.
    pub fn geocentric(&self) -> GeoPoint {
        let (lat, lon, alt) = geocentric_from_ecef(&self.ecef());
        self.with_coordinates(lat, lon, alt)
    }

    /// Spherical conversion over the mean-radius Earth.
    pub fn classic(&self) -> GeoPoint {
        let (lat, lon, alt) = geocentric_spherical(&(self.ecef() * 1_000.0));
        self.with_coordinates(lat, lon, alt / 1_000.0)
    }

    fn with_coordinates(&self, lat: f64, lon: f64, alt: f64) -> GeoPoint {
        GeoPoint {
            when: self.when,
            epoch: self.epoch,
            lat,
            lon,
            alt,
            saa: self.saa,
            total: self.total,
            partial: self.partial,
        }
    }
}

impl GeoPoint {
    /// CNES Modified Julian Day of the sample.
    pub fn mjd(&self) -> f64 {
        self.epoch - CNES_ZERO_POINT
    }
}

/// A geographic region tested against converted points.
pub trait Region: Send + Sync {
    fn contains(&self, point: &GeoPoint) -> bool;
}

/// Latitude/longitude rectangle with exclusive bounds.
///
/// The default value covers the South Atlantic Anomaly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLonRect {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Default for LatLonRect {
    fn default() -> Self {
        Self {
            north: -5.0,
            south: -60.0,
            east: 40.0,
            west: -80.0,
        }
    }
}

impl Region for LatLonRect {
    fn contains(&self, point: &GeoPoint) -> bool {
        (point.lat > self.south && point.lat < self.north)
            && (point.lon > self.west && point.lon < self.east)
    }
}

impl fmt::Display for LatLonRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rect({:.2}N:{:.2}E:{:.2}S:{:.2}W)",
            self.north, self.east, self.south, self.west
        )
    }
}

impl FromStr for LatLonRect {
    type Err = String;

    /// Parses a `north:east:south:west` literal in degrees.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 4 {
            return Err(format!("expected north:east:south:west, got {s:?}"));
        }
        let mut values = [0.0; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| format!("bad coordinate {part:?}"))?;
        }
        Ok(Self {
            north: values[0],
            east: values[1],
            south: values[2],
            west: values[3],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> TemePoint {
        TemePoint {
            when: Utc.with_ymd_and_hms(2018, 10, 31, 8, 38, 0).unwrap(),
            epoch: 2_458_422.859_722_222,
            position: Vector3::new(6_524.834, 6_862.875, 6_448.296),
            saa: false,
            total: false,
            partial: false,
        }
    }

    #[test]
    fn test_mjd() {
        let point = sample();
        assert!((point.mjd() - (point.epoch - 2_433_282.5)).abs() < 1e-12);
    }

    #[test]
    fn test_conversions_agree_on_longitude() {
        let point = sample();
        let geodetic = point.geodetic();
        let geocentric = point.geocentric();
        assert!((geodetic.lon - geocentric.lon).abs() < 1e-9);
        assert!(geodetic.lat > geocentric.lat);
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let point = sample();
        assert_eq!(point.geodetic(), point.geodetic());
    }

    #[test]
    fn test_conversion_preserves_flags() {
        let mut point = sample();
        point.saa = true;
        point.total = true;
        let converted = point.geodetic();
        assert!(converted.saa);
        assert!(converted.total);
        assert!(!converted.partial);
    }

    #[test]
    fn test_classic_altitude_in_km() {
        let point = sample();
        let spherical = point.classic();
        let radius = point.position.magnitude();
        assert!((spherical.alt - (radius - 6_378.136)).abs() < 1e-6);
    }

    #[test]
    fn test_default_rect_is_saa() {
        let rect = LatLonRect::default();
        let mut point = sample().geodetic();
        point.lat = -30.0;
        point.lon = -40.0;
        assert!(rect.contains(&point));

        point.lat = 10.0;
        assert!(!rect.contains(&point));

        point.lat = -30.0;
        point.lon = 60.0;
        assert!(!rect.contains(&point));
    }

    #[test]
    fn test_rect_bounds_are_exclusive() {
        let rect = LatLonRect::default();
        let mut point = sample().geodetic();
        point.lat = -5.0;
        point.lon = -40.0;
        assert!(!rect.contains(&point));
    }

    #[test]
    fn test_rect_from_str() {
        let rect: LatLonRect = "-5:40:-60:-80".parse().unwrap();
        assert_eq!(rect, LatLonRect::default());
        assert!("-5:40:-60".parse::<LatLonRect>().is_err());
        assert!("a:b:c:d".parse::<LatLonRect>().is_err());
    }
}
