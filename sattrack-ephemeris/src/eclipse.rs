//! Umbra/penumbra classification from satellite and Sun geometry.

use crate::sun::sun_position;
use sattrack_core::constants::{EARTH_RADIUS_M, SUN_RADIUS_M};
use sattrack_core::Vector3;

/// Shadow classification of a single sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EclipseStatus {
    /// Satellite is inside the umbra (full eclipse).
    pub umbra: bool,
    /// Satellite is inside the penumbra (partial eclipse).
    pub penumbra: bool,
}

/// Classifies one sample from the satellite and Sun positions, both in
/// meters in the same inertial frame.
///
/// Compares the Earth-Sun angle seen from the satellite against the
/// apparent angular radii of both bodies: inside the umbra the Earth disc
/// fully covers the Sun disc, inside the penumbra the discs overlap.
pub fn classify(satellite: &Vector3, sun: &Vector3) -> EclipseStatus {
    let direction = (*sun - *satellite).normalize();
    let nadir = (-*satellite).normalize();

    let earth_sun_angle = direction.dot(&nadir).clamp(-1.0, 1.0).acos();
    let earth_angle = (EARTH_RADIUS_M / satellite.magnitude()).asin();
    let sun_angle = (SUN_RADIUS_M / sun.magnitude()).asin();

    let separation = (earth_angle - sun_angle).abs();
    EclipseStatus {
        umbra: earth_sun_angle < separation && earth_angle > sun_angle,
        penumbra: earth_sun_angle > separation && earth_angle + sun_angle > earth_sun_angle,
    }
}

/// Classifies a whole track of satellite positions (meters) against the
/// solar position at each sample's Julian date.
pub fn classify_track(satellites: &[Vector3], julian_dates: &[f64]) -> Vec<EclipseStatus> {
    satellites
        .iter()
        .zip(julian_dates)
        .map(|(satellite, &jd)| classify(satellite, &sun_position(jd)))
        .collect()
}
