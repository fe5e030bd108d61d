//! Adapter around the SGP4 numeric kernel.
//!
//! The kernel is initialized once per [`Element`] from the decoded mean
//! elements (already in radians and radians per minute, so they feed the
//! Kozai interface directly) with the WGS-84 gravity profile. The state is
//! an owned value, so it is released on every exit path.

use crate::element::Element;
use crate::errors::{OrbitError, OrbitResult};
use sattrack_core::constants::{DAYS_PER_JULIAN_YEAR, J2000_JD};
use sattrack_core::Vector3;

/// Initialized SGP4 state for one element.
#[derive(Debug)]
pub struct Kernel {
    constants: sgp4::Constants,
}

impl Kernel {
    pub fn init(element: &Element) -> OrbitResult<Self> {
        let orbit = sgp4::Orbit::from_kozai_elements(
            &sgp4::WGS84,
            element.inclination,
            element.ascension,
            element.eccentricity,
            element.perigee,
            element.anomaly,
            element.motion,
        )
        .map_err(OrbitError::from_kozai_error)?;

        let epoch_years = (element.epoch.value() - J2000_JD) / DAYS_PER_JULIAN_YEAR;
        let constants = sgp4::Constants::new(
            sgp4::WGS84,
            sgp4::iau_epoch_to_sidereal_time,
            epoch_years,
            element.bstar,
            orbit,
        )
        .map_err(OrbitError::from_epoch_eccentricity_error)?;

        Ok(Self { constants })
    }

    /// Propagates to `minutes` past the element epoch.
    ///
    /// Returns the TEME position in kilometers and velocity in kilometers
    /// per second.
    pub fn step(&self, minutes: f64) -> OrbitResult<(Vector3, Vector3)> {
        let prediction = self
            .constants
            .propagate(sgp4::MinutesSinceEpoch(minutes))
            .map_err(OrbitError::from_propagation_error)?;
        Ok((
            Vector3::from_array(prediction.position),
            Vector3::from_array(prediction.velocity),
        ))
    }
}

impl OrbitError {
    fn from_kozai_error(err: sgp4::KozaiElementsError) -> Self {
        let code = match err {
            sgp4::KozaiElementsError::NegativeKozaiMeanMotion
            | sgp4::KozaiElementsError::NegativeBrouwerMeanMotion => 2,
        };
        OrbitError::Propagation(code)
    }

    fn from_epoch_eccentricity_error(_err: sgp4::OutOfRangeEpochEccentricity) -> Self {
        OrbitError::Propagation(1)
    }

    fn from_propagation_error(err: sgp4::Error) -> Self {
        let code = match err {
            sgp4::Error::OutOfRangeEccentricity { .. }
            | sgp4::Error::OutOfRangePerturbedEccentricity { .. } => 3,
            sgp4::Error::NegativeSemiLatusRectum { .. } => 4,
        };
        OrbitError::Propagation(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    const LINE1: &str = "1 25544U 98067A   18304.35925926  .00001207  00000-0  25703-4 0  9998";
    const LINE2: &str = "2 25544  51.6416 264.9105 0005411 308.4548 133.5520 15.53872777139582";

    #[test]
    fn test_step_at_epoch_is_leo_radius() {
        let element = Element::new(LINE1, LINE2).unwrap();
        let kernel = Kernel::init(&element).unwrap();
        let (position, velocity) = kernel.step(0.0).unwrap();

        let radius = position.magnitude();
        assert!(
            radius > 6_600.0 && radius < 6_900.0,
            "radius {radius} km not in LEO"
        );

        let speed = velocity.magnitude();
        assert!(speed > 7.0 && speed < 8.0, "speed {speed} km/s not orbital");
    }

    #[test]
    fn test_half_orbit_is_opposite_side() {
        let element = Element::new(LINE1, LINE2).unwrap();
        let kernel = Kernel::init(&element).unwrap();

        let (p0, _) = kernel.step(0.0).unwrap();
        let half_period = std::f64::consts::PI / element.motion;
        let (p1, _) = kernel.step(half_period).unwrap();

        let cosine = p0.dot(&p1) / (p0.magnitude() * p1.magnitude());
        assert!(cosine < -0.9, "positions not antipodal: cos = {cosine}");
    }

    #[test]
    fn test_bad_eccentricity_maps_to_code_one() {
        let mut element = Element::new(LINE1, LINE2).unwrap();
        element.eccentricity = 1.5;
        match Kernel::init(&element) {
            Err(OrbitError::Propagation(1)) => {}
            other => panic!("expected Propagation(1), got {other:?}"),
        }
    }

    #[test]
    fn test_negative_mean_motion_maps_to_code_two() {
        let mut element = Element::new(LINE1, LINE2).unwrap();
        element.motion = -element.motion;
        match Kernel::init(&element) {
            Err(OrbitError::Propagation(2)) => {}
            other => panic!("expected Propagation(2), got {other:?}"),
        }
    }
}
