//! Geodetic and geocentric conversions over the oblate ellipsoid.
//!
//! All functions here work in kilometers and degrees. The ellipsoid
//! constants live in `sattrack_core::constants` (see Vallado for the
//! reference values).

use sattrack_core::constants::{
    ELLIPSOID_ECCENTRICITY_SQUARED as E2, ELLIPSOID_FLATTENING as FLATTENING,
    ELLIPSOID_SEMI_MAJOR_KM as SEMI_MAJOR,
};
use sattrack_core::Vector3;

const TOLERANCE: f64 = 1e-8;
const MAX_REFINEMENTS: usize = 2;

/// Geodetic coordinates `(latitude°, longitude°, altitude km)` of an ECEF
/// position in kilometers.
pub fn geodetic_from_ecef(ecef: &Vector3) -> (f64, f64, f64) {
    let (lat, lon, alt) = ecef_to_geodetic_rad(ecef);
    (lat.to_degrees(), lon.to_degrees(), alt)
}

/// Geocentric coordinates `(latitude°, longitude°, altitude km)` of an
/// ECEF position in kilometers.
///
/// Latitude is the geodetic latitude folded through the ellipsoid
/// (`atan((1 - e²)·tan φ)`); altitude is the height above the semi-major
/// sphere.
pub fn geocentric_from_ecef(ecef: &Vector3) -> (f64, f64, f64) {
    let (lat, lon, _) = ecef_to_geodetic_rad(ecef);
    let norm = ecef.magnitude();
    let geocentric = ((1.0 - E2) * lat.tan()).atan();
    (geocentric.to_degrees(), lon.to_degrees(), norm - SEMI_MAJOR)
}

/// ECEF position in kilometers of geodetic coordinates given as degrees
/// and kilometers.
pub fn geodetic_to_ecef(lat: f64, lon: f64, alt: f64) -> Vector3 {
    let lat = lat.to_radians();
    let lon = lon.to_radians();

    let sin2 = lat.sin() * lat.sin();
    let n = SEMI_MAJOR * (1.0 - FLATTENING * (2.0 - FLATTENING) * sin2).powf(-0.5);

    Vector3::new(
        (n + alt) * lat.cos() * lon.cos(),
        (n + alt) * lat.cos() * lon.sin(),
        (n * (1.0 - E2) + alt) * lat.sin(),
    )
}

/// Iterative geodetic solution, radians and kilometers.
///
/// Starts from the spherical declination and refines the latitude through
/// the prime vertical radius until the update falls under the tolerance,
/// capped at two refinements. Near the poles the longitude is pinned to
/// zero rather than left to `atan2(0, 0)`.
fn ecef_to_geodetic_rad(ecef: &Vector3) -> (f64, f64, f64) {
    let norm = ecef.magnitude();
    let radius = (ecef.x * ecef.x + ecef.y * ecef.y).sqrt();

    let lon = if radius < TOLERANCE {
        0.0
    } else {
        ecef.y.atan2(ecef.x)
    };

    let mut lat = (ecef.z / norm).asin();
    let mut alt = 0.0;
    for _ in 0..MAX_REFINEMENTS {
        let previous = lat;
        let sin = lat.sin();
        let c = SEMI_MAJOR / (1.0 - E2 * sin * sin).sqrt();

        lat = ((ecef.z + c * E2 * sin) / radius).atan();
        alt = radius / lat.cos() - c;
        if (previous - lat).abs() <= TOLERANCE {
            break;
        }
    }
    (lat, lon, alt)
}
