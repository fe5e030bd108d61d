//! Inertial-to-rotating frame rotation and the spherical Earth model.

use sattrack_core::constants::EARTH_RADIUS_M;
use sattrack_core::Vector3;

/// Rotates a TEME position into ECEF about the Z axis by the Greenwich
/// sidereal time, in radians. Units pass through unchanged.
pub fn teme_to_ecef(gst: f64, teme: &Vector3) -> Vector3 {
    let (sin, cos) = gst.sin_cos();
    Vector3::new(
        cos * teme.x + sin * teme.y,
        -sin * teme.x + cos * teme.y,
        teme.z,
    )
}

/// Spherical geocentric coordinates of an ECEF position in meters.
///
/// Returns `(latitude°, longitude°, altitude)` where latitude is the
/// declination of the radius vector and altitude is the height above the
/// mean-radius sphere, in meters.
pub fn geocentric_spherical(ecef: &Vector3) -> (f64, f64, f64) {
    let norm = ecef.magnitude();
    let lat = (ecef.z / norm).asin().to_degrees();
    let lon = ecef.y.atan2(ecef.x).to_degrees();
    (lat, lon, norm - EARTH_RADIUS_M)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_zero_rotation_is_identity() {
        let v = Vector3::new(7_000.0, -1_000.0, 2_000.0);
        assert_eq!(teme_to_ecef(0.0, &v), v);
    }

    #[test]
    fn test_quarter_rotation() {
        let v = Vector3::new(1.0, 0.0, 0.0);
        let r = teme_to_ecef(FRAC_PI_2, &v);
        assert!(r.x.abs() < 1e-15);
        assert!((r.y - -1.0).abs() < 1e-15);
        assert_eq!(r.z, 0.0);

        let v = Vector3::new(0.0, 1.0, 0.0);
        let r = teme_to_ecef(FRAC_PI_2, &v);
        assert!((r.x - 1.0).abs() < 1e-15);
        assert!(r.y.abs() < 1e-15);
    }

    #[test]
    fn test_rotation_preserves_magnitude() {
        let v = Vector3::new(6_524.834, 6_862.875, 6_448.296);
        let r = teme_to_ecef(2.5, &v);
        assert!((r.magnitude() - v.magnitude()).abs() < 1e-9);
    }

    #[test]
    fn test_spherical_on_equator() {
        let ecef = Vector3::new(EARTH_RADIUS_M + 400_000.0, 0.0, 0.0);
        let (lat, lon, alt) = geocentric_spherical(&ecef);
        assert_eq!(lat, 0.0);
        assert_eq!(lon, 0.0);
        assert!((alt - 400_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_spherical_latitude_sign() {
        let ecef = Vector3::new(4_000_000.0, 0.0, -4_000_000.0);
        let (lat, _, _) = geocentric_spherical(&ecef);
        assert!((lat - -45.0).abs() < 1e-9);
    }
}
