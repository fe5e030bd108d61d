//! Low-precision solar ephemeris.

use sattrack_core::constants::{DAYS_PER_JULIAN_CENTURY, J2000_JD, SECONDS_PER_HOUR};
use sattrack_core::Vector3;

/// Ecliptic longitude of perihelion, degrees.
const OMEGA: f64 = 282.94;

/// Mean obliquity of the ecliptic, degrees.
const OBLIQUITY: f64 = 23.439_291_11;

/// Sun position in the inertial frame for a Julian date, in meters.
///
/// Mean-anomaly series truncated to two terms; good to a fraction of a
/// degree, which is all the eclipse geometry needs.
pub fn sun_position(jd: f64) -> Vector3 {
    let t = (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY;
    let m = 357.5256 + 35_999.049 * t;

    let ecliptic = OMEGA
        + m
        + (6_892.0 / SECONDS_PER_HOUR) * m.to_radians().sin()
        + (72.0 / SECONDS_PER_HOUR) * (2.0 * m).to_radians().sin();
    let distance =
        (149.619 - 2.499 * m.to_radians().cos() - 0.021 * (2.0 * m).to_radians().cos()) * 1e9;

    let (sin_ecl, cos_ecl) = ecliptic.to_radians().sin_cos();
    let (sin_obl, cos_obl) = OBLIQUITY.to_radians().sin_cos();

    Vector3::new(
        distance * cos_ecl,
        distance * sin_ecl * cos_obl,
        distance * sin_ecl * sin_obl,
    )
}
