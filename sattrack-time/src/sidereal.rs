//! Greenwich sidereal time.

use sattrack_core::angle::{frac_scaled, wrap_degrees};
use sattrack_core::constants::{
    CNES_ZERO_POINT, DAYS_PER_JULIAN_CENTURY, J2000_JD, SECONDS_PER_DAY, SECONDS_PER_HOUR,
    SECONDS_PER_MINUTE,
};

/// Greenwich sidereal time for a Julian date, in radians.
///
/// Greenwich hour angle polynomial in Julian centuries since J2000, with
/// the time of day folded in through the fractional-day breakdown since
/// the CNES epoch. This is the rotation angle used for TEME→ECEF.
pub fn greenwich_sidereal_time(jd: f64) -> f64 {
    let t = (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY;

    let h = frac_scaled(jd - CNES_ZERO_POINT, 24.0);
    let m = frac_scaled(h, 60.0);
    let s = frac_scaled(m, 60.0);

    let h = h.floor() * SECONDS_PER_HOUR;
    let m = m.floor() * SECONDS_PER_MINUTE;

    let gha = 23_925.836 + 8_640_184.542 * t + 0.092 * t * t + (h + m + s);
    let gst = wrap_degrees(gha * (360.0 / SECONDS_PER_DAY));

    gst.to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    #[test]
    fn test_gst_range() {
        for jd in [2_451_545.0, 2_458_422.5, 2_440_587.5, 2_466_000.25] {
            let gst = greenwich_sidereal_time(jd);
            assert!((0.0..TAU).contains(&gst), "gst out of range at {jd}: {gst}");
        }
    }

    #[test]
    fn test_gst_known_value() {
        // 2018-10-31 08:38:00 UT
        let gst = greenwich_sidereal_time(2_458_422.859_722_222);
        assert!(
            (gst - 2.938_001_834_009_820_6).abs() < 1e-9,
            "gst = {gst}"
        );
    }

    #[test]
    fn test_gst_advances_with_time() {
        // One sidereal rotation takes slightly less than a day, so an hour
        // of elapsed time advances GST by a bit more than 15 degrees.
        let jd = 2_458_422.5;
        let g0 = greenwich_sidereal_time(jd);
        let g1 = greenwich_sidereal_time(jd + 1.0 / 24.0);
        let delta = (g1 - g0).rem_euclid(TAU).to_degrees();
        assert!((delta - 15.04).abs() < 0.05, "delta = {delta}");
    }
}
