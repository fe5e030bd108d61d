//! Angle wrapping and sexagesimal rendering.

/// Wraps a value in degrees to the `[0, 360)` range.
#[inline]
pub fn wrap_degrees(v: f64) -> f64 {
    v - (v / 360.0).floor() * 360.0
}

/// Scales the fractional part of `f` by `x`.
///
/// Used by the sidereal-time breakdown of a Julian day into hours,
/// minutes and seconds.
#[inline]
pub fn frac_scaled(f: f64, x: f64) -> f64 {
    f.fract() * x
}

/// Hemisphere letters used when rendering an angle as DMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    /// South / North, for latitudes.
    Lat,
    /// West / East, for longitudes.
    Lon,
}

/// Renders a signed angle in degrees as `DDD° MM' SS.SSSS'' {N|S|E|W}`.
pub fn to_dms(v: f64, hemisphere: Hemisphere) -> String {
    let degrees = v.trunc();
    let minutes = (v.fract() * 60.0).trunc();
    let seconds = (v.fract() * 60.0).fract() * 60.0;

    let dir = match hemisphere {
        Hemisphere::Lat if v < 0.0 => "S",
        Hemisphere::Lat => "N",
        Hemisphere::Lon if v < 0.0 => "W",
        Hemisphere::Lon => "E",
    };

    format!(
        "{:3}° {:02}' {:7.4}'' {}",
        degrees.abs() as i64,
        minutes.abs() as i64,
        seconds.abs(),
        dir
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(370.0), 10.0);
        assert_eq!(wrap_degrees(-10.0), 350.0);
        assert_eq!(wrap_degrees(720.5), 0.5);
    }

    #[test]
    fn test_frac_scaled() {
        assert!((frac_scaled(2.5, 24.0) - 12.0).abs() < 1e-12);
        assert!((frac_scaled(10.25, 60.0) - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_to_dms_latitude() {
        let s = to_dms(-30.5, Hemisphere::Lat);
        assert!(s.contains("30°"), "got {s}");
        assert!(s.contains("30'"), "got {s}");
        assert!(s.ends_with('S'), "got {s}");
    }

    #[test]
    fn test_to_dms_longitude() {
        let s = to_dms(46.4464, Hemisphere::Lon);
        assert!(s.starts_with(" 46°"), "got {s}");
        assert!(s.contains("26'"), "got {s}");
        assert!(s.ends_with('E'), "got {s}");
    }
}
