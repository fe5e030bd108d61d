//! Coordinate frame transforms: TEME→ECEF rotation and conversions
//! between ECEF and geographic (geodetic / geocentric) coordinates.

pub mod ecef;
pub mod geodetic;

pub use ecef::{geocentric_spherical, teme_to_ecef};
pub use geodetic::{geocentric_from_ecef, geodetic_from_ecef, geodetic_to_ecef};
