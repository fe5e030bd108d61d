//! Process exit codes.
//!
//! 0 on success, 22 for invalid usage or invalid input, 5 for I/O
//! failures, and the 5000+ class for domain failures.

use sattrack_orbit::OrbitError;
use sattrack_time::TimeError;

pub const EINVALID: i32 = 22;
pub const EIO: i32 = 5;

pub const TLE_FORMAT: i32 = 5001;
pub const TLE_DATA: i32 = 5002;
pub const PROPAGATION: i32 = 5003;
pub const DRAG: i32 = 5004;

pub fn code(err: &anyhow::Error) -> i32 {
    if let Some(orbit) = err.downcast_ref::<OrbitError>() {
        return match orbit {
            OrbitError::InvalidLength(_)
            | OrbitError::ShortPeriod
            | OrbitError::BaseTime => EINVALID,
            OrbitError::MissingRow(_) | OrbitError::LineNumber { .. } => TLE_FORMAT,
            OrbitError::Parse { .. } => TLE_DATA,
            OrbitError::Propagation(_) => PROPAGATION,
            OrbitError::Drag(_) => DRAG,
            OrbitError::Io(_) => EIO,
        };
    }
    if err.downcast_ref::<TimeError>().is_some() {
        return EINVALID;
    }
    if err.downcast_ref::<std::io::Error>().is_some()
        || err.downcast_ref::<reqwest::Error>().is_some()
    {
        return EIO;
    }
    EINVALID
}
