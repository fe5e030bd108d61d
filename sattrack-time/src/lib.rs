//! Time scales for ground-track prediction: Julian and modified Julian
//! dates, TLE epoch decoding, sidereal time, and the duration/instant
//! literal parsing shared by the command-line tools.

pub mod errors;
pub mod julian;
pub mod parsing;
pub mod sidereal;

pub use errors::{TimeError, TimeResult};
pub use julian::JulianDate;
pub use parsing::{parse_duration, parse_time};
pub use sidereal::greenwich_sidereal_time;
