//! Error taxonomy of the propagation pipeline.

use thiserror::Error;

pub type OrbitResult<T> = Result<T, OrbitError>;

/// Number of characters in a TLE data line.
pub const TLE_LINE_LEN: usize = 69;

#[derive(Debug, Error)]
pub enum OrbitError {
    /// A data line that is not exactly 69 characters long.
    #[error("invalid row length {0} ({TLE_LINE_LEN})")]
    InvalidLength(usize),

    /// The stream ended before both data lines of a record were read.
    #[error("missing row#{}", .0 + 1)]
    MissingRow(usize),

    /// A data line whose leading line-number field is not 1 or 2.
    #[error("bad line number on row#{row}: {found:?}")]
    LineNumber { row: usize, found: String },

    /// A numeric field that failed to decode in a well-shaped line.
    #[error("fail to scan row#{row}: {cause}")]
    Parse { row: usize, cause: String },

    /// A B* drag term beyond the configured limit.
    #[error("bstar drag coefficient exceed limit: {0:.6}")]
    Drag(f64),

    /// A kernel-reported propagation failure, carrying the classic
    /// numeric code.
    #[error("{}", propagation_message(*.0))]
    Propagation(u8),

    #[error("propagation period shorter than step")]
    ShortPeriod,

    #[error("no propagation beyond base time")]
    BaseTime,

    /// Failure reading the TLE stream itself.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl OrbitError {
    pub fn parse(row: usize, cause: impl Into<String>) -> Self {
        Self::Parse {
            row,
            cause: cause.into(),
        }
    }
}

fn propagation_message(code: u8) -> &'static str {
    match code {
        1 => "mean elements, ecc >= 1.0 or ecc < -0.001 or a < 0.95",
        2 => "mean motion less than 0.0",
        3 => "pert elements, ecc < 0.0  or  ecc > 1.0",
        4 => "semi-latus rectum < 0.0",
        5 => "epoch elements are sub-orbital",
        6 => "satellite has decayed",
        _ => "propagation error",
    }
}
