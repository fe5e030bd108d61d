use thiserror::Error;

pub type TimeResult<T> = Result<T, TimeError>;

#[derive(Debug, Error)]
pub enum TimeError {
    #[error("invalid time literal: {0}")]
    InvalidTime(String),

    #[error("invalid duration literal: {0}")]
    InvalidDuration(String),

    #[error("day of year {day} out of range for {year}")]
    InvalidDayOfYear { year: i32, day: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = TimeError::InvalidTime("20-20-20".to_string());
        assert!(err.to_string().contains("20-20-20"));

        let err = TimeError::InvalidDayOfYear {
            year: 2018,
            day: 367.5,
        };
        assert!(err.to_string().contains("2018"));
        assert!(err.to_string().contains("367.5"));
    }
}
