use thiserror::Error;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("fail to parse point: {0}")]
    Parse(String),

    #[error("zero margin")]
    ZeroMargin,

    #[error("fail to read configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Time(#[from] sattrack_time::TimeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(AnalysisError::ZeroMargin.to_string(), "zero margin");
        assert!(AnalysisError::parse("row 3")
            .to_string()
            .contains("row 3"));
    }
}
