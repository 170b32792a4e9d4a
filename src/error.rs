//! Error types for the ant simulator, homology oracle and metrics pipeline.
//!
//! Library code returns [`Result`]; binaries wrap it in `anyhow` with context.

use thiserror::Error;

/// Main error type for collatz_ant_tda operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Seeds must be positive integers
    #[error("invalid seed {0}: start value must be >= 1")]
    InvalidSeed(u64),

    /// Seed range rejected by the pipeline
    #[error("invalid seed range {min}..={max}")]
    InvalidRange { min: u64, max: u64 },

    /// 3n+1 no longer fits in the value type
    #[error("collatz value overflow after {value}")]
    ValueOverflow { value: u64 },

    /// Homology computation failed
    #[error("homology oracle error: {0}")]
    Oracle(String),

    /// Malformed CSV artifact
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Configuration errors
    #[error("config error: {0}")]
    Config(String),

    /// File system errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML decoding errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for collatz_ant_tda operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new oracle error.
    #[must_use]
    pub fn oracle<S: Into<String>>(msg: S) -> Self {
        Self::Oracle(msg.into())
    }

    /// Creates a new parse error for a 1-based line number.
    #[must_use]
    pub fn parse<S: Into<String>>(line: usize, msg: S) -> Self {
        Self::Parse {
            line,
            message: msg.into(),
        }
    }

    /// Creates a new config error.
    #[must_use]
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::oracle("non-finite coordinate");
        assert_eq!(
            err.to_string(),
            "homology oracle error: non-finite coordinate"
        );
    }

    #[test]
    fn test_parse_error_carries_line() {
        let err = Error::parse(3, "expected 4 fields");
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
