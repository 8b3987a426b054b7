use std::fmt;

/// Result type for termtable-data operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while importing or exporting table data
#[derive(Debug)]
pub enum Error {
    /// Input parsed but does not have a tabular shape
    Format(String),

    /// JSON encoding or decoding failed
    Json(serde_json::Error),

    /// CSV encoding or decoding failed
    Csv(csv::Error),

    /// IO operation failed
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Format(msg) => write!(f, "Format error: {}", msg),
            Error::Json(err) => write!(f, "Format error: invalid JSON: {}", err),
            Error::Csv(err) => write!(f, "CSV error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(err) => Some(err),
            Error::Csv(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Format(_) => None,
        }
    }
}

impl Error {
    /// True for every failure caused by malformed input rather than IO.
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_) | Error::Json(_) | Error::Csv(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_reads_as_format_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = Error::from(json_err);

        assert!(err.is_format());
        assert!(err.to_string().starts_with("Format error: invalid JSON"));
    }

    #[test]
    fn test_io_error_is_not_format() {
        let err = Error::from(std::io::Error::other("boom"));
        assert!(!err.is_format());
        assert_eq!(err.to_string(), "IO error: boom");
    }
}
