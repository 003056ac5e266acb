//! Error types for the facade
//!
//! Logging calls themselves never return errors; this type covers level
//! parsing and sink I/O, which surface through construction and the sinks.

pub type Result<T> = std::result::Result<T, FacadeError>;

#[derive(Debug, thiserror::Error)]
pub enum FacadeError {
    /// Level name that is not one of the seven supported levels
    #[error("unknown log level '{0}'")]
    UnknownLevel(String),

    /// IO error from a sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Sink failure with context
    #[error("sink '{name}' failed: {message}")]
    Sink { name: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl FacadeError {
    /// Create a sink error with context
    pub fn sink(name: impl Into<String>, message: impl Into<String>) -> Self {
        FacadeError::Sink {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        FacadeError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FacadeError::UnknownLevel("verbose".to_string());
        assert_eq!(err.to_string(), "unknown log level 'verbose'");

        let err = FacadeError::sink("writer", "pipe closed");
        assert_eq!(err.to_string(), "sink 'writer' failed: pipe closed");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let err: FacadeError = io_err.into();
        assert!(matches!(err, FacadeError::Io(_)));
    }
}
