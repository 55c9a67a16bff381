//! Error types for Sufra core.

use std::{error::Error, fmt};

/// Error type for Sufra core operations.
#[derive(Debug)]
pub enum SufraError {
    /// A menu data read failed (storage or transport).
    Source(String),
    /// A catch-all error with a message.
    Other(String),
}

impl SufraError {
    /// Build a source-read error from any displayable cause.
    pub fn source(cause: impl fmt::Display) -> Self {
        Self::Source(cause.to_string())
    }
}

impl fmt::Display for SufraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(message) => write!(f, "menu source error: {message}"),
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

impl Error for SufraError {}

/// Convenience result type for Sufra core.
pub type Result<T> = std::result::Result<T, SufraError>;

#[cfg(test)]
mod tests {
    use super::SufraError;

    #[test]
    fn source_error_formats_message() {
        let error = SufraError::source("connection refused");
        assert_eq!(format!("{error}"), "menu source error: connection refused");
    }

    #[test]
    fn other_error_formats_message() {
        let error = SufraError::Other("sufra failed".to_string());
        assert_eq!(format!("{error}"), "sufra failed");
    }
}
