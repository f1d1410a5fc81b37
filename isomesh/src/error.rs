//! Error types for isomesh operations.

use isomesh_core::IsoCoreError;
use thiserror::Error;

/// Errors that can occur while configuring or exporting a generation.
///
/// Broken internal invariants (a full triangle buffer) are not represented
/// here: they panic.
#[derive(Error, Debug)]
pub enum IsoError {
    /// A configuration value is out of its valid domain.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the offending value.
        message: String,
    },

    /// A checked lookup in the core tables or grid failed.
    #[error("core lookup failed: {0}")]
    Core(#[from] IsoCoreError),

    /// I/O error while writing a mesh or reading a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration.
    #[cfg(feature = "serde")]
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IsoError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        IsoError::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Result type alias for isomesh operations.
pub type Result<T> = std::result::Result<T, IsoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IsoError::invalid_config("cell_size must be positive");
        assert_eq!(
            err.to_string(),
            "invalid configuration: cell_size must be positive"
        );

        let err = IsoError::from(IsoCoreError::EdgeOutOfRange { edge: 14 });
        assert_eq!(err.to_string(), "core lookup failed: edge id 14 is outside 0..12");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: IsoError = io.into();
        assert!(matches!(err, IsoError::Io(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
