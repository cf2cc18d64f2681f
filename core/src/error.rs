use thiserror::Error;

/// Result type for snsim operations
pub type Result<T> = std::result::Result<T, SnsimError>;

/// Error types for snsim operations
#[derive(Error, Debug)]
pub enum SnsimError {
    /// Matrix could not be inverted while composing a projection
    #[error("Singular matrix: {0}")]
    SingularMatrix(String),

    /// A tracked projection was requested without volume or tracking inputs
    #[error("Calibration unavailable: {0}")]
    CalibrationUnavailable(String),

    /// Scene node not found
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Scene node exists but has a different kind
    #[error("Unexpected node kind for '{name}': expected {expected}")]
    NodeKindMismatch { name: String, expected: &'static str },

    /// Parent links form a loop
    #[error("Transform cycle detected at node: {0}")]
    TransformCycle(String),

    /// Invalid value
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Generic computation error
    #[error("Computation error: {0}")]
    ComputationError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// Helper conversions
impl From<String> for SnsimError {
    fn from(s: String) -> Self {
        SnsimError::ComputationError(s)
    }
}

impl From<&str> for SnsimError {
    fn from(s: &str) -> Self {
        SnsimError::ComputationError(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SnsimError::SingularMatrix("tracked source".to_string());
        assert_eq!(err.to_string(), "Singular matrix: tracked source");

        let err = SnsimError::NodeKindMismatch {
            name: "PhantomCT".to_string(),
            expected: "volume",
        };
        assert_eq!(
            err.to_string(),
            "Unexpected node kind for 'PhantomCT': expected volume"
        );
    }

    #[test]
    fn test_string_conversion() {
        let err: SnsimError = "bad".into();
        assert!(matches!(err, SnsimError::ComputationError(ref s) if s == "bad"));
    }
}
