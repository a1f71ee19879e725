//! Error types for the animation engine.

use thiserror::Error;

use super::types::{PropertyId, ValueKind};

/// Result type for animator operations.
pub type Result<T> = std::result::Result<T, AnimatorError>;

/// Errors raised by the animator.
///
/// Every variant is a caller error. Conditions that are expected at runtime
/// (unknown properties, missing animation keys, absent curves) never surface
/// as errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimatorError {
    /// A supplied value does not match the kind the catalog declares.
    #[error("value kind mismatch for {property}: expected {expected}, found {found}")]
    ValueKindMismatch {
        property: PropertyId,
        expected: ValueKind,
        found: ValueKind,
    },

    /// Time scale factors must be finite and non-negative.
    #[error("invalid time scale factor: {0}")]
    InvalidTimeScale(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AnimatorError::ValueKindMismatch {
            property: PropertyId::Opacity,
            expected: ValueKind::Scalar,
            found: ValueKind::Point,
        };
        assert_eq!(
            err.to_string(),
            "value kind mismatch for opacity: expected scalar, found point"
        );
        assert_eq!(
            AnimatorError::InvalidTimeScale(-1.0).to_string(),
            "invalid time scale factor: -1"
        );
    }
}
