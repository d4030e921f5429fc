//! Cross-cutting, shared constants.
//!
//! The embedding dimension must agree between the embedder and the store.
//! Use [`validate_embedding_dim`] at module boundaries to catch mismatches
//! early instead of deep inside a similarity query.

pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Score cutoff above which a listing is classified as counterfeit-risk.
pub const DEFAULT_FAKE_THRESHOLD: f32 = 0.70;

/// Neighborhood size used for authenticity comparison.
pub const DEFAULT_TOP_K: usize = 5;

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {}, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// Use this at module boundaries to catch mismatches early, rather than
/// deep inside a similarity query.
///
/// # Example
///
/// ```
/// use veracity::constants::{DEFAULT_EMBEDDING_DIM, validate_embedding_dim};
///
/// validate_embedding_dim(384, DEFAULT_EMBEDDING_DIM).unwrap();
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_embedding_dim_match() {
        assert!(validate_embedding_dim(384, 384).is_ok());
    }

    #[test]
    fn test_validate_embedding_dim_mismatch() {
        assert_eq!(
            validate_embedding_dim(256, 384),
            Err(DimValidationError::DimensionMismatch {
                expected: 384,
                actual: 256
            })
        );
    }

    #[test]
    fn test_validate_embedding_dim_zero() {
        assert_eq!(
            validate_embedding_dim(0, 0),
            Err(DimValidationError::ZeroDimension)
        );
    }

    #[test]
    fn test_error_display() {
        let err = DimValidationError::DimensionMismatch {
            expected: 384,
            actual: 256,
        };
        assert!(err.to_string().contains("384"));
        assert!(err.to_string().contains("256"));
    }
}
