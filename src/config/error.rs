use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading or validating configuration.
pub enum ConfigError {
    /// An environment variable held a value that does not parse as an integer.
    #[error("invalid value '{value}' for {var}: {source}")]
    InvalidInteger {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
        /// Parse error.
        source: std::num::ParseIntError,
    },

    /// An environment variable held a value that does not parse as a float.
    #[error("invalid value '{value}' for {var}: {source}")]
    InvalidFloat {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
        /// Parse error.
        source: std::num::ParseFloatError,
    },

    /// The fake-threshold must be a probability.
    #[error("fake threshold must be within [0, 1], got {value}")]
    ThresholdOutOfRange {
        /// Configured threshold.
        value: f32,
    },

    /// The embedding dimension cannot be zero.
    #[error("embedding dimension cannot be zero")]
    ZeroEmbeddingDim,

    /// The neighborhood size cannot be zero.
    #[error("top-k cannot be zero")]
    ZeroTopK,
}
