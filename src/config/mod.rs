//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `VERACITY_*` environment
//! variables. Loaded once at startup and passed by reference into component
//! constructors; nothing reads the environment after that.

pub mod error;


pub use error::ConfigError;

use std::env;

use crate::constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_FAKE_THRESHOLD, DEFAULT_TOP_K};

/// Default Qdrant URL used when `VERACITY_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Default collection holding the analyzed-product catalog.
pub const DEFAULT_COLLECTION: &str = "products";

/// Default narrative model identifier passed to the genai client.
pub const DEFAULT_NARRATIVE_MODEL: &str = "gpt-4o-mini";

/// Process configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VERACITY_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Embedding vector dimension. Default: `384`.
    pub embedding_dim: usize,

    /// Score cutoff for the counterfeit-risk classification. Default: `0.7`.
    pub fake_threshold: f32,

    /// Number of neighbors retrieved per analysis. Default: `5`.
    pub top_k: usize,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Catalog collection name. Default: `products`.
    pub collection: String,

    /// Narrative model identifier. Default: `gpt-4o-mini`.
    pub narrative_model: String,

    /// Narrative sampling temperature. Default: `0.1`.
    pub narrative_temperature: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            fake_threshold: DEFAULT_FAKE_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            narrative_model: DEFAULT_NARRATIVE_MODEL.to_string(),
            narrative_temperature: 0.1,
        }
    }
}

impl Config {
    const ENV_EMBEDDING_DIM: &'static str = "VERACITY_EMBEDDING_DIM";
    const ENV_FAKE_THRESHOLD: &'static str = "VERACITY_FAKE_THRESHOLD";
    const ENV_TOP_K: &'static str = "VERACITY_TOP_K";
    const ENV_QDRANT_URL: &'static str = "VERACITY_QDRANT_URL";
    const ENV_COLLECTION: &'static str = "VERACITY_COLLECTION";
    const ENV_NARRATIVE_MODEL: &'static str = "VERACITY_NARRATIVE_MODEL";
    const ENV_NARRATIVE_TEMPERATURE: &'static str = "VERACITY_NARRATIVE_TEMPERATURE";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let embedding_dim =
            Self::parse_usize_from_env(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim)?;
        let fake_threshold =
            Self::parse_f32_from_env(Self::ENV_FAKE_THRESHOLD, defaults.fake_threshold)?;
        let top_k = Self::parse_usize_from_env(Self::ENV_TOP_K, defaults.top_k)?;
        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let collection = Self::parse_string_from_env(Self::ENV_COLLECTION, defaults.collection);
        let narrative_model =
            Self::parse_string_from_env(Self::ENV_NARRATIVE_MODEL, defaults.narrative_model);
        let narrative_temperature = Self::parse_f64_from_env(
            Self::ENV_NARRATIVE_TEMPERATURE,
            defaults.narrative_temperature,
        )?;

        Ok(Self {
            embedding_dim,
            fake_threshold,
            top_k,
            qdrant_url,
            collection,
            narrative_model,
            narrative_temperature,
        })
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.embedding_dim == 0 {
            return Err(ConfigError::ZeroEmbeddingDim);
        }
        if self.top_k == 0 {
            return Err(ConfigError::ZeroTopK);
        }
        if !(0.0..=1.0).contains(&self.fake_threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                value: self.fake_threshold,
            });
        }
        Ok(())
    }

    fn parse_usize_from_env(var: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var) {
            Ok(value) => value.parse().map_err(|e| ConfigError::InvalidInteger {
                var,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_f32_from_env(var: &'static str, default: f32) -> Result<f32, ConfigError> {
        match env::var(var) {
            Ok(value) => value.parse().map_err(|e| ConfigError::InvalidFloat {
                var,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_f64_from_env(var: &'static str, default: f64) -> Result<f64, ConfigError> {
        match env::var(var) {
            Ok(value) => value.parse().map_err(|e| ConfigError::InvalidFloat {
                var,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var: &'static str, default: String) -> String {
        env::var(var).unwrap_or(default)
    }
}
