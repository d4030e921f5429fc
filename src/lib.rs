//! Veracity library crate (used by the demo binary and integration tests).
//!
//! Estimates whether a marketplace listing is counterfeit by combining
//! nearest-neighbor retrieval over previously analyzed listings with a
//! heuristic price/brand scoring pass and a narrative re-analysis from an
//! external text generator.
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Pipeline
//! - [`AnalysisAgent`], [`AnalysisResult`], [`Authenticity`] - Orchestration
//! - [`HeuristicScorer`], [`HeuristicAssessment`] - Neighborhood scoring
//! - [`NarrativeAnalyzer`], [`NarrativeAssessment`] - Narrative re-analysis
//!
//! ## Embedding
//! - [`TextEmbedder`], [`HashedEmbedder`] - Text-to-vector generation
//!
//! ## Catalog
//! - [`ProductStore`] - Narrow store interface
//! - [`QdrantProductStore`], [`InMemoryProductStore`] - Backends
//! - [`ProductRecord`], [`StoredProduct`], [`SimilarProduct`] - Data model
//!
//! ## Collaborators
//! - [`NarrativeClient`] - Opaque text-generation capability
//! - [`GenAiNarrativeClient`], [`SimulatedNarrativeClient`] - Implementations
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - Process configuration
//! - Dimension constants and [`validate_embedding_dim`]

pub mod agent;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod hashing;
pub mod narrative;
pub mod product;
pub mod scoring;
pub mod vectordb;

pub use agent::{AgentError, AnalysisAgent, AnalysisResult, Authenticity};
pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_EMBEDDING_DIM, DEFAULT_FAKE_THRESHOLD, DEFAULT_TOP_K, DimValidationError,
    validate_embedding_dim,
};
pub use embedding::{HashedEmbedder, TextEmbedder};
pub use hashing::{embedding_seed, hash_to_u64};
pub use narrative::{
    GenAiNarrativeClient, NarrativeAnalyzer, NarrativeAssessment, NarrativeClient, NarrativeError,
    SimulatedNarrativeClient,
};
pub use product::{ProductRecord, StoredProduct, ValidationError};
pub use scoring::{HeuristicAssessment, HeuristicScorer};
pub use vectordb::{
    InMemoryProductStore, ProductStore, QdrantProductStore, SimilarProduct, VectorDbError,
    cosine_similarity,
};
