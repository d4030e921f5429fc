//! Analysis orchestration.
//!
//! [`AnalysisAgent`] sequences the pipeline: validate, embed once, retrieve
//! neighbors, score heuristically, re-derive narratively, combine, persist,
//! return. Data-quality problems degrade inside the stages; infrastructure
//! failures fail the request visibly.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::embedding::TextEmbedder;
use crate::narrative::{NarrativeAnalyzer, NarrativeClient};
use crate::product::{ProductRecord, StoredProduct, ValidationError};
use crate::scoring::HeuristicScorer;
use crate::vectordb::{ProductStore, SimilarProduct, VectorDbError};

/// Two-level authenticity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Authenticity {
    #[serde(rename = "Potentially Fake")]
    PotentiallyFake,
    #[serde(rename = "Likely Authentic")]
    LikelyAuthentic,
}

impl std::fmt::Display for Authenticity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PotentiallyFake => write!(f, "Potentially Fake"),
            Self::LikelyAuthentic => write!(f, "Likely Authentic"),
        }
    }
}

/// Composite outcome of one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Catalog id assigned when the analyzed product was persisted.
    pub product_id: i64,
    pub title: String,
    /// Final score: `max(heuristic, narrative)`, in [0, 1].
    pub score: f32,
    pub authenticity: Authenticity,
    pub heuristic_reasoning: String,
    pub narrative_reasoning: String,
    pub warning_indicators: Vec<String>,
    pub recommendations: Vec<String>,
    /// The evidence neighborhood the scores were derived from.
    pub similar_products: Vec<SimilarProduct>,
}

#[derive(Debug, Error)]
/// Failure of one analysis request.
pub enum AgentError {
    /// The submitted record is missing required fields.
    #[error("invalid product: {0}")]
    Validation(#[from] ValidationError),

    /// The catalog store failed; nothing was fabricated in its place.
    #[error(transparent)]
    Store(#[from] VectorDbError),
}

/// Orchestrates the analysis pipeline over a store and an embedder.
pub struct AnalysisAgent<S, E> {
    embedder: E,
    store: S,
    scorer: HeuristicScorer,
    narrative: NarrativeAnalyzer,
    top_k: usize,
    fake_threshold: f32,
}

impl<S, E> AnalysisAgent<S, E>
where
    S: ProductStore,
    E: TextEmbedder,
{
    /// Wires an agent from configuration and collaborators.
    pub fn new(config: &Config, embedder: E, store: S, client: Arc<dyn NarrativeClient>) -> Self {
        Self {
            embedder,
            store,
            scorer: HeuristicScorer::new(config.fake_threshold),
            narrative: NarrativeAnalyzer::new(client),
            top_k: config.top_k,
            fake_threshold: config.fake_threshold,
        }
    }

    /// Returns the store (e.g. for seeding reference listings).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Analyzes one product and persists the outcome.
    ///
    /// The embedding is computed once and reused for both the similarity
    /// query and storage. The final score is `max(heuristic, narrative)`:
    /// the narrative stage can raise the risk estimate but never lower it.
    pub async fn analyze(&self, product: &ProductRecord) -> Result<AnalysisResult, AgentError> {
        product.validate()?;

        let embedding = self.embedder.embed(&product.embedding_text());

        let neighbors = self.store.search_similar(&embedding, self.top_k).await?;
        debug!(neighbors = neighbors.len(), title = %product.title, "Retrieved neighborhood");

        let heuristic = self.scorer.score(product, &neighbors);

        let narrative = self.narrative.analyze(product, &heuristic, &neighbors).await;

        let score = heuristic
            .score
            .max(narrative.score)
            .clamp(0.0, 1.0);

        let authenticity = if score >= self.fake_threshold {
            Authenticity::PotentiallyFake
        } else {
            Authenticity::LikelyAuthentic
        };

        // Agent analyses are never auto-verified; verification is a separate
        // human-gated pathway through `verify_product`.
        let product_id = self
            .store
            .insert(product, &embedding, score, false)
            .await?;

        info!(
            product_id,
            score,
            authenticity = %authenticity,
            heuristic = heuristic.score,
            narrative = narrative.score,
            "Analysis complete"
        );

        Ok(AnalysisResult {
            product_id,
            title: product.title.clone(),
            score,
            authenticity,
            heuristic_reasoning: heuristic.reasoning,
            narrative_reasoning: narrative.reasoning,
            warning_indicators: narrative.warning_indicators,
            recommendations: narrative.recommendations,
            similar_products: neighbors,
        })
    }

    /// Marks a stored product's verification outcome.
    pub async fn verify_product(
        &self,
        id: i64,
        verified: bool,
        score: f32,
    ) -> Result<(), AgentError> {
        self.store
            .update_verification(id, verified, score.clamp(0.0, 1.0))
            .await?;
        info!(id, verified, "Updated product verification");
        Ok(())
    }

    /// Fetches one catalog row.
    pub async fn get_product(&self, id: i64) -> Result<StoredProduct, AgentError> {
        Ok(self.store.get(id).await?)
    }

    /// Returns the most recently verified listings, newest first.
    pub async fn recent_verified(&self, limit: usize) -> Result<Vec<StoredProduct>, AgentError> {
        Ok(self.store.recent_verified(limit).await?)
    }
}
