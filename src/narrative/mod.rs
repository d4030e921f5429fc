//! Narrative authenticity analysis via an external text generator.
//!
//! The generator is an unreliable collaborator: [`NarrativeAnalyzer`] builds
//! the prompt, invokes it once, parses whatever comes back, and degrades to
//! the heuristic assessment on any failure. Nothing in this module can fail
//! an analysis request.

pub mod client;
pub mod error;
mod parse;
pub mod prompt;


pub use client::{GenAiNarrativeClient, NarrativeClient, SimulatedNarrativeClient};
pub use error::NarrativeError;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::product::ProductRecord;
use crate::scoring::HeuristicAssessment;
use crate::vectordb::SimilarProduct;

/// Reasoning placeholder when the response held a score but no prose.
const ANALYSIS_INCOMPLETE: &str = "Analysis incomplete. Using initial assessment.";

/// Narrative stage output, complete by construction: every field has been
/// parsed or defaulted.
#[derive(Debug, Clone, Serialize)]
pub struct NarrativeAssessment {
    pub score: f32,
    pub reasoning: String,
    pub warning_indicators: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Drives one narrative analysis round against a [`NarrativeClient`].
pub struct NarrativeAnalyzer {
    client: Arc<dyn NarrativeClient>,
}

impl NarrativeAnalyzer {
    pub fn new(client: Arc<dyn NarrativeClient>) -> Self {
        Self { client }
    }

    /// Re-derives score/reasoning/warnings/recommendations from the text
    /// generator, using the heuristic assessment as both prompt context and
    /// the default for anything the response fails to yield.
    ///
    /// Single attempt, no retries. A provider failure produces the
    /// heuristic-fallback assessment; it is never propagated.
    pub async fn analyze(
        &self,
        product: &ProductRecord,
        heuristic: &HeuristicAssessment,
        neighbors: &[SimilarProduct],
    ) -> NarrativeAssessment {
        let prompt =
            prompt::analysis_prompt(product, heuristic.score, &heuristic.reasoning, neighbors);

        let response = match self.client.invoke(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Narrative analysis failed, using heuristic assessment");
                return Self::fallback(heuristic, &e);
            }
        };

        let parsed = parse::parse_response(&response);

        debug!(
            score = ?parsed.score,
            has_reasoning = parsed.reasoning.is_some(),
            warnings = parsed.warning_indicators.len(),
            "Parsed narrative response"
        );

        NarrativeAssessment {
            score: parsed
                .score
                .map(|s| s.clamp(0.0, 1.0) as f32)
                .unwrap_or(heuristic.score),
            reasoning: parsed
                .reasoning
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| ANALYSIS_INCOMPLETE.to_string()),
            warning_indicators: parsed.warning_indicators,
            recommendations: parsed.recommendations,
        }
    }

    fn fallback(heuristic: &HeuristicAssessment, cause: &NarrativeError) -> NarrativeAssessment {
        NarrativeAssessment {
            score: heuristic.score,
            reasoning: format!(
                "Narrative analysis failed: {}. Using initial assessment: {}",
                cause, heuristic.reasoning
            ),
            warning_indicators: Vec::new(),
            recommendations: vec!["Manually verify this product due to analysis error.".to_string()],
        }
    }
}
