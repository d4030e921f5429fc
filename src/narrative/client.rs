use async_trait::async_trait;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::debug;

use crate::hashing::hash_to_u64;

use super::error::NarrativeError;
use super::prompt::SYSTEM_PROMPT;

/// Opaque text-generation capability: prompt in, free-form text out.
///
/// Implementations may fail and may return arbitrarily malformed content;
/// callers own all parsing and fallback.
#[async_trait]
pub trait NarrativeClient: Send + Sync {
    async fn invoke(&self, prompt: &str) -> Result<String, NarrativeError>;
}

/// Provider-backed client over the genai multi-provider API.
pub struct GenAiNarrativeClient {
    client: genai::Client,
    model: String,
    temperature: f64,
}

impl GenAiNarrativeClient {
    /// Creates a client for `model` (provider resolved by genai from the
    /// model name and ambient credentials).
    pub fn new(model: impl Into<String>, temperature: f64) -> Self {
        Self {
            client: genai::Client::default(),
            model: model.into(),
            temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl NarrativeClient for GenAiNarrativeClient {
    async fn invoke(&self, prompt: &str) -> Result<String, NarrativeError> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ]);
        let options = ChatOptions::default().with_temperature(self.temperature);

        let response = self
            .client
            .exec_chat(&self.model, request, Some(&options))
            .await
            .map_err(|e| NarrativeError::ProviderFailed {
                message: e.to_string(),
            })?;

        // A response with no text part is treated as empty output, not an
        // error; the parser's defaults take over downstream.
        let text = response.first_text().unwrap_or_default().to_string();

        debug!(model = %self.model, response_len = text.len(), "Narrative provider responded");

        Ok(text)
    }
}

/// Rule-based stand-in for the narrative capability.
///
/// Keys on prompt keywords and derives a deterministic pseudo-score from a
/// hash of the prompt, so demos and tests are reproducible without provider
/// credentials. Swap for [`GenAiNarrativeClient`] behind the same trait.
#[derive(Debug, Default, Clone)]
pub struct SimulatedNarrativeClient;

impl SimulatedNarrativeClient {
    pub fn new() -> Self {
        Self
    }

    fn pseudo_score(prompt: &str) -> f64 {
        // Uniform-ish in [0.2, 0.9], fixed per prompt.
        let bucket = hash_to_u64(prompt.as_bytes()) % 1000;
        0.2 + 0.7 * (bucket as f64 / 999.0)
    }

    fn authentic_response(score: f64) -> String {
        format!(
            r#"{{
    "score": {score:.2},
    "reasoning": "The product appears to be authentic based on consistent branding, appropriate pricing compared to similar products, and detailed product description that matches official specifications.",
    "warning_indicators": [],
    "recommendations": [
        "Verify the seller's ratings and history",
        "Check product reviews from verified purchasers",
        "Confirm the product has proper warranty information"
    ]
}}"#
        )
    }

    fn fake_response(score: f64) -> String {
        format!(
            r#"{{
    "score": {score:.2},
    "reasoning": "The product shows several signs of being potentially counterfeit, including significantly lower price than authentic versions, inconsistent branding elements, and vague product specifications that don't match official documentation.",
    "warning_indicators": [
        "Price is substantially below market average",
        "Brand name has subtle misspellings or variations",
        "Description contains grammatical errors or inconsistencies"
    ],
    "recommendations": [
        "Avoid purchasing this product",
        "Report the listing to the marketplace",
        "Look for authorized sellers of this brand"
    ]
}}"#
        )
    }
}

#[async_trait]
impl NarrativeClient for SimulatedNarrativeClient {
    async fn invoke(&self, prompt: &str) -> Result<String, NarrativeError> {
        let lower = prompt.to_lowercase();

        if lower.contains("authenticity") || lower.contains("counterfeit") {
            let score = Self::pseudo_score(prompt);
            if score > 0.7 {
                Ok(Self::fake_response(score))
            } else {
                Ok(Self::authentic_response(score))
            }
        } else {
            Ok(
                "I'm a simulated response. For this demo, pre-written answers stand in for actual generation."
                    .to_string(),
            )
        }
    }
}
