use std::sync::Arc;

use async_trait::async_trait;

use super::{AgentError, AnalysisAgent, Authenticity};
use crate::config::Config;
use crate::embedding::{HashedEmbedder, TextEmbedder};
use crate::narrative::{NarrativeClient, NarrativeError};
use crate::product::ProductRecord;
use crate::vectordb::{InMemoryProductStore, ProductStore};

const TEST_DIM: usize = 64;

struct ScriptedClient {
    response: Option<String>,
}

impl ScriptedClient {
    fn responding(response: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Some(response.to_string()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self { response: None })
    }
}

#[async_trait]
impl NarrativeClient for ScriptedClient {
    async fn invoke(&self, _prompt: &str) -> Result<String, NarrativeError> {
        self.response
            .clone()
            .ok_or_else(|| NarrativeError::ProviderFailed {
                message: "unreachable".to_string(),
            })
    }
}

fn config() -> Config {
    Config {
        embedding_dim: TEST_DIM,
        ..Config::default()
    }
}

fn agent(
    client: Arc<dyn NarrativeClient>,
) -> AnalysisAgent<InMemoryProductStore, HashedEmbedder> {
    AnalysisAgent::new(
        &config(),
        HashedEmbedder::new(TEST_DIM),
        InMemoryProductStore::new(TEST_DIM),
        client,
    )
}

fn widget() -> ProductRecord {
    ProductRecord::new("Widget", "d", Some(10.0), "Acme")
}

/// Seeds a reference listing through the store directly.
async fn seed(
    agent: &AnalysisAgent<InMemoryProductStore, HashedEmbedder>,
    title: &str,
    price: f64,
    brand: &str,
    verified: bool,
) -> i64 {
    let product = ProductRecord::new(title, format!("{} reference", title), Some(price), brand);
    let embedder = HashedEmbedder::new(TEST_DIM);
    agent
        .store()
        .insert(
            &product,
            &embedder.embed(&product.embedding_text()),
            0.1,
            verified,
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_rejects_invalid_product_before_any_work() {
    let agent = agent(ScriptedClient::responding("Score: 0.9"));
    let mut product = widget();
    product.title = String::new();

    let result = agent.analyze(&product).await;

    assert!(matches!(result, Err(AgentError::Validation(_))));
    assert!(agent.store().is_empty(), "nothing may be persisted");
}

#[tokio::test]
async fn test_empty_catalog_yields_neutral_heuristic() {
    // Scenario: first product ever analyzed. Narrative returns nothing
    // usable, so both scores sit at 0.5, below the 0.7 threshold.
    let agent = agent(ScriptedClient::responding(""));

    let result = agent.analyze(&widget()).await.unwrap();

    assert_eq!(result.score, 0.5);
    assert_eq!(result.authenticity, Authenticity::LikelyAuthentic);
    assert_eq!(
        result.heuristic_reasoning,
        "No similar products found for comparison."
    );
    assert!(result.similar_products.is_empty());
}

#[tokio::test]
async fn test_final_score_is_max_of_heuristic_and_narrative() {
    // Narrative raises a neutral heuristic.
    let agent_high = agent(ScriptedClient::responding(r#"{"score": 0.9, "reasoning": "bad"}"#));
    let result = agent_high.analyze(&widget()).await.unwrap();
    assert_eq!(result.score, 0.9);
    assert_eq!(result.authenticity, Authenticity::PotentiallyFake);

    // Narrative below the heuristic never lowers it.
    let agent_low = agent(ScriptedClient::responding(r#"{"score": 0.1, "reasoning": "fine"}"#));
    let result = agent_low.analyze(&widget()).await.unwrap();
    assert_eq!(result.score, 0.5);
}

#[tokio::test]
async fn test_provider_failure_degrades_to_heuristic() {
    let agent = agent(ScriptedClient::failing());

    let result = agent.analyze(&widget()).await.unwrap();

    // Fallback narrative score equals the heuristic, so max is the identity.
    assert_eq!(result.score, 0.5);
    assert!(result.narrative_reasoning.contains("Narrative analysis failed"));
    assert_eq!(
        result.recommendations,
        vec!["Manually verify this product due to analysis error."]
    );
}

#[tokio::test]
async fn test_analyzed_product_is_persisted_unverified() {
    let agent = agent(ScriptedClient::responding(""));

    let result = agent.analyze(&widget()).await.unwrap();
    let stored = agent.get_product(result.product_id).await.unwrap();

    assert_eq!(stored.title, "Widget");
    assert!(!stored.verified, "agent analyses are never auto-verified");
    assert!((stored.score.unwrap() - 0.5).abs() < 1e-6);
}

#[tokio::test]
async fn test_catalog_accumulates_as_comparison_corpus() {
    let agent = agent(ScriptedClient::responding(""));

    let first = agent.analyze(&widget()).await.unwrap();
    assert!(first.similar_products.is_empty());

    let second = agent.analyze(&widget()).await.unwrap();
    assert_eq!(second.similar_products.len(), 1);
    assert_eq!(second.similar_products[0].id, first.product_id);
}

#[tokio::test]
async fn test_suspicious_pricing_flags_product() {
    let agent = agent(ScriptedClient::responding(""));

    for i in 0..3 {
        seed(&agent, &format!("Widget v{}", i), 20.0, "Legit", true).await;
    }

    // Same neighborhood statistics as the fraud scenario: price 5 against
    // an average of 20 with every brand mismatched gives heuristic 0.89.
    let result = agent
        .analyze(&ProductRecord::new("Widget", "d", Some(5.0), "Nockoff"))
        .await
        .unwrap();

    assert!((result.score - 0.89).abs() < 1e-6);
    assert_eq!(result.authenticity, Authenticity::PotentiallyFake);
    assert_eq!(result.similar_products.len(), 3);
}

#[tokio::test]
async fn test_verify_product_roundtrip() {
    let agent = agent(ScriptedClient::responding(""));

    let result = agent.analyze(&widget()).await.unwrap();
    agent.verify_product(result.product_id, true, 0.05).await.unwrap();

    let stored = agent.get_product(result.product_id).await.unwrap();
    assert!(stored.verified);

    let recent = agent.recent_verified(10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, result.product_id);
}

#[tokio::test]
async fn test_verify_unknown_product_fails() {
    let agent = agent(ScriptedClient::responding(""));

    let result = agent.verify_product(404, true, 0.1).await;

    assert!(matches!(result, Err(AgentError::Store(_))));
}
