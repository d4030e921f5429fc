//! Veracity demo entrypoint.
//!
//! Runs the full analysis pipeline self-contained: in-memory catalog plus
//! the simulated narrative client, no Qdrant or provider credentials needed.

use std::sync::Arc;

use veracity::{
    AnalysisAgent, Config, HashedEmbedder, InMemoryProductStore, ProductRecord, ProductStore,
    SimulatedNarrativeClient, TextEmbedder,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        embedding_dim = config.embedding_dim,
        fake_threshold = config.fake_threshold,
        top_k = config.top_k,
        "Veracity starting (self-contained demo)"
    );

    let embedder = HashedEmbedder::new(config.embedding_dim);
    let store = InMemoryProductStore::new(config.embedding_dim);
    let client = Arc::new(SimulatedNarrativeClient::new());

    // Seed a verified reference catalog the way a backfill job would.
    let references = [
        ("Acme Wireless Headphones X2", "Over-ear wireless headphones with active noise cancelling and 30h battery.", 199.99),
        ("Acme Wireless Headphones X2 (2024)", "Updated over-ear wireless headphones, ANC, USB-C charging.", 189.99),
        ("Acme Wireless Headphones X2 Pro", "Premium over-ear wireless headphones with adaptive ANC.", 229.99),
    ];
    for (title, description, price) in references {
        let product = ProductRecord::new(title, description, Some(price), "Acme");
        let embedding = embedder.embed(&product.embedding_text());
        let id = store.insert(&product, &embedding, 0.1, true).await?;
        tracing::debug!(id, title, "Seeded reference listing");
    }

    let agent = AnalysisAgent::new(&config, embedder, store, client);

    let consistent = ProductRecord::new(
        "Acme Wireless Headphones X2",
        "Over-ear wireless headphones with active noise cancelling.",
        Some(195.0),
        "Acme",
    );
    let suspicious = ProductRecord::new(
        "Acme Wireless Headphones X2 NEW SEALED",
        "Brand new headphones best price!!",
        Some(39.99),
        "Acmee",
    );

    let consistent_result = agent.analyze(&consistent).await?;
    println!("{}", serde_json::to_string_pretty(&consistent_result)?);

    let suspicious_result = agent.analyze(&suspicious).await?;
    println!("{}", serde_json::to_string_pretty(&suspicious_result)?);

    // The human-gated pathway: confirm one analyzed listing as authentic.
    agent
        .verify_product(consistent_result.product_id, true, 0.05)
        .await?;
    let verified = agent.recent_verified(10).await?;
    println!("{}", serde_json::to_string_pretty(&verified)?);

    Ok(())
}
