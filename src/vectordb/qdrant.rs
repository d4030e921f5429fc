use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    Condition, CountPointsBuilder, CreateCollectionBuilder, Distance, Filter, GetPointsBuilder,
    PointId, PointStruct, PointsIdsList, ScrollPointsBuilder, SearchPointsBuilder,
    SetPayloadPointsBuilder, UpsertPointsBuilder, VectorParamsBuilder,
};
use tracing::{debug, info};

use crate::product::{ProductRecord, StoredProduct};

use super::error::VectorDbError;
use super::model::{SimilarProduct, point_id_num, product_payload, stored_from_payload};
use super::store::ProductStore;

/// Page size for scrolling the verified catalog.
const SCROLL_PAGE: u32 = 256;

/// Qdrant-backed catalog store.
///
/// One point per analyzed product, cosine-distance collection, payload
/// carrying the relational fields. Ids are assigned from an atomic counter
/// seeded by the collection's point count; the catalog being append-only,
/// the counter stays ahead of every stored id.
///
/// Neighbor ordering comes from the engine: descending similarity, with
/// exact-tie order engine-defined. [`super::InMemoryProductStore`] is the
/// deterministic reference for tie behavior.
pub struct QdrantProductStore {
    client: Qdrant,
    collection: String,
    vector_size: usize,
    next_id: AtomicI64,
}

impl QdrantProductStore {
    /// Connects to `url`, ensuring `collection` exists with a cosine-distance
    /// vector index of length `vector_size`.
    pub async fn connect(
        url: &str,
        collection: &str,
        vector_size: usize,
    ) -> Result<Self, VectorDbError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| VectorDbError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let exists = client.collection_exists(collection).await.map_err(|e| {
            VectorDbError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        if !exists {
            client
                .create_collection(
                    CreateCollectionBuilder::new(collection)
                        .vectors_config(VectorParamsBuilder::new(
                            vector_size as u64,
                            Distance::Cosine,
                        ))
                        .on_disk_payload(true),
                )
                .await
                .map_err(|e| VectorDbError::CreateCollectionFailed {
                    collection: collection.to_string(),
                    message: e.to_string(),
                })?;
            info!(collection, vector_size, "Created product collection");
        }

        let count = client
            .count(CountPointsBuilder::new(collection).exact(true))
            .await
            .map_err(|e| VectorDbError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?
            .result
            .map(|r| r.count)
            .unwrap_or(0);

        debug!(collection, count, "Seeded id counter from point count");

        Ok(Self {
            client,
            collection: collection.to_string(),
            vector_size,
            next_id: AtomicI64::new(count as i64 + 1),
        })
    }

    /// Returns the configured collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn check_dimension(&self, vector: &[f32]) -> Result<(), VectorDbError> {
        if vector.len() != self.vector_size {
            return Err(VectorDbError::InvalidDimension {
                expected: self.vector_size,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

impl ProductStore for QdrantProductStore {
    async fn insert(
        &self,
        product: &ProductRecord,
        embedding: &[f32],
        score: f32,
        verified: bool,
    ) -> Result<i64, VectorDbError> {
        self.check_dimension(embedding)?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let payload = product_payload(product, score, verified, Utc::now().timestamp());
        let point = PointStruct::new(id as u64, embedding.to_vec(), payload);

        // wait(true): the row must be searchable before the analysis returns,
        // since the very next analysis may retrieve it as a neighbor.
        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, vec![point]).wait(true))
            .await
            .map_err(|e| VectorDbError::InsertFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(id)
    }

    async fn search_similar(
        &self,
        query: &[f32],
        limit: usize,
    ) -> Result<Vec<SimilarProduct>, VectorDbError> {
        self.check_dimension(query)?;

        let search_result = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, query.to_vec(), limit as u64)
                    .with_payload(true),
            )
            .await
            .map_err(|e| VectorDbError::SearchFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(search_result
            .result
            .into_iter()
            .filter_map(SimilarProduct::from_scored_point)
            .collect())
    }

    async fn get(&self, id: i64) -> Result<StoredProduct, VectorDbError> {
        let response = self
            .client
            .get_points(
                GetPointsBuilder::new(&self.collection, vec![PointId::from(id as u64)])
                    .with_payload(true),
            )
            .await
            .map_err(|e| VectorDbError::SearchFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        response
            .result
            .into_iter()
            .next()
            .map(|point| stored_from_payload(id, &point.payload))
            .ok_or(VectorDbError::NotFound { id })
    }

    async fn recent_verified(&self, limit: usize) -> Result<Vec<StoredProduct>, VectorDbError> {
        let filter = Filter::must([Condition::matches("verified", true)]);

        let mut verified: Vec<StoredProduct> = Vec::new();
        let mut offset: Option<PointId> = None;

        // created_at has no payload index, so order client-side: scroll every
        // verified row, then sort newest first.
        loop {
            let mut builder = ScrollPointsBuilder::new(&self.collection)
                .filter(filter.clone())
                .limit(SCROLL_PAGE)
                .with_payload(true);
            if let Some(next) = offset.take() {
                builder = builder.offset(next);
            }

            let response =
                self.client
                    .scroll(builder)
                    .await
                    .map_err(|e| VectorDbError::SearchFailed {
                        collection: self.collection.clone(),
                        message: e.to_string(),
                    })?;

            verified.extend(response.result.into_iter().filter_map(|point| {
                let id = point_id_num(point.id.clone())? as i64;
                Some(stored_from_payload(id, &point.payload))
            }));

            match response.next_page_offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        verified.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        verified.truncate(limit);
        Ok(verified)
    }

    async fn update_verification(
        &self,
        id: i64,
        verified: bool,
        score: f32,
    ) -> Result<(), VectorDbError> {
        // Existence check first: set_payload on an unknown id would succeed
        // silently and invent a half-empty row.
        self.get(id).await?;

        let mut payload: std::collections::HashMap<String, qdrant_client::qdrant::Value> =
            std::collections::HashMap::new();
        payload.insert("verified".to_string(), verified.into());
        payload.insert("score".to_string(), f64::from(score).into());

        self.client
            .set_payload(
                SetPayloadPointsBuilder::new(&self.collection, payload)
                    .points_selector(PointsIdsList {
                        ids: vec![PointId::from(id as u64)],
                    })
                    .wait(true),
            )
            .await
            .map_err(|e| VectorDbError::UpdateFailed {
                collection: self.collection.clone(),
                id,
                message: e.to_string(),
            })?;

        Ok(())
    }
}
