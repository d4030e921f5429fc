use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::product::{ProductRecord, StoredProduct};

use super::error::VectorDbError;
use super::model::{SimilarProduct, cosine_similarity};
use super::store::ProductStore;

const MEMORY_COLLECTION: &str = "memory";

/// In-memory catalog backend.
///
/// Exact cosine scan over a `BTreeMap`, with the deterministic
/// descending-similarity / ascending-id ordering the tests pin down. Used by
/// the test suites and the demo binary; production deployments use
/// [`super::QdrantProductStore`] behind the same [`ProductStore`] interface.
pub struct InMemoryProductStore {
    vector_size: usize,
    next_id: AtomicI64,
    rows: RwLock<BTreeMap<i64, StoredRow>>,
}

struct StoredRow {
    record: StoredProduct,
    embedding: Vec<f32>,
}

impl InMemoryProductStore {
    /// Creates an empty store for vectors of length `vector_size`.
    pub fn new(vector_size: usize) -> Self {
        Self {
            vector_size,
            next_id: AtomicI64::new(1),
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of catalog rows.
    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    /// Returns `true` if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
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

impl ProductStore for InMemoryProductStore {
    async fn insert(
        &self,
        product: &ProductRecord,
        embedding: &[f32],
        score: f32,
        verified: bool,
    ) -> Result<i64, VectorDbError> {
        self.check_dimension(embedding)?;

        let mut rows = self.rows.write().map_err(|_| VectorDbError::InsertFailed {
            collection: MEMORY_COLLECTION.to_string(),
            message: "lock poisoned".to_string(),
        })?;

        // Id assignment and row insertion happen under one write lock, so a
        // reader never observes a claimed-but-absent id.
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        rows.insert(
            id,
            StoredRow {
                record: StoredProduct {
                    id,
                    title: product.title.clone(),
                    description: product.description.clone(),
                    price: product.price,
                    brand: product.brand.clone(),
                    verified,
                    score: Some(f64::from(score)),
                    created_at: Utc::now(),
                },
                embedding: embedding.to_vec(),
            },
        );

        Ok(id)
    }

    async fn search_similar(
        &self,
        query: &[f32],
        limit: usize,
    ) -> Result<Vec<SimilarProduct>, VectorDbError> {
        self.check_dimension(query)?;

        let rows = self.rows.read().map_err(|_| VectorDbError::SearchFailed {
            collection: MEMORY_COLLECTION.to_string(),
            message: "lock poisoned".to_string(),
        })?;

        let mut results: Vec<SimilarProduct> = rows
            .values()
            .map(|row| SimilarProduct {
                id: row.record.id,
                title: row.record.title.clone(),
                brand: row.record.brand.clone(),
                price: row.record.price,
                verified: row.record.verified,
                score: row.record.score,
                similarity: cosine_similarity(query, &row.embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });

        results.truncate(limit);
        Ok(results)
    }

    async fn get(&self, id: i64) -> Result<StoredProduct, VectorDbError> {
        let rows = self.rows.read().map_err(|_| VectorDbError::SearchFailed {
            collection: MEMORY_COLLECTION.to_string(),
            message: "lock poisoned".to_string(),
        })?;

        rows.get(&id)
            .map(|row| row.record.clone())
            .ok_or(VectorDbError::NotFound { id })
    }

    async fn recent_verified(&self, limit: usize) -> Result<Vec<StoredProduct>, VectorDbError> {
        let rows = self.rows.read().map_err(|_| VectorDbError::SearchFailed {
            collection: MEMORY_COLLECTION.to_string(),
            message: "lock poisoned".to_string(),
        })?;

        let mut verified: Vec<StoredProduct> = rows
            .values()
            .filter(|row| row.record.verified)
            .map(|row| row.record.clone())
            .collect();

        verified.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.id.cmp(&a.id))
        });

        verified.truncate(limit);
        Ok(verified)
    }

    async fn update_verification(
        &self,
        id: i64,
        verified: bool,
        score: f32,
    ) -> Result<(), VectorDbError> {
        let mut rows = self.rows.write().map_err(|_| VectorDbError::UpdateFailed {
            collection: MEMORY_COLLECTION.to_string(),
            id,
            message: "lock poisoned".to_string(),
        })?;

        let row = rows.get_mut(&id).ok_or(VectorDbError::NotFound { id })?;
        row.record.verified = verified;
        row.record.score = Some(f64::from(score));

        Ok(())
    }
}
