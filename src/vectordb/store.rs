use crate::product::{ProductRecord, StoredProduct};

use super::error::VectorDbError;
use super::model::SimilarProduct;

/// Narrow async interface to the analyzed-product catalog.
///
/// The catalog is append-only: analyses insert rows, verification flips a
/// flag, nothing deletes. Each operation is independently atomic, so
/// concurrent analyses may interleave inserts without corrupting either row.
pub trait ProductStore: Send + Sync {
    /// Persists a product with its embedding and returns the store-assigned
    /// id. Ids are strictly increasing in insertion order.
    fn insert(
        &self,
        product: &ProductRecord,
        embedding: &[f32],
        score: f32,
        verified: bool,
    ) -> impl std::future::Future<Output = Result<i64, VectorDbError>> + Send;

    /// Returns up to `limit` nearest neighbors by cosine similarity,
    /// descending; ties broken by ascending insertion id.
    fn search_similar(
        &self,
        query: &[f32],
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<SimilarProduct>, VectorDbError>> + Send;

    /// Fetches one catalog row by id.
    fn get(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<StoredProduct, VectorDbError>> + Send;

    /// Returns up to `limit` verified rows, newest first.
    fn recent_verified(
        &self,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<StoredProduct>, VectorDbError>> + Send;

    /// Atomically updates one row's verification flag and score.
    fn update_verification(
        &self,
        id: i64,
        verified: bool,
        score: f32,
    ) -> impl std::future::Future<Output = Result<(), VectorDbError>> + Send;
}
