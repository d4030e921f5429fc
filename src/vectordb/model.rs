use std::collections::HashMap;

use chrono::DateTime;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::{PointId, ScoredPoint, Value};
use serde::{Deserialize, Serialize};

use crate::product::{ProductRecord, StoredProduct};

/// A stored product returned by a nearest-neighbor query.
///
/// `similarity` is cosine similarity (`1 - cosine_distance`), so higher is
/// closer; the store returns matches in descending order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarProduct {
    pub id: i64,
    pub title: String,
    pub brand: Option<String>,
    pub price: Option<f64>,
    pub verified: bool,
    pub score: Option<f64>,
    pub similarity: f32,
}

impl SimilarProduct {
    /// Builds a match from a Qdrant search hit, reading payload fields
    /// defensively (a hand-edited or partially-migrated point must not
    /// fail the whole query).
    pub fn from_scored_point(point: ScoredPoint) -> Option<Self> {
        let id = point_id_num(point.id)? as i64;
        let payload = point.payload;

        Some(SimilarProduct {
            id,
            title: payload_str(&payload, "title").unwrap_or_default(),
            brand: payload_str(&payload, "brand"),
            price: payload_f64(&payload, "price"),
            verified: payload_bool(&payload, "verified").unwrap_or(false),
            score: payload_f64(&payload, "score"),
            similarity: point.score,
        })
    }
}

/// Extracts the numeric point id, if the point carries one.
pub(crate) fn point_id_num(id: Option<PointId>) -> Option<u64> {
    match id.and_then(|pid| pid.point_id_options) {
        Some(PointIdOptions::Num(n)) => Some(n),
        _ => None,
    }
}

/// Renders a product row as a Qdrant payload map.
///
/// Absent price/brand are omitted rather than stored as nulls, matching how
/// the fields are read back.
pub(crate) fn product_payload(
    product: &ProductRecord,
    score: f32,
    verified: bool,
    created_at: i64,
) -> HashMap<String, Value> {
    let mut payload: HashMap<String, Value> = HashMap::new();
    payload.insert("title".to_string(), product.title.clone().into());
    payload.insert("description".to_string(), product.description.clone().into());
    if let Some(price) = product.price {
        payload.insert("price".to_string(), price.into());
    }
    if let Some(brand) = &product.brand {
        payload.insert("brand".to_string(), brand.clone().into());
    }
    payload.insert("verified".to_string(), verified.into());
    payload.insert("score".to_string(), f64::from(score).into());
    payload.insert("created_at".to_string(), created_at.into());
    payload
}

/// Rebuilds a catalog row from a point's payload.
pub(crate) fn stored_from_payload(id: i64, payload: &HashMap<String, Value>) -> StoredProduct {
    let created_at = payload_i64(payload, "created_at")
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or(DateTime::UNIX_EPOCH);

    StoredProduct {
        id,
        title: payload_str(payload, "title").unwrap_or_default(),
        description: payload_str(payload, "description").unwrap_or_default(),
        price: payload_f64(payload, "price"),
        brand: payload_str(payload, "brand"),
        verified: payload_bool(payload, "verified").unwrap_or(false),
        score: payload_f64(payload, "score"),
        created_at,
    }
}

fn payload_str(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn payload_f64(payload: &HashMap<String, Value>, key: &str) -> Option<f64> {
    payload.get(key).and_then(|v| v.as_double())
}

fn payload_i64(payload: &HashMap<String, Value>, key: &str) -> Option<i64> {
    payload.get(key).and_then(|v| v.as_integer())
}

fn payload_bool(payload: &HashMap<String, Value>, key: &str) -> Option<bool> {
    payload.get(key).and_then(|v| v.as_bool())
}

/// Cosine similarity between two vectors.
///
/// Mismatched lengths and zero-norm inputs yield 0.0 (orthogonal-by-fiat),
/// never an error or a NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
