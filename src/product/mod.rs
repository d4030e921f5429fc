//! Product data model.
//!
//! [`ProductRecord`] is the normalized shape every product-source adapter
//! (scraper, marketplace API, manual form) hands to the analysis core.
//! [`StoredProduct`] is one row of the analyzed-product catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A product listing submitted for analysis.
///
/// Immutable once submitted; the agent derives the embedding and score
/// separately and persists them alongside these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Catalog id, present only for records read back from the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub brand: Option<String>,
    /// Source listing URL, when the record came from a scraper.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Marketplace identifier (e.g. ASIN), when the record came from an API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl ProductRecord {
    /// Creates a record with the required analysis fields.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: Option<f64>,
        brand: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            price,
            brand: Some(brand.into()),
            url: None,
            external_id: None,
        }
    }

    /// Rejects records missing the fields the analysis depends on.
    ///
    /// Runs before any embedding or storage work; a record that fails here
    /// never touches the catalog.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "title" });
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "description",
            });
        }
        if self.brand.as_deref().unwrap_or("").trim().is_empty() {
            return Err(ValidationError::MissingField { field: "brand" });
        }
        Ok(())
    }

    /// Renders the canonical text embedded for this product.
    ///
    /// The template must be byte-identical at insertion time and query time;
    /// any drift silently degrades similarity search.
    pub fn embedding_text(&self) -> String {
        format!(
            "Title: {}. Description: {}. Brand: {}.",
            self.title,
            self.description,
            self.brand.as_deref().unwrap_or("")
        )
    }

    /// Returns the brand or the empty string.
    pub fn brand_str(&self) -> &str {
        self.brand.as_deref().unwrap_or("")
    }
}

/// One row of the analyzed-product catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProduct {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub brand: Option<String>,
    pub verified: bool,
    pub score: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// A product record missing a field the analysis requires.
pub enum ValidationError {
    #[error("product is missing required field '{field}'")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },
}
