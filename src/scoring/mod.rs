//! Heuristic authenticity scoring over a retrieved neighborhood.
//!
//! Scores are in [0, 1]: 0 = certainly authentic, 1 = certainly fake. The
//! factor constants are empirical policy carried over unchanged; treat them
//! as calibration data, not derived values.


use serde::Serialize;
use tracing::debug;

use crate::product::ProductRecord;
use crate::vectordb::SimilarProduct;

const PRICE_WEIGHT: f64 = 0.6;
const BRAND_WEIGHT: f64 = 0.4;

/// Heuristic score plus the prose that justifies it.
#[derive(Debug, Clone, Serialize)]
pub struct HeuristicAssessment {
    pub score: f32,
    pub reasoning: String,
}

/// Price/brand statistics scorer.
///
/// Pure function of the product and its neighbors; the threshold only
/// selects the verdict sentence appended to the reasoning.
#[derive(Debug, Clone)]
pub struct HeuristicScorer {
    fake_threshold: f32,
}

impl HeuristicScorer {
    pub fn new(fake_threshold: f32) -> Self {
        Self { fake_threshold }
    }

    pub fn fake_threshold(&self) -> f32 {
        self.fake_threshold
    }

    /// Scores a product against its retrieved neighborhood.
    ///
    /// An empty neighborhood is the canonical insufficient-evidence signal:
    /// exactly 0.5 with a fixed reasoning string.
    pub fn score(&self, product: &ProductRecord, neighbors: &[SimilarProduct]) -> HeuristicAssessment {
        if neighbors.is_empty() {
            return HeuristicAssessment {
                score: 0.5,
                reasoning: "No similar products found for comparison.".to_string(),
            };
        }

        let (price_factor, price_analysis) = price_factor(product.price, neighbors);
        let (brand_factor, brand_analysis) = brand_factor(product.brand_str(), neighbors);

        let score = PRICE_WEIGHT * price_factor + BRAND_WEIGHT * brand_factor;

        debug!(
            score,
            price_factor, brand_factor, "Computed heuristic authenticity score"
        );

        let mut reasoning = format!("{} {}", price_analysis, brand_analysis);
        if score as f32 >= self.fake_threshold {
            reasoning.push_str(&format!(
                " Overall, this product shows significant indicators of being potentially counterfeit with a fake score of {:.2}.",
                score
            ));
        } else {
            reasoning.push_str(&format!(
                " Overall, this product appears to be authentic with a fake score of {:.2}.",
                score
            ));
        }

        HeuristicAssessment {
            score: score as f32,
            reasoning,
        }
    }
}

/// Price regime factor, weighted 0.6 in the final score.
///
/// Listings far below the neighborhood average are the strongest counterfeit
/// signal; far above is suspicious but weaker (premium version or gouging).
fn price_factor(price: Option<f64>, neighbors: &[SimilarProduct]) -> (f64, String) {
    let price = match price {
        Some(p) if p > 0.0 => p,
        _ => {
            return (
                0.5,
                "No price information available for comparison.".to_string(),
            );
        }
    };

    let valid_prices: Vec<f64> = neighbors
        .iter()
        .filter_map(|n| n.price)
        .filter(|p| *p > 0.0)
        .collect();

    if valid_prices.is_empty() {
        return (
            0.5,
            "No valid price information available for comparison.".to_string(),
        );
    }

    let avg_price = valid_prices.iter().sum::<f64>() / valid_prices.len() as f64;

    // avg_price > 0 already holds after the positive filter; the guard keeps
    // the formula total anyway.
    let disparity = if avg_price > 0.0 {
        (price - avg_price).abs() / avg_price
    } else {
        1.0
    };

    if price < avg_price * 0.5 {
        (
            (0.8 + disparity * 0.2).min(1.0),
            format!(
                "Price (${:.2}) is significantly lower than average (${:.2}), which is suspicious.",
                price, avg_price
            ),
        )
    } else if price > avg_price * 2.0 {
        (
            0.6,
            format!(
                "Price (${:.2}) is significantly higher than average (${:.2}), which could indicate premium version or potential price gouging.",
                price, avg_price
            ),
        )
    } else {
        (
            (0.3 - disparity * 0.3).max(0.0),
            format!(
                "Price (${:.2}) is within reasonable range of average (${:.2}).",
                price, avg_price
            ),
        )
    }
}

/// Brand consistency factor, weighted 0.4 in the final score.
fn brand_factor(brand: &str, neighbors: &[SimilarProduct]) -> (f64, String) {
    let brand = brand.trim().to_lowercase();
    if brand.is_empty() {
        return (
            0.5,
            "No brand information provided for comparison.".to_string(),
        );
    }

    let neighbor_brands: Vec<String> = neighbors
        .iter()
        .filter_map(|n| n.brand.as_deref())
        .filter(|b| !b.is_empty())
        .map(|b| b.to_lowercase())
        .collect();

    if neighbor_brands.is_empty() {
        return (
            0.5,
            "No brand information available for comparison.".to_string(),
        );
    }

    let matches = neighbor_brands.iter().filter(|b| **b == brand).count();
    let ratio = matches as f64 / neighbor_brands.len() as f64;

    if ratio >= 0.8 {
        (
            0.2,
            format!("Brand '{}' is consistent with similar products.", brand),
        )
    } else if ratio >= 0.4 {
        (
            0.4,
            format!(
                "Brand '{}' appears in some similar products but not all.",
                brand
            ),
        )
    } else {
        (
            0.8,
            format!(
                "Brand '{}' differs from most similar products, which is suspicious.",
                brand
            ),
        )
    }
}
