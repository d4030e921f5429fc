//! Prompt templates for the narrative authenticity analysis.

use crate::product::ProductRecord;
use crate::vectordb::SimilarProduct;

/// Neighbors rendered into the analysis prompt.
const PROMPT_NEIGHBOR_LIMIT: usize = 3;

/// System prompt framing the analysis task and the expected JSON shape.
pub const SYSTEM_PROMPT: &str = "\
You are a specialized product authenticity analyzer for marketplace products. Your goal is to determine \
if a product is likely authentic or potentially counterfeit based on the provided information.

For each product, you'll receive:
1. Product title
2. Product description
3. Price
4. Brand
5. Similar products from the database
6. Initial authenticity score

Analyze this information to identify potential signs of counterfeit products, such as:
- Significantly lower prices compared to similar authentic products
- Inconsistent or vague product descriptions
- Misspellings or grammatical errors in product titles or descriptions
- Brand inconsistencies

Provide your analysis in JSON format with the following fields:
- score: A value between 0.0 (certainly authentic) and 1.0 (certainly fake)
- reasoning: Your detailed reasoning for the score
- warning_indicators: List of specific red flags that indicate potential counterfeiting
- recommendations: List of recommendations for the user

Base your analysis on factual patterns rather than speculation. If information is insufficient,
indicate this in your reasoning.";

/// Builds the analysis prompt for one product.
///
/// Embeds the heuristic pass as context and renders at most the top three
/// neighbors; more would only dilute the comparison.
pub fn analysis_prompt(
    product: &ProductRecord,
    initial_score: f32,
    initial_reasoning: &str,
    neighbors: &[SimilarProduct],
) -> String {
    let mut similar_products = String::new();
    for (idx, neighbor) in neighbors.iter().take(PROMPT_NEIGHBOR_LIMIT).enumerate() {
        similar_products.push_str(&format!(
            "Product {}:\nTitle: {}\nBrand: {}\nPrice: ${:.2}\nSimilarity: {:.2}\n\n",
            idx + 1,
            neighbor.title,
            neighbor.brand.as_deref().unwrap_or(""),
            neighbor.price.unwrap_or(0.0),
            neighbor.similarity
        ));
    }

    format!(
        "Analyze the following marketplace product for authenticity:

PRODUCT DETAILS:
Title: {title}
Description: {description}
Price: ${price:.2}
Brand: {brand}

INITIAL ANALYSIS:
Initial Score: {initial_score:.2} (0.0 = certainly authentic, 1.0 = certainly fake)
Initial Reasoning: {initial_reasoning}

SIMILAR PRODUCTS FOR COMPARISON:
{similar_products}
Based on all this information, provide a comprehensive analysis of whether this product is authentic or potentially counterfeit.

Analyze:
1. Price comparison with similar products
2. Brand consistency
3. Description quality and accuracy
4. Any red flags in the product details

Format your response as JSON with these fields:
- score: A value between 0.0 (certainly authentic) and 1.0 (certainly fake)
- reasoning: Your detailed reasoning for the score
- warning_indicators: List of specific red flags that indicate potential counterfeiting
- recommendations: List of recommendations for the user

JSON RESPONSE:",
        title = product.title,
        description = product.description,
        price = product.price.unwrap_or(0.0),
        brand = product.brand_str(),
        initial_score = initial_score,
        initial_reasoning = initial_reasoning,
        similar_products = similar_products,
    )
}
