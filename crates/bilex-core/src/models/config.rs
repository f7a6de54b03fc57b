//! Configuration structures for the extraction pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::expense::Category;

/// Main configuration for the bilex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BilexConfig {
    /// Heuristic extraction configuration.
    pub extraction: ExtractionConfig,

    /// Generative backend configuration.
    pub backend: BackendConfig,
}

/// Heuristic extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum normalized text length to run heuristics at all; shorter
    /// input goes straight to the minimal-default tier.
    pub min_text_length: usize,

    /// Upper bound for a plausible single amount on a receipt.
    pub max_amount: Decimal,

    /// A line item must be strictly below this fraction of the total,
    /// otherwise it is likely the total itself.
    pub item_total_ratio: Decimal,

    /// How many header lines to scan for the merchant name.
    pub merchant_scan_lines: usize,

    /// Accepted merchant-line length range (inclusive).
    pub merchant_min_length: usize,
    pub merchant_max_length: usize,

    /// Minimum derived item-name length.
    pub min_item_name_length: usize,

    /// Character budget for raw-text excerpts used as fallback
    /// descriptions.
    pub excerpt_length: usize,

    /// Keyword rules for merchant-based category inference. Only the
    /// heuristic tier uses these; the AI tier's category is
    /// backend-controlled.
    pub category_rules: Vec<CategoryRule>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_text_length: 10,
            max_amount: Decimal::new(10_000, 0),
            item_total_ratio: Decimal::new(8, 1),
            merchant_scan_lines: 3,
            merchant_min_length: 4,
            merchant_max_length: 49,
            min_item_name_length: 2,
            excerpt_length: 150,
            category_rules: default_category_rules(),
        }
    }
}

/// A keyword row mapping receipt vocabulary to a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    fn new(category: Category, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Default keyword table. Deliberately configuration rather than code:
/// deployments extend it per locale without touching the pipeline.
fn default_category_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            Category::Food,
            &[
                "grocery", "supermarket", "market", "restaurant", "cafe", "coffee", "pizza",
                "burger", "bakery", "diner", "deli", "food",
            ],
        ),
        CategoryRule::new(
            Category::Transportation,
            &[
                "gas", "fuel", "petrol", "shell", "chevron", "uber", "lyft", "taxi", "parking",
                "transit", "metro",
            ],
        ),
        CategoryRule::new(
            Category::Utilities,
            &["electric", "water", "internet", "utility", "telecom", "broadband", "energy"],
        ),
        CategoryRule::new(
            Category::Healthcare,
            &["pharmacy", "drug", "clinic", "hospital", "medical", "dental", "optic"],
        ),
        CategoryRule::new(
            Category::Entertainment,
            &["cinema", "movie", "theater", "theatre", "arcade", "game", "concert"],
        ),
        CategoryRule::new(
            Category::Shopping,
            &["store", "mart", "outlet", "mall", "clothing", "apparel", "shop"],
        ),
        CategoryRule::new(
            Category::Education,
            &["book", "school", "tuition", "course", "academy", "university"],
        ),
    ]
}

/// Generative backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Model identifier passed to the backend.
    pub model: String,

    /// Deadline for the single backend call per pipeline run. Expiry is
    /// treated as a backend error and triggers the heuristic fallback.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            model: "gemini-pro".to_string(),
            timeout_secs: 30,
        }
    }
}

impl BilexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
