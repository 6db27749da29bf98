use serde::{Deserialize, Serialize};

/// Numeric catalog identifier, as issued by the upstream commerce backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw catalog row as loaded from the upstream snapshot, before normalization.
///
/// Category levels are optional; missing levels are defaulted during catalog
/// construction rather than rejected.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub price: u32,
    #[serde(default)]
    pub large_category: Option<String>,
    #[serde(default)]
    pub medium_category: Option<String>,
    #[serde(default)]
    pub small_category: Option<String>,
}

/// Normalized, scored catalog entry. Immutable once the catalog is built.
///
/// Both suitability scores are pure functions of name, price, and category;
/// they are computed once at catalog construction and never change.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: u32,
    pub large_category: String,
    pub medium_category: String,
    pub small_category: String,
    /// `대 > 중 > 소` display path.
    pub category_path: String,
    /// Space-joined category levels, used for contains-style matching and
    /// text vectorization.
    pub category_text: String,
    /// Coarse single-household suitability, 0–10.
    pub base_single_score: f64,
    /// Refined single-household suitability, 0–25. Pools rank by this.
    pub flexible_single_score: f64,
}
