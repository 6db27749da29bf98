use serde::{Deserialize, Serialize};

use crate::domain::product::ProductId;

/// Which cascade stage produced a candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvenanceTag {
    /// Pool or vector stage: scored, boosted, personalized.
    SingleHouseholdOptimized,
    /// Emergency stage: fixed fields, guaranteed availability.
    EmergencyGuaranteed,
}

/// One recommended product, fully populated for downstream delivery.
///
/// Ephemeral: constructed per request and handed to the caller; the core
/// never persists these itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecommendationCandidate {
    pub product_id: ProductId,
    pub name: String,
    pub price: u32,
    pub category_path: String,
    pub large_category: String,
    /// Suitability normalized to 0–10.
    pub single_household_score: f64,
    /// Raw 0–25 suitability before normalization.
    pub raw_suitability: f64,
    pub base_similarity: f64,
    pub boost_ratio: f64,
    pub behavior_boost: f64,
    /// `base_similarity × boost_ratio`. Not comparable across provenance
    /// tags; callers must not re-rank on this.
    pub final_score: f64,
    pub user_type: ProvenanceTag,
    pub recommendation_reason: String,
    pub appeal_score: f64,
}
