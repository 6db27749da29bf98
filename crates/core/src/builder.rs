//! Candidate record construction for the pool and vector stages.

use crate::catalog::Catalog;
use crate::domain::candidate::{ProvenanceTag, RecommendationCandidate};
use crate::domain::product::Product;
use crate::domain::profile::UserProfile;
use crate::scoring::behavior::BehaviorBooster;
use crate::scoring::suitability::FLEXIBLE_SCORE_MAX;

/// Base similarity attached to pool- and vector-stage candidates. The
/// emergency stage uses its own fixed value.
pub const BASE_SIMILARITY: f64 = 0.75;

const REASON: &str = "1인가구 최적화 | 맞춤 추천";

const APPEAL_SCORE: f64 = 10.0;

/// Builds a fully populated candidate from a scored product.
///
/// The boost chain is multiplicative and deliberately uncapped overall; only
/// the behavior component is clamped. Final scores from this path are not
/// comparable across provenance tags.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecommendationDataBuilder {
    booster: BehaviorBooster,
}

impl RecommendationDataBuilder {
    pub fn new() -> Self {
        Self { booster: BehaviorBooster::new() }
    }

    pub fn build(
        &self,
        product: &Product,
        profile: &UserProfile,
        is_preferred: bool,
        catalog: &Catalog,
    ) -> RecommendationCandidate {
        let flexible = product.flexible_single_score;
        let normalized = (flexible / FLEXIBLE_SCORE_MAX * 10.0).min(10.0);

        let mut boost = 2.0;
        if is_preferred {
            boost *= 3.0;
        }
        boost *= score_tier_multiplier(flexible);

        let behavior_boost = self.booster.apply(product, profile, catalog);
        boost *= behavior_boost;

        RecommendationCandidate {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            category_path: product.category_path.clone(),
            large_category: product.large_category.clone(),
            single_household_score: normalized,
            raw_suitability: flexible,
            base_similarity: BASE_SIMILARITY,
            boost_ratio: boost,
            behavior_boost,
            final_score: BASE_SIMILARITY * boost,
            user_type: ProvenanceTag::SingleHouseholdOptimized,
            recommendation_reason: REASON.to_string(),
            appeal_score: APPEAL_SCORE,
        }
    }
}

/// Mutually exclusive suitability tiers; only the highest applicable fires.
fn score_tier_multiplier(flexible: f64) -> f64 {
    if flexible >= 20.0 {
        4.0
    } else if flexible >= 15.0 {
        3.0
    } else if flexible >= 10.0 {
        2.0
    } else {
        1.0
    }
}
