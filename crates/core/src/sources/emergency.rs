//! Guaranteed-result backfill stage.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::catalog::Catalog;
use crate::config::EmergencyConfig;
use crate::domain::candidate::{ProvenanceTag, RecommendationCandidate};
use crate::domain::product::Product;
use crate::domain::profile::UserProfile;
use crate::sources::{CandidateSource, ExclusionSet};

const REASON: &str = "다양성 확보 | 적당한 선택";

/// Last-resort backfill: fills remaining slots from any unused product,
/// preferring a sensible price window, sampled deterministically per user.
///
/// Deliberately skips the scorer and booster: fixed fields keep this stage
/// cheap and infallible.
pub struct EmergencyRecommender {
    catalog: Arc<Catalog>,
    config: EmergencyConfig,
}

impl EmergencyRecommender {
    pub fn new(catalog: Arc<Catalog>, config: EmergencyConfig) -> Self {
        Self { catalog, config }
    }

    fn fixed_candidate(product: &Product) -> RecommendationCandidate {
        RecommendationCandidate {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            category_path: product.category_path.clone(),
            large_category: product.large_category.clone(),
            single_household_score: 6.0,
            raw_suitability: 6.0,
            base_similarity: 0.6,
            boost_ratio: 1.5,
            behavior_boost: 1.0,
            final_score: 0.6,
            user_type: ProvenanceTag::EmergencyGuaranteed,
            recommendation_reason: REASON.to_string(),
            appeal_score: 6.0,
        }
    }
}

impl CandidateSource for EmergencyRecommender {
    fn name(&self) -> &'static str {
        "emergency_backfill"
    }

    fn produce(
        &self,
        profile: &UserProfile,
        remaining: usize,
        exclusions: &mut ExclusionSet,
    ) -> Vec<RecommendationCandidate> {
        if remaining == 0 {
            return Vec::new();
        }

        let mut available: Vec<&Product> = self
            .catalog
            .products()
            .iter()
            .filter(|product| !exclusions.is_used(product.id))
            .filter(|product| {
                product.price >= self.config.min_price && product.price <= self.config.max_price
            })
            .collect();

        if available.is_empty() {
            available = self
                .catalog
                .products()
                .iter()
                .filter(|product| !exclusions.is_used(product.id))
                .take(remaining * 2)
                .collect();
        }

        let mut rng = StdRng::seed_from_u64(profile.user_id.0);
        let sampled: Vec<&&Product> =
            available.choose_multiple(&mut rng, remaining.min(available.len())).collect();

        let mut picks = Vec::with_capacity(sampled.len());
        for product in sampled {
            picks.push(Self::fixed_candidate(product));
            exclusions.mark_used(product.id);
        }
        picks
    }
}
