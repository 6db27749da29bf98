//! Pool-phase candidate selection.

use std::collections::HashSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::builder::RecommendationDataBuilder;
use crate::catalog::Catalog;
use crate::domain::candidate::RecommendationCandidate;
use crate::domain::product::{Product, ProductId};
use crate::domain::profile::UserProfile;
use crate::pool::CategoryPools;
use crate::sources::{CandidateSource, ExclusionSet};

/// Price tier used for the diversity constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PriceBand {
    Low,
    Mid,
    High,
}

impl PriceBand {
    pub fn of(price: u32) -> Self {
        if price < 8_000 {
            PriceBand::Low
        } else if price < 20_000 {
            PriceBand::Mid
        } else {
            PriceBand::High
        }
    }
}

/// Draws top candidates from one category pool, enforcing price-band
/// diversity with an unconstrained backfill pass.
pub struct CategoryRecommender {
    catalog: Arc<Catalog>,
    pools: Arc<CategoryPools>,
    builder: RecommendationDataBuilder,
}

impl CategoryRecommender {
    pub fn new(catalog: Arc<Catalog>, pools: Arc<CategoryPools>) -> Self {
        Self { catalog, pools, builder: RecommendationDataBuilder::new() }
    }

    /// Up to `count` candidates from `category`. No pool or zero count is an
    /// empty result, never an error.
    pub fn recommend(
        &self,
        category: &str,
        count: usize,
        exclusions: &ExclusionSet,
        profile: &UserProfile,
        is_preferred: bool,
    ) -> Vec<RecommendationCandidate> {
        let Some(pool) = self.pools.get(category) else { return Vec::new() };
        if count == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<&Product> = pool
            .iter()
            .filter(|id| !exclusions.excluded_from_pool(**id))
            .filter_map(|id| self.catalog.get(*id))
            .collect();
        // Stable sort: ties keep pool order, which keeps catalog order.
        ranked.sort_by(|a, b| {
            b.flexible_single_score
                .partial_cmp(&a.flexible_single_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut selected: Vec<RecommendationCandidate> = Vec::new();
        let mut bands_used: HashSet<PriceBand> = HashSet::new();

        for product in &ranked {
            if selected.len() >= count {
                break;
            }

            let band = PriceBand::of(product.price);

            // Non-preferred categories avoid repeating a price band once a
            // pick exists; the backfill below relaxes this if it starves us.
            if !is_preferred && bands_used.contains(&band) && !selected.is_empty() {
                continue;
            }

            selected.push(self.builder.build(product, profile, is_preferred, &self.catalog));
            bands_used.insert(band);
        }

        if selected.len() < count {
            let chosen: HashSet<ProductId> =
                selected.iter().map(|candidate| candidate.product_id).collect();
            let shortfall = count - selected.len();
            for product in
                ranked.iter().filter(|product| !chosen.contains(&product.id)).take(shortfall)
            {
                selected.push(self.builder.build(product, profile, is_preferred, &self.catalog));
            }
        }

        selected
    }
}

/// First cascade stage: the preferred category gets a fixed allocation, then
/// the remaining target categories are drawn one pick each in an order
/// shuffled deterministically per user.
pub struct CategoryPoolSource {
    recommender: CategoryRecommender,
    target_categories: Vec<String>,
    preferred_picks: usize,
}

impl CategoryPoolSource {
    pub fn new(
        recommender: CategoryRecommender,
        target_categories: Vec<String>,
        preferred_picks: usize,
    ) -> Self {
        Self { recommender, target_categories, preferred_picks }
    }
}

impl CandidateSource for CategoryPoolSource {
    fn name(&self) -> &'static str {
        "category_pool"
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

        let mut picked: Vec<RecommendationCandidate> = Vec::new();
        let preferred = profile.base_interest_category.as_deref();

        if let Some(category) = preferred {
            let allocation = self.preferred_picks.min(remaining);
            for candidate in
                self.recommender.recommend(category, allocation, exclusions, profile, true)
            {
                exclusions.mark_used(candidate.product_id);
                picked.push(candidate);
            }
        }

        let mut others: Vec<&str> = self
            .target_categories
            .iter()
            .map(String::as_str)
            .filter(|category| Some(*category) != preferred)
            .collect();
        let mut rng = StdRng::seed_from_u64(profile.user_id.0);
        others.shuffle(&mut rng);

        for category in others {
            if picked.len() >= remaining {
                break;
            }
            for candidate in self.recommender.recommend(category, 1, exclusions, profile, false) {
                exclusions.mark_used(candidate.product_id);
                picked.push(candidate);
            }
        }

        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PoolConfig;
    use crate::domain::product::ProductRecord;
    use crate::domain::profile::{ActivityLevel, AgeGroup, UserId};

    fn record(id: u64, name: &str, price: u32, category: &str) -> ProductRecord {
        ProductRecord {
            id: ProductId(id),
            name: name.to_string(),
            price,
            large_category: Some(category.to_string()),
            medium_category: None,
            small_category: None,
        }
    }

    fn fixture() -> (Arc<Catalog>, Arc<CategoryPools>) {
        let catalog = Arc::new(Catalog::from_records(vec![
            record(1, "1인분 즉석 국밥", 4_000, "가공식품"),
            record(2, "소포장 반찬 세트", 6_500, "가공식품"),
            record(3, "간편 카레", 9_000, "가공식품"),
            record(4, "혼밥 도시락", 12_000, "가공식품"),
            record(5, "미니 전골 밀키트", 21_000, "가공식품"),
            record(6, "미니 프라이팬", 7_000, "주방용품"),
        ]));
        let pools = Arc::new(CategoryPools::build(&catalog, &PoolConfig::default()));
        (catalog, pools)
    }

    fn profile(user_id: u64, preferred: Option<&str>) -> UserProfile {
        UserProfile {
            user_id: UserId(user_id),
            base_interest_category: preferred.map(str::to_string),
            age_group: AgeGroup::Twenties,
            gender: None,
            search_keywords: Vec::new(),
            favorite_product_ids: Vec::new(),
            favorite_categories: Vec::new(),
            clicked_categories: Vec::new(),
            activity: ActivityLevel::New,
        }
    }

    #[test]
    fn zero_count_returns_empty() {
        let (catalog, pools) = fixture();
        let recommender = CategoryRecommender::new(catalog, pools);
        let picks = recommender.recommend(
            "가공식품",
            0,
            &ExclusionSet::default(),
            &profile(1, None),
            true,
        );
        assert!(picks.is_empty());
    }

    #[test]
    fn missing_pool_returns_empty() {
        let (catalog, pools) = fixture();
        let recommender = CategoryRecommender::new(catalog, pools);
        let picks = recommender.recommend(
            "신선식품",
            3,
            &ExclusionSet::default(),
            &profile(1, None),
            false,
        );
        assert!(picks.is_empty());
    }

    #[test]
    fn picks_are_sorted_by_flexible_score() {
        let (catalog, pools) = fixture();
        let recommender = CategoryRecommender::new(catalog.clone(), pools);
        let picks = recommender.recommend(
            "가공식품",
            3,
            &ExclusionSet::default(),
            &profile(1, None),
            true,
        );
        assert_eq!(picks.len(), 3);
        let scores: Vec<f64> = picks
            .iter()
            .map(|pick| catalog.get(pick.product_id).unwrap().flexible_single_score)
            .collect();
        assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn non_preferred_avoids_duplicate_price_band_then_backfills() {
        // Catalog where every product sits in the low band: the diversity
        // constraint would starve the second pick, so backfill must kick in.
        let catalog = Arc::new(Catalog::from_records(vec![
            record(1, "1인용 컵밥", 3_000, "가공식품"),
            record(2, "1인용 컵라면", 3_500, "가공식품"),
            record(3, "1인용 죽", 4_000, "가공식품"),
        ]));
        let pools = Arc::new(CategoryPools::build(&catalog, &PoolConfig::default()));
        let recommender = CategoryRecommender::new(catalog, pools);

        let picks = recommender.recommend(
            "가공식품",
            2,
            &ExclusionSet::default(),
            &profile(1, None),
            false,
        );
        assert_eq!(picks.len(), 2);
        assert_ne!(picks[0].product_id, picks[1].product_id);
    }

    #[test]
    fn exclusions_remove_candidates_from_the_pool() {
        let (catalog, pools) = fixture();
        let recommender = CategoryRecommender::new(catalog, pools);
        let mut exclusions = ExclusionSet::default();
        exclusions.mark_used(ProductId(1));
        exclusions.mark_used(ProductId(2));

        let picks =
            recommender.recommend("가공식품", 5, &exclusions, &profile(1, None), true);
        assert!(picks.iter().all(|pick| pick.product_id != ProductId(1)));
        assert!(picks.iter().all(|pick| pick.product_id != ProductId(2)));
    }

    #[test]
    fn pool_source_allocates_preferred_slots_first() {
        let (catalog, pools) = fixture();
        let source = CategoryPoolSource::new(
            CategoryRecommender::new(catalog, pools),
            PoolConfig::default().target_categories,
            2,
        );
        let mut exclusions = ExclusionSet::default();
        let picks = source.produce(&profile(7, Some("가공식품")), 4, &mut exclusions);

        assert!(picks.len() >= 2);
        assert!(picks[0].large_category == "가공식품");
        assert!(picks[1].large_category == "가공식품");
        // All accepted ids are marked used for later stages.
        assert_eq!(exclusions.used_count(), picks.len());
    }

    #[test]
    fn pool_source_shuffle_is_deterministic_per_user() {
        let (catalog, pools) = fixture();
        let source = CategoryPoolSource::new(
            CategoryRecommender::new(catalog, pools),
            PoolConfig::default().target_categories,
            2,
        );

        let mut first = ExclusionSet::default();
        let mut second = ExclusionSet::default();
        let picks_a = source.produce(&profile(7, Some("가공식품")), 4, &mut first);
        let picks_b = source.produce(&profile(7, Some("가공식품")), 4, &mut second);

        let ids_a: Vec<ProductId> = picks_a.iter().map(|pick| pick.product_id).collect();
        let ids_b: Vec<ProductId> = picks_b.iter().map(|pick| pick.product_id).collect();
        assert_eq!(ids_a, ids_b);
    }
}
