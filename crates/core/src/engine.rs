//! Cascade orchestration.
//!
//! The engine folds an ordered list of candidate sources (category pools,
//! then vector fallback, then emergency backfill) until the requested count
//! is met,
//! then deduplicates, truncates, and records history. Output keeps cascade
//! insertion order (preferred-category picks first); it is never re-sorted
//! by final score, which favors category coverage over score ranking.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::domain::candidate::RecommendationCandidate;
use crate::domain::product::ProductId;
use crate::domain::profile::{UserId, UserProfile};
use crate::history::RecommendationHistoryManager;
use crate::index::{UserEmbedder, VectorIndex};
use crate::pool::CategoryPools;
use crate::sources::{
    CandidateSource, CategoryPoolSource, CategoryRecommender, EmergencyRecommender, ExclusionSet,
    VectorFallbackRecommender,
};

pub struct RecommendationEngine {
    profiles: HashMap<UserId, UserProfile>,
    history: RecommendationHistoryManager,
    /// Cascade order: pools, vector fallback, emergency backfill.
    sources: Vec<Box<dyn CandidateSource>>,
    pools: Arc<CategoryPools>,
    config: EngineConfig,
}

impl RecommendationEngine {
    pub fn new(
        catalog: Arc<Catalog>,
        profiles: HashMap<UserId, UserProfile>,
        embedder: Arc<dyn UserEmbedder>,
        index: Arc<dyn VectorIndex>,
        config: EngineConfig,
    ) -> Self {
        let pools = Arc::new(CategoryPools::build(&catalog, &config.pool));

        let pool_source = CategoryPoolSource::new(
            CategoryRecommender::new(Arc::clone(&catalog), Arc::clone(&pools)),
            config.pool.target_categories.clone(),
            config.preferred_picks,
        );
        let vector_source = VectorFallbackRecommender::new(
            Arc::clone(&catalog),
            embedder,
            index,
            config.vector.search_depth,
        );
        let emergency_source =
            EmergencyRecommender::new(Arc::clone(&catalog), config.emergency.clone());

        Self {
            profiles,
            history: RecommendationHistoryManager::new(config.history.clone()),
            sources: vec![
                Box::new(pool_source),
                Box::new(vector_source),
                Box::new(emergency_source),
            ],
            pools,
            config,
        }
    }

    /// Personalized top-`top_k` for a known user. Unknown users get an empty
    /// result; every internal shortfall degrades through the cascade instead
    /// of failing.
    pub fn recommend(&self, user_id: UserId, top_k: usize) -> Vec<RecommendationCandidate> {
        let Some(profile) = self.profiles.get(&user_id) else {
            tracing::debug!(%user_id, "no profile, returning empty recommendation");
            return Vec::new();
        };

        let previous = self.history.get(user_id);
        let mut exclusions = ExclusionSet::new(previous);

        let selected = self.run_cascade(profile, top_k, &mut exclusions, 0);
        let finalized = finalize(selected, top_k);

        self.history
            .update(user_id, finalized.iter().map(|candidate| candidate.product_id));

        finalized
    }

    /// `recommend` with the configured default count.
    pub fn recommend_default(&self, user_id: UserId) -> Vec<RecommendationCandidate> {
        self.recommend(user_id, self.config.top_k)
    }

    /// Recommendation for a profile not yet in the snapshot: vector and
    /// emergency stages only, no pools and no history involvement.
    pub fn recommend_for_new_user(
        &self,
        profile: &UserProfile,
        top_k: usize,
    ) -> Vec<RecommendationCandidate> {
        let mut exclusions = ExclusionSet::default();
        let selected = self.run_cascade(profile, top_k, &mut exclusions, 1);
        finalize(selected, top_k)
    }

    fn run_cascade(
        &self,
        profile: &UserProfile,
        top_k: usize,
        exclusions: &mut ExclusionSet,
        first_stage: usize,
    ) -> Vec<RecommendationCandidate> {
        let mut selected: Vec<RecommendationCandidate> = Vec::new();

        for source in &self.sources[first_stage..] {
            if selected.len() >= top_k {
                break;
            }
            let remaining = top_k - selected.len();
            let produced = source.produce(profile, remaining, exclusions);
            tracing::debug!(
                user_id = %profile.user_id,
                stage = source.name(),
                requested = remaining,
                produced = produced.len(),
                "cascade stage complete"
            );
            selected.extend(produced);
        }

        selected
    }

    pub fn history(&self) -> &RecommendationHistoryManager {
        &self.history
    }

    /// Pools built for this engine's catalog snapshot.
    pub fn pools(&self) -> &CategoryPools {
        &self.pools
    }
}

/// Dedup by product id (first occurrence wins) and cut to `top_k`, keeping
/// cascade insertion order.
fn finalize(
    candidates: Vec<RecommendationCandidate>,
    top_k: usize,
) -> Vec<RecommendationCandidate> {
    let mut seen: HashSet<ProductId> = HashSet::new();
    let mut finalized: Vec<RecommendationCandidate> = Vec::new();
    for candidate in candidates {
        if finalized.len() >= top_k {
            break;
        }
        if seen.insert(candidate.product_id) {
            finalized.push(candidate);
        }
    }
    finalized
}
