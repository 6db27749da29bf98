//! Vector-similarity fallback stage.

use std::sync::Arc;

use crate::builder::RecommendationDataBuilder;
use crate::catalog::Catalog;
use crate::domain::candidate::RecommendationCandidate;
use crate::domain::profile::UserProfile;
use crate::index::{UserEmbedder, VectorIndex};
use crate::sources::{CandidateSource, ExclusionSet};

/// Fills a shortfall with nearest-neighbour matches from the vector index.
///
/// Strictly best-effort: any collaborator failure is logged and converted to
/// an empty contribution so the cascade can move on to the emergency stage.
pub struct VectorFallbackRecommender {
    catalog: Arc<Catalog>,
    embedder: Arc<dyn UserEmbedder>,
    index: Arc<dyn VectorIndex>,
    search_depth: usize,
    builder: RecommendationDataBuilder,
}

impl VectorFallbackRecommender {
    pub fn new(
        catalog: Arc<Catalog>,
        embedder: Arc<dyn UserEmbedder>,
        index: Arc<dyn VectorIndex>,
        search_depth: usize,
    ) -> Self {
        Self { catalog, embedder, index, search_depth, builder: RecommendationDataBuilder::new() }
    }
}

impl CandidateSource for VectorFallbackRecommender {
    fn name(&self) -> &'static str {
        "vector_fallback"
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

        let embedding = match self.embedder.embed(profile) {
            Ok(embedding) => embedding,
            Err(error) => {
                tracing::warn!(user_id = %profile.user_id, %error, "embedding failed, skipping vector fallback");
                return Vec::new();
            }
        };

        let hits = match self.index.search(&embedding, self.search_depth) {
            Ok(hits) => hits,
            Err(error) => {
                tracing::warn!(user_id = %profile.user_id, %error, "index search failed, skipping vector fallback");
                return Vec::new();
            }
        };

        let mut accepted = Vec::new();
        for (_similarity, row) in hits {
            if accepted.len() >= remaining {
                break;
            }
            let Some(product) = self.catalog.by_row(row) else { continue };
            if exclusions.is_used(product.id) {
                continue;
            }
            accepted.push(self.builder.build(product, profile, false, &self.catalog));
            exclusions.mark_used(product.id);
        }
        accepted
    }
}
