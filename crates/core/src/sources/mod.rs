//! Candidate sources for the recommendation cascade.
//!
//! Each stage implements [`CandidateSource`]; the engine folds over an
//! ordered list of sources until the quota is met. Sources share one
//! [`ExclusionSet`] so an id accepted anywhere in the cascade is never
//! offered again within the same request.

mod category;
mod emergency;
mod vector;

pub use category::{CategoryPoolSource, CategoryRecommender, PriceBand};
pub use emergency::EmergencyRecommender;
pub use vector::VectorFallbackRecommender;

use std::collections::HashSet;

use crate::domain::candidate::RecommendationCandidate;
use crate::domain::product::ProductId;
use crate::domain::profile::UserProfile;

/// Ids excluded from candidate selection: those already used in this
/// request plus those previously shown to the user.
///
/// History only gates the pool stage; the fallback stages filter on
/// request-local usage alone, so a starved catalog can still repeat an old
/// recommendation rather than come up short.
#[derive(Clone, Debug, Default)]
pub struct ExclusionSet {
    used: HashSet<ProductId>,
    previous: HashSet<ProductId>,
}

impl ExclusionSet {
    pub fn new(previous: HashSet<ProductId>) -> Self {
        Self { used: HashSet::new(), previous }
    }

    /// Accepted by an earlier stage of this request.
    pub fn is_used(&self, id: ProductId) -> bool {
        self.used.contains(&id)
    }

    /// Used in this request or shown to the user before.
    pub fn excluded_from_pool(&self, id: ProductId) -> bool {
        self.used.contains(&id) || self.previous.contains(&id)
    }

    pub fn mark_used(&mut self, id: ProductId) {
        self.used.insert(id);
    }

    pub fn used_count(&self) -> usize {
        self.used.len()
    }
}

/// One stage of the cascade. Implementations must degrade to an empty
/// contribution instead of failing, and must mark every accepted id in the
/// exclusion set.
pub trait CandidateSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn produce(
        &self,
        profile: &UserProfile,
        remaining: usize,
        exclusions: &mut ExclusionSet,
    ) -> Vec<RecommendationCandidate>;
}
