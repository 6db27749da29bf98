//! Single-household product recommendation core.
//!
//! Builds suitability-scored category pools over a catalog snapshot and
//! serves each user a small, diverse top-K through a degrading cascade:
//! category pools, then vector-similarity fallback, then a guaranteed
//! emergency backfill. Per-user history keeps repeat requests fresh.

pub mod builder;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod history;
pub mod index;
pub mod pool;
pub mod scoring;
pub mod sources;

pub use builder::RecommendationDataBuilder;
pub use catalog::Catalog;
pub use config::{EngineConfig, HistoryConfig, PoolConfig};
pub use domain::batch::RecommendationBatch;
pub use domain::candidate::{ProvenanceTag, RecommendationCandidate};
pub use domain::product::{Product, ProductId, ProductRecord};
pub use domain::profile::{
    ActivityLevel, AgeGroup, UserActivityRecord, UserId, UserProfile, UserProfiler,
};
pub use engine::RecommendationEngine;
pub use errors::CollaboratorError;
pub use history::RecommendationHistoryManager;
pub use index::{FlatIpIndex, ProfileEmbedder, TextVectorizer, UserEmbedder, VectorIndex};
pub use pool::CategoryPools;
pub use scoring::{BehaviorBooster, ScoreCalculator};
pub use sources::{
    CandidateSource, CategoryPoolSource, CategoryRecommender, EmergencyRecommender, ExclusionSet,
    VectorFallbackRecommender,
};
