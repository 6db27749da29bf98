pub mod behavior;
pub mod suitability;

pub use behavior::{BehaviorBooster, BEHAVIOR_BOOST_CAP};
pub use suitability::{ScoreCalculator, BASE_SCORE_MAX, FLEXIBLE_SCORE_MAX};
