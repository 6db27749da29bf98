use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::candidate::RecommendationCandidate;
use crate::domain::profile::UserId;

/// Serializable result of one recommendation run for one user.
///
/// This is the minimal read/write contract at the output boundary; storage
/// backends and delivery formats live outside the core.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecommendationBatch {
    pub user_id: UserId,
    pub generated_at: DateTime<Utc>,
    pub recommendations: Vec<RecommendationCandidate>,
}

impl RecommendationBatch {
    pub fn new(
        user_id: UserId,
        generated_at: DateTime<Utc>,
        recommendations: Vec<RecommendationCandidate>,
    ) -> Self {
        Self { user_id, generated_at, recommendations }
    }

    /// Batch stamped with the current time.
    pub fn now(user_id: UserId, recommendations: Vec<RecommendationCandidate>) -> Self {
        Self::new(user_id, Utc::now(), recommendations)
    }

    /// Document id under which a batch is filed: `user_{id}_{yyyymmdd}`.
    pub fn doc_id(&self) -> String {
        format!("user_{}_{}", self.user_id, self.generated_at.format("%Y%m%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn doc_id_carries_user_and_date() {
        let generated = Utc.with_ymd_and_hms(2025, 6, 19, 17, 6, 4).unwrap();
        let batch = RecommendationBatch::new(UserId(42), generated, Vec::new());
        assert_eq!(batch.doc_id(), "user_42_20250619");
    }
}
