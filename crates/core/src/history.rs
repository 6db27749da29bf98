//! Per-user recommendation history.
//!
//! Bounded, insertion-ordered sets of already-shown product ids. The map is
//! sharded so concurrent updates for different users contend only within a
//! shard, never on one global lock. Same-user races are serialized by the
//! shard lock.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::config::HistoryConfig;
use crate::domain::product::ProductId;
use crate::domain::profile::UserId;

const SHARD_COUNT: usize = 16;

#[derive(Debug)]
pub struct RecommendationHistoryManager {
    shards: Vec<Mutex<HashMap<UserId, Vec<ProductId>>>>,
    config: HistoryConfig,
}

impl Default for RecommendationHistoryManager {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl RecommendationHistoryManager {
    pub fn new(config: HistoryConfig) -> Self {
        let shards = (0..SHARD_COUNT).map(|_| Mutex::new(HashMap::new())).collect();
        Self { shards, config }
    }

    fn shard(&self, user_id: UserId) -> &Mutex<HashMap<UserId, Vec<ProductId>>> {
        &self.shards[(user_id.0 % SHARD_COUNT as u64) as usize]
    }

    /// Snapshot of the ids already shown to a user; empty if unseen.
    pub fn get(&self, user_id: UserId) -> HashSet<ProductId> {
        let shard = self.shard(user_id).lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        shard.get(&user_id).map(|ids| ids.iter().copied().collect()).unwrap_or_default()
    }

    /// Union the new ids into the user's history, preserving insertion
    /// order. Once the set exceeds `max_entries` it is trimmed to the last
    /// `trim_to` inserted.
    pub fn update(&self, user_id: UserId, new_ids: impl IntoIterator<Item = ProductId>) {
        let mut shard =
            self.shard(user_id).lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let history = shard.entry(user_id).or_default();

        for id in new_ids {
            if !history.contains(&id) {
                history.push(id);
            }
        }

        if history.len() > self.config.max_entries {
            let drop = history.len().saturating_sub(self.config.trim_to);
            history.drain(..drop);
        }
    }

    /// Number of ids currently held for a user.
    pub fn len(&self, user_id: UserId) -> usize {
        let shard = self.shard(user_id).lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        shard.get(&user_id).map(Vec::len).unwrap_or(0)
    }
}
