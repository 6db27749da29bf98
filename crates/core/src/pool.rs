//! Category pool construction.
//!
//! Pools are a one-time batch cost amortized across all users in a run: for
//! each target category, the catalog is filtered, scored, cut at the 30th
//! percentile, and capped with a fixed-seed sample so the pool is stable for
//! a given catalog snapshot. A category with no matching products gets no
//! entry; callers treat an absent pool as empty, not as an error.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::catalog::Catalog;
use crate::config::PoolConfig;
use crate::domain::product::ProductId;

#[derive(Debug, Default)]
pub struct CategoryPools {
    pools: HashMap<String, Vec<ProductId>>,
}

impl CategoryPools {
    pub fn build(catalog: &Catalog, config: &PoolConfig) -> Self {
        let mut pools = HashMap::new();

        for category in &config.target_categories {
            let mut members: Vec<(ProductId, f64)> = catalog
                .products()
                .iter()
                .filter(|product| product.category_text.contains(category.as_str()))
                .map(|product| (product.id, product.flexible_single_score))
                .collect();

            if members.is_empty() {
                tracing::debug!(category = %category, "no products for category, skipping pool");
                continue;
            }

            let scores: Vec<f64> = members.iter().map(|(_, score)| *score).collect();
            let cutoff = percentile(&scores, config.percentile_cutoff);
            members.retain(|(_, score)| *score >= cutoff);

            let ids: Vec<ProductId> = if members.len() > config.cap {
                let mut rng = StdRng::seed_from_u64(config.sample_seed);
                members
                    .choose_multiple(&mut rng, config.cap)
                    .map(|(id, _)| *id)
                    .collect()
            } else {
                members.into_iter().map(|(id, _)| id).collect()
            };

            tracing::debug!(category = %category, size = ids.len(), "built category pool");
            pools.insert(category.clone(), ids);
        }

        Self { pools }
    }

    /// Pool members for a category, in construction order. `None` when the
    /// category had no matching products.
    pub fn get(&self, category: &str) -> Option<&[ProductId]> {
        self.pools.get(category).map(Vec::as_slice)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.pools.contains_key(category)
    }

    /// `(category, size)` pairs for inspection tooling, sorted by name.
    pub fn sizes(&self) -> Vec<(String, usize)> {
        let mut sizes: Vec<(String, usize)> =
            self.pools.iter().map(|(category, ids)| (category.clone(), ids.len())).collect();
        sizes.sort();
        sizes
    }
}

/// Linearly interpolated percentile over unsorted input. `fraction` is in
/// [0, 1]; an empty slice yields 0.
fn percentile(values: &[f64], fraction: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = fraction.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let weight = rank - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}
