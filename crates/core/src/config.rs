//! Engine configuration.
//!
//! Every knob has a production default matching the batch pipeline; a TOML
//! file may override any subset. Loading failures are the only configuration
//! errors; a missing file is not one when defaults are acceptable.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Final recommendation count per request.
    pub top_k: usize,
    /// Slots reserved for the user's preferred category.
    pub preferred_picks: usize,
    pub pool: PoolConfig,
    pub history: HistoryConfig,
    pub vector: VectorConfig,
    pub emergency: EmergencyConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Categories that get a precomputed pool.
    pub target_categories: Vec<String>,
    /// Hard cap on pool size after filtering.
    pub cap: usize,
    /// Fraction of low scorers discarded (score below this percentile).
    pub percentile_cutoff: f64,
    /// Seed for the deterministic cap sample. Not user-specific: pools are
    /// shared across users and must be stable per catalog snapshot.
    pub sample_seed: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Trimming trigger: history longer than this gets cut.
    pub max_entries: usize,
    /// Entries kept (most recent) after a trim.
    pub trim_to: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    /// Nearest neighbours fetched from the index per fallback query.
    pub search_depth: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EmergencyConfig {
    /// Inclusive price window for emergency picks.
    pub min_price: u32,
    pub max_price: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            preferred_picks: 2,
            pool: PoolConfig::default(),
            history: HistoryConfig::default(),
            vector: VectorConfig::default(),
            emergency: EmergencyConfig::default(),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            target_categories: ["신선식품", "가공식품", "주방용품", "생활용품"]
                .iter()
                .map(|category| category.to_string())
                .collect(),
            cap: 80,
            percentile_cutoff: 0.30,
            sample_seed: 42,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: 15, trim_to: 8 }
    }
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self { search_depth: 100 }
    }
}

impl Default for EmergencyConfig {
    fn default() -> Self {
        Self { min_price: 1_000, max_price: 25_000 }
    }
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.pool.percentile_cutoff) {
            return Err(ConfigError::Invalid(format!(
                "pool.percentile_cutoff must be within [0, 1], got {}",
                self.pool.percentile_cutoff
            )));
        }
        if self.history.trim_to > self.history.max_entries {
            return Err(ConfigError::Invalid(format!(
                "history.trim_to ({}) exceeds history.max_entries ({})",
                self.history.trim_to, self.history.max_entries
            )));
        }
        if self.emergency.min_price > self.emergency.max_price {
            return Err(ConfigError::Invalid(
                "emergency.min_price exceeds emergency.max_price".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pipeline_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.top_k, 4);
        assert_eq!(config.preferred_picks, 2);
        assert_eq!(config.pool.cap, 80);
        assert_eq!(config.pool.target_categories.len(), 4);
        assert_eq!(config.history.max_entries, 15);
        assert_eq!(config.history.trim_to, 8);
        assert_eq!(config.vector.search_depth, 100);
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            top_k = 6

            [pool]
            cap = 40
            "#,
        )
        .unwrap();
        assert_eq!(config.top_k, 6);
        assert_eq!(config.pool.cap, 40);
        assert_eq!(config.pool.sample_seed, 42);
        assert_eq!(config.emergency.max_price, 25_000);
    }

    #[test]
    fn out_of_range_percentile_is_rejected() {
        let result = EngineConfig::from_toml_str("[pool]\npercentile_cutoff = 1.5\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn trim_larger_than_max_is_rejected() {
        let result = EngineConfig::from_toml_str("[history]\nmax_entries = 5\ntrim_to = 9\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
