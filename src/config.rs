//! Feed pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::scoring::ScoringWeights;
use crate::types::{DEFAULT_DAILY_LIKE_LIMIT, DEFAULT_MAX_PER_ORG, DISLIKE_COOLDOWN_DAYS};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedConfig {
    pub weights: ScoringWeights,
    pub daily_like_limit: u32,
    pub cooldown_days: i64,
    pub max_per_org: usize,
    /// Fixed shuffle seed for the exploration slice; `None` draws from
    /// the system RNG. Tests set this for reproducibility.
    pub shuffle_seed: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            daily_like_limit: DEFAULT_DAILY_LIKE_LIMIT,
            cooldown_days: DISLIKE_COOLDOWN_DAYS,
            max_per_org: DEFAULT_MAX_PER_ORG,
            shuffle_seed: None,
        }
    }
}

impl FeedConfig {
    /// Defaults with environment overrides, in the same spirit as the
    /// service-level `Config::from_env`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(limit) = env_parse::<u32>("FEED_DAILY_LIKE_LIMIT") {
            config.daily_like_limit = limit;
        }
        if let Some(days) = env_parse::<i64>("FEED_COOLDOWN_DAYS") {
            config.cooldown_days = days;
        }
        if let Some(cap) = env_parse::<usize>("FEED_MAX_PER_ORG") {
            config.max_per_org = cap;
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|value| value.parse().ok())
}
