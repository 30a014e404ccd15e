//! Strongly-typed engine configuration.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::engine::ObjectiveWeights;

fn default_priority_penalties() -> BTreeMap<u8, i32> {
    BTreeMap::from([(0, 1000), (1, 10), (2, 5), (3, 0)])
}

fn default_time_budget_secs() -> u64 {
    30
}

/// Tunable parameters of the scheduling engine.
///
/// Every field has a default, so an empty YAML document is a valid
/// configuration and callers without a config file can use
/// [`EngineConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Objective weights at relaxation level 0.
    pub weights: ObjectiveWeights,
    /// Penalty assigned to each duty-priority level when priority tables
    /// are expanded into preference terms. Level 0 is prohibitively
    /// expensive, level 3 is free.
    #[serde(default = "default_priority_penalties")]
    pub priority_penalties: BTreeMap<u8, i32>,
    /// Wall-clock budget per solve attempt, in seconds.
    #[serde(default = "default_time_budget_secs")]
    pub time_budget_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ObjectiveWeights::default(),
            priority_penalties: default_priority_penalties(),
            time_budget_secs: default_time_budget_secs(),
        }
    }
}
