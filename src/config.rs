//! Runtime limits for the core (§5 "Cancellation / timeouts": "Implementations
//! may bound runtime by refusing inputs beyond configurable limits").
//!
//! Mirrors the optional `figment_config` feature carried over from the
//! teacher crate's `Cargo.toml`: defaults are baked in, and a caller may
//! additionally layer environment variables over them when the feature is
//! enabled.

use serde::{Deserialize, Serialize};

/// Ceiling on `max_items * max_containers` a single `plan_placement` call
/// will accept before refusing the input outright (§5 worst-case bound).
const DEFAULT_MAX_PLACEMENT_WORK: usize = 50_000;

/// Ceiling on `scaled_max_weight` (mass * 100) a single `plan_waste_return`
/// call will run its DP over.
const DEFAULT_MAX_KNAPSACK_CAPACITY: usize = 2_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CoreConfig {
    pub max_placement_work: usize,
    pub max_knapsack_capacity: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            max_placement_work: DEFAULT_MAX_PLACEMENT_WORK,
            max_knapsack_capacity: DEFAULT_MAX_KNAPSACK_CAPACITY,
        }
    }
}

#[cfg(feature = "figment_config")]
impl CoreConfig {
    /// Layers `STOWAGE_`-prefixed environment variables over the defaults,
    /// e.g. `STOWAGE_MAX_PLACEMENT_WORK=100000`.
    pub fn from_env() -> Result<Self, figment::Error> {
        use figment::providers::{Env, Serialized};
        use figment::Figment;

        Figment::from(Serialized::defaults(CoreConfig::default()))
            .merge(Env::prefixed("STOWAGE_"))
            .extract()
    }
}
