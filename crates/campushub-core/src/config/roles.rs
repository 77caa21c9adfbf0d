//! Admin role lookup configuration.

use serde::{Deserialize, Serialize};

/// Settings for the cached admin-role gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolesConfig {
    /// Maximum number of user ids whose role answer is cached.
    #[serde(default = "default_capacity")]
    pub cache_capacity: u64,
    /// Seconds a cached answer stays valid. `0` keeps it for the cache lifetime.
    #[serde(default)]
    pub cache_ttl_seconds: u64,
}

impl Default for RolesConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_capacity(),
            cache_ttl_seconds: 0,
        }
    }
}

fn default_capacity() -> u64 {
    10_000
}
