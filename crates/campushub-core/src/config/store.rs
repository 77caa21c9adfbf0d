//! Document store configuration.

use serde::{Deserialize, Serialize};

/// Settings for the in-process document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file the store is loaded from and flushed to.
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// Whether writes are flushed to `data_file`.
    #[serde(default)]
    pub persist: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            persist: false,
        }
    }
}

fn default_data_file() -> String {
    "data/campushub.json".to_string()
}
