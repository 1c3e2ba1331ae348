//! Gateway configuration
//!
//! Deserializable from JSON; every field has a default so a partial (or
//! empty) file is valid.
//!
//! ```
//! use comicstore::GatewayConfig;
//!
//! let config = GatewayConfig::from_json(r#"{"max_update_retries": 3}"#).unwrap();
//! assert_eq!(config.max_update_retries, 3);
//! assert_eq!(config.hash_cost, Default::default());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Result, credential::HashCost};

/// Default number of fetch-modify-write attempts for one comic update.
pub const DEFAULT_MAX_UPDATE_RETRIES: u32 = 8;

/// Settings for a [`Gateway`](crate::Gateway)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Argon2 cost used for new password hashes
    pub hash_cost: HashCost,

    /// Attempts at a comic update before giving up with a conflict.
    /// Values below 1 are treated as 1.
    pub max_update_retries: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            hash_cost: HashCost::default(),
            max_update_retries: DEFAULT_MAX_UPDATE_RETRIES,
        }
    }
}

impl GatewayConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file. A missing file yields the defaults.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        match tokio::fs::read_to_string(path.as_ref()).await {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.as_ref().display(), "No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Cheap hashing and a generous retry budget. Only for tests.
    #[cfg(any(test, feature = "testing"))]
    pub fn for_tests() -> Self {
        Self {
            hash_cost: HashCost::minimal(),
            max_update_retries: 64,
        }
    }

    pub(crate) fn attempts(&self) -> u32 {
        self.max_update_retries.max(1)
    }
}
