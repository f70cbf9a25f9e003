//! Indexing configuration.
//!
//! [`IndexConfig`] holds the thresholds that decide when a track opens a new
//! key or fragment. Every field defaults to the values live ingest has
//! always used, so an empty `{}` document is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Thresholds used by track indexing, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Non-video tracks open a new key once this much time has passed since
    /// the last key without an explicit keyframe.
    pub key_interval_ms: u64,
    /// A new fragment opens when the opening key is at least this far past
    /// the first key of the current fragment.
    pub fragment_min_ms: u64,
    /// A completed fragment must last longer than this before its size is
    /// used to estimate the bitrate.
    pub bps_min_duration_ms: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            key_interval_ms: 5000,
            fragment_min_ms: 5000,
            bps_min_duration_ms: 1000,
        }
    }
}

impl IndexConfig {
    /// Deserialize an `IndexConfig` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str).map_err(|e| Error::config(format!("parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file cannot be used.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse index config {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No index config at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read index config {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.key_interval_ms == 0 {
            warnings.push(
                "key_interval_ms is 0; every non-video packet will open a new key".into(),
            );
        }
        if self.fragment_min_ms == 0 {
            warnings.push("fragment_min_ms is 0; every key will open a new fragment".into());
        }
        if self.bps_min_duration_ms == 0 {
            warnings.push(
                "bps_min_duration_ms is 0; bitrate may be estimated from a single frame".into(),
            );
        }

        warnings
    }
}
