//! Run Configuration - Read-Only Inputs
//!
//! Everything the core consumes from the caller: canvas size, layer order,
//! per-element weights, and the requested edition count.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One configured layer: its directory name under the layers root, and the
/// selection weight for each element in that directory (element order is
/// lexicographic by filename).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSpec {
    pub name: String,
    pub weights: Vec<f64>,
}

/// Full run configuration. Layer order here is composition order: the first
/// layer is painted first, later layers occlude earlier ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    pub width: u32,
    pub height: u32,
    pub editions: usize,
    pub layers: Vec<LayerSpec>,
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Unreadable(path.display().to_string(), e))?;
        let config: RunConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config {0}: {1}")]
    Unreadable(String, #[source] std::io::Error),

    #[error("Malformed config: {0}")]
    Malformed(#[from] serde_json::Error),
}
