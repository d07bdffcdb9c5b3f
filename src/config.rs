//! Runtime configuration
//!
//! Loaded from a JSON file; every section and field is optional and falls
//! back to its default.
//!
//! ```json
//! {
//!   "engine": { "model": "hash-384" },
//!   "generator": { "id_field": "url" },
//!   "search": { "threshold": 0.7, "max_results": 10 }
//! }
//! ```

use crate::Result;
use cardvec_core::SearchConfig;
use cardvec_embed::{EngineConfig, GeneratorConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub generator: GeneratorConfig,
    pub search: SearchConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.search.validate()?;
        debug!(path = %path.display(), model = %config.engine.model, "configuration loaded");
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}
