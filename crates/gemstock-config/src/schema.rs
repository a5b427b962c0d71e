//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Storage settings
    #[serde(default)]
    pub store: RawStoreConfig,

    /// Output settings for front ends
    #[serde(default)]
    pub display: RawDisplayConfig,
}

/// Storage settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawStoreConfig {
    /// Directory holding inventory.json
    pub data_dir: Option<PathBuf>,

    /// Fill an empty inventory with demo items on startup
    #[serde(default)]
    pub seed_demo_data: bool,
}

/// Output settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDisplayConfig {
    /// Symbol printed before amounts (default "$")
    pub currency_symbol: Option<String>,
}
