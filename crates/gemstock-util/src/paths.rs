//! Default paths for gemstock components
//!
//! Provides centralized path defaults that all crates can use.
//! Paths are user-writable by default (no root required):
//! - Data: `$XDG_DATA_HOME/gemstock` or `~/.local/share/gemstock`
//! - Config: `$XDG_CONFIG_HOME/gemstock/config.toml` or `~/.config/gemstock/config.toml`

use std::path::PathBuf;

/// Environment variable for overriding the data directory
pub const GEMSTOCK_DATA_DIR_ENV: &str = "GEMSTOCK_DATA_DIR";

/// Environment variable for overriding the config file path
pub const GEMSTOCK_CONFIG_ENV: &str = "GEMSTOCK_CONFIG";

/// Inventory snapshot filename within the data directory
pub const INVENTORY_FILENAME: &str = "inventory.json";

/// Config filename within the config directory
const CONFIG_FILENAME: &str = "config.toml";

/// Application subdirectory name
const APP_DIR: &str = "gemstock";

/// Get the default data directory, ignoring GEMSTOCK_DATA_DIR.
///
/// The env var is applied by the command line on top of the config value.
/// Order of precedence:
/// 1. `$XDG_DATA_HOME/gemstock` (if XDG_DATA_HOME is set)
/// 2. `~/.local/share/gemstock` (fallback)
pub fn data_dir_without_env() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join("data")
}

/// Path of the inventory snapshot inside a data directory
pub fn inventory_path(data_dir: impl Into<PathBuf>) -> PathBuf {
    data_dir.into().join(INVENTORY_FILENAME)
}

/// Get the default config file path.
///
/// Order of precedence:
/// 1. `$GEMSTOCK_CONFIG` environment variable (if set)
/// 2. `$XDG_CONFIG_HOME/gemstock/config.toml` (if XDG_CONFIG_HOME is set)
/// 3. `~/.config/gemstock/config.toml` (fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(GEMSTOCK_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    config_path_without_env()
}

/// Get the config path without checking GEMSTOCK_CONFIG env var.
pub fn config_path_without_env() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home)
            .join(APP_DIR)
            .join(CONFIG_FILENAME);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILENAME);
    }

    PathBuf::from("/etc").join(APP_DIR).join(CONFIG_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_contains_gemstock() {
        let path = data_dir_without_env();
        assert!(path.to_string_lossy().contains("gemstock"));
    }

    #[test]
    fn config_path_contains_gemstock() {
        let path = config_path_without_env();
        assert!(path.to_string_lossy().contains("gemstock"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn inventory_file_name_is_fixed() {
        let path = inventory_path("/srv/shop");
        assert_eq!(path, PathBuf::from("/srv/shop/inventory.json"));
    }
}
