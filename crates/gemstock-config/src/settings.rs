//! Validated settings

use crate::schema::RawConfig;
use gemstock_util::data_dir_without_env;
use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Default symbol printed before amounts
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Validated settings ready for use by front ends
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory holding inventory.json
    pub data_dir: PathBuf,

    /// Fill an empty inventory with demo items on startup
    pub seed_demo_data: bool,

    /// Symbol printed before amounts
    pub currency_symbol: String,
}

impl Settings {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            data_dir: raw.store.data_dir.unwrap_or_else(data_dir_without_env),
            seed_demo_data: raw.store.seed_demo_data,
            currency_symbol: raw
                .display
                .currency_symbol
                .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()),
        }
    }

    /// Format an amount with the configured symbol, two fractional digits
    pub fn format_amount(&self, amount: f64) -> String {
        if amount < 0.0 {
            format!("-{}{:.2}", self.currency_symbol, -amount)
        } else {
            format!("{}{:.2}", self.currency_symbol, amount)
        }
    }
}

/// State of the configured data directory on this machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataDirStatus {
    /// Exists and is writable
    Ready,
    /// Does not exist yet; created on first use
    Missing,
    /// A file or other non-directory is in the way
    NotADirectory,
    /// Exists but is read-only
    ReadOnly,
    /// Could not be inspected
    Inaccessible,
}

impl DataDirStatus {
    /// True if gemstock can use (or create) the directory
    pub fn is_usable(&self) -> bool {
        matches!(self, DataDirStatus::Ready | DataDirStatus::Missing)
    }
}

impl fmt::Display for DataDirStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DataDirStatus::Ready => "exists",
            DataDirStatus::Missing => "will be created",
            DataDirStatus::NotADirectory => "not a directory",
            DataDirStatus::ReadOnly => "read-only",
            DataDirStatus::Inaccessible => "cannot be inspected",
        };
        f.write_str(text)
    }
}

impl Settings {
    /// Inspect `data_dir` without creating it
    pub fn data_dir_status(&self) -> DataDirStatus {
        match std::fs::metadata(&self.data_dir) {
            Ok(meta) if !meta.is_dir() => DataDirStatus::NotADirectory,
            Ok(meta) if meta.permissions().readonly() => DataDirStatus::ReadOnly,
            Ok(_) => DataDirStatus::Ready,
            Err(e) if e.kind() == ErrorKind::NotFound => DataDirStatus::Missing,
            Err(_) => DataDirStatus::Inaccessible,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: data_dir_without_env(),
            seed_demo_data: false,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}
