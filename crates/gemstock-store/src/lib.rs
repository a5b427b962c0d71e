//! Persistence layer for gemstock
//!
//! Provides:
//! - The `Store` trait (whole-snapshot load/save plus transactional update)
//! - A JSON file store guarded by an in-process lock
//! - An in-memory store for tests

mod json_file;
mod memory;
mod traits;

pub use json_file::*;
pub use memory::*;
pub use traits::*;

use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
