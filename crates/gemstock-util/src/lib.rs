//! Shared utilities for gemstock
//!
//! This crate provides:
//! - ID types (ItemId)
//! - Money helpers (rounding to cents)
//! - Default paths for data and config files

mod ids;
mod money;
mod paths;

pub use ids::*;
pub use money::*;
pub use paths::*;
