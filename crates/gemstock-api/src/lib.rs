//! Data model for gemstock
//!
//! This crate defines the types shared between the store, the core
//! operations and front ends:
//! - Items and their sale status
//! - The inventory snapshot persisted as one document
//! - Typed partial updates
//! - Profit and inventory summaries

mod summary;
mod types;

pub use summary::*;
pub use types::*;
