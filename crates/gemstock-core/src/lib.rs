//! Catalog operations and profit aggregation for gemstock
//!
//! This crate contains:
//! - Catalog operations (add, sell, update, list) run as one store transaction each
//! - Profit and inventory summaries computed from a snapshot
//! - The demo inventory used to seed an empty shop

mod catalog;
mod demo;
mod summary;

pub use catalog::*;
pub use demo::*;
pub use summary::*;
