//! # Stockcull Common Library
//!
//! Shared code for the stockcull tools including:
//! - Catalog loader (CSV import files -> item records)
//! - Decision store contract and both backends (flat file, SQLite)
//! - Reconciliation of catalog items with recorded decisions
//! - Configuration and path resolution

pub mod catalog;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod store;

pub use error::{Error, Result};
pub use store::{Decision, DecisionMap, DecisionStore};
