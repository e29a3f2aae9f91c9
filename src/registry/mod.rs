//! Registry module for Corkboard.
//!
//! This module provides the top-level board collection and the hook trait
//! a storage layer implements to load and save it.

mod manager;
mod provider;

pub use manager::{BoardRegistry, SharedRegistry};
pub use provider::{IdSet, PersistenceProvider};
