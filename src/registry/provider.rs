//! Persistence hooks for the board registry.
//!
//! The registry itself only keeps boards in memory. A storage layer plugs
//! in by implementing `PersistenceProvider`; every hook has a no-op default
//! so implementors only override what they need.

use std::collections::BTreeSet;

use async_trait::async_trait;

use super::manager::BoardRegistry;
use crate::board::{Board, DeletionStatus, EntityId};
use crate::Result;

/// A set of board ids to load.
///
/// Ids are normalized on the way in, so `1` and `"1"` are one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSet(BTreeSet<EntityId>);

impl IdSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any id in the set matches `id`, with numeric coercion.
    pub fn contains(&self, id: &EntityId) -> bool {
        self.0.iter().any(|candidate| candidate.matches(id))
    }

    /// Iterate over the ids.
    pub fn iter(&self) -> impl Iterator<Item = &EntityId> {
        self.0.iter()
    }

    /// Number of ids.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<EntityId> for IdSet {
    fn from(id: EntityId) -> Self {
        Self(BTreeSet::from([id.normalized()]))
    }
}

impl From<i64> for IdSet {
    fn from(id: i64) -> Self {
        EntityId::from(id).into()
    }
}

impl From<&str> for IdSet {
    fn from(id: &str) -> Self {
        EntityId::from(id).into()
    }
}

impl From<Vec<EntityId>> for IdSet {
    fn from(ids: Vec<EntityId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<BTreeSet<EntityId>> for IdSet {
    fn from(ids: BTreeSet<EntityId>) -> Self {
        ids.into_iter().collect()
    }
}

impl FromIterator<EntityId> for IdSet {
    fn from_iter<T: IntoIterator<Item = EntityId>>(iter: T) -> Self {
        Self(iter.into_iter().map(EntityId::normalized).collect())
    }
}

/// Storage callbacks invoked by `BoardRegistry`.
#[async_trait]
pub trait PersistenceProvider: Send + Sync {
    /// Fetch stored boards: only the given ids, or everything for `None`.
    async fn loading(&self, _ids: Option<&IdSet>) -> Result<Vec<Board>> {
        Ok(Vec::new())
    }

    /// Called after a board is created without override.
    ///
    /// Returning a board replaces the one just inserted, letting storage
    /// hand back its canonical form.
    async fn added(&self, _board: &Board) -> Result<Option<Board>> {
        Ok(None)
    }

    /// Called before a board is removed.
    async fn before_delete(&self, _registry: &BoardRegistry, _board: &Board) -> Result<()> {
        Ok(())
    }

    /// Called after a board is removed.
    async fn after_delete(&self, _board: &Board, _status: &DeletionStatus) -> Result<()> {
        Ok(())
    }

    /// Called by `unload`; save state here.
    ///
    /// Return `true` once the boards are saved. The registry is cleared only
    /// then, so the default leaves it untouched.
    async fn unloading(&self, _registry: &BoardRegistry) -> Result<bool> {
        Ok(false)
    }
}
