//! Board registry for Corkboard.
//!
//! This module keeps the top-level set of boards and drives the optional
//! persistence hooks around create, delete, load and unload.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use super::provider::{IdSet, PersistenceProvider};
use crate::board::{Board, Content, ContentKind, DeletionStatus, EntityId, NewBoard};
use crate::{CorkboardError, Result};

/// A registry shared between tasks.
///
/// The lock is held for a whole operation, so a create cannot interleave
/// with another create between its id check and its insert.
pub type SharedRegistry = Arc<Mutex<BoardRegistry>>;

/// The top-level set of boards.
#[derive(Default)]
pub struct BoardRegistry {
    boards: Vec<Board>,
    provider: Option<Arc<dyn PersistenceProvider>>,
}

impl BoardRegistry {
    /// Create an empty, purely in-memory registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry backed by `provider`.
    pub fn with_provider(provider: Arc<dyn PersistenceProvider>) -> Self {
        Self {
            boards: Vec::new(),
            provider: Some(provider),
        }
    }

    /// Replace the persistence provider; `None` detaches it.
    pub fn set_provider(&mut self, provider: Option<Arc<dyn PersistenceProvider>>) {
        self.provider = provider;
    }

    /// Whether a persistence provider is attached.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Wrap the registry for sharing between tasks.
    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(Mutex::new(self))
    }

    /// All boards, in no particular order.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Number of boards.
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Whether no boards are loaded.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Create a board.
    ///
    /// An explicit id that is already taken fails unless `override_existing`
    /// is set, in which case the old board is deleted first, hooks included.
    pub async fn create(
        &mut self,
        new_board: NewBoard,
        override_existing: bool,
    ) -> Result<&mut Board> {
        let explicit_id = new_board.properties.id.is_some();
        let board = Board::new(new_board)?;
        if explicit_id {
            self.make_room(board.id(), override_existing).await?;
        }
        self.push(board, override_existing).await
    }

    /// Add an already built board, e.g. one returned by storage.
    pub async fn insert(&mut self, board: Board, override_existing: bool) -> Result<&mut Board> {
        self.make_room(board.id(), override_existing).await?;
        self.push(board, override_existing).await
    }

    /// Look up a board by id.
    pub fn find(&self, selector: impl Into<EntityId>) -> Result<&Board> {
        let id = selector.into();
        match self.position(&id) {
            Some(index) => Ok(&self.boards[index]),
            None => Err(CorkboardError::not_found(ContentKind::Board, id)),
        }
    }

    /// Look up a board by id for changes to its threads.
    pub fn find_mut(&mut self, selector: impl Into<EntityId>) -> Result<&mut Board> {
        let id = selector.into();
        match self.position(&id) {
            Some(index) => Ok(&mut self.boards[index]),
            None => Err(CorkboardError::not_found(ContentKind::Board, id)),
        }
    }

    /// Look up the board named by `new_board`, creating it if missing.
    pub async fn find_or_create(&mut self, new_board: NewBoard) -> Result<&mut Board> {
        if let Some(id) = &new_board.properties.id {
            if let Some(index) = self.position(id) {
                return Ok(&mut self.boards[index]);
            }
        }
        self.create(new_board, false).await
    }

    /// Delete a board, running the provider's delete hooks around it.
    pub async fn delete(&mut self, selector: impl Into<EntityId>) -> Result<DeletionStatus> {
        let id = selector.into();
        let index = self
            .position(&id)
            .ok_or_else(|| CorkboardError::not_found(ContentKind::Board, id.clone()))?;

        let provider = self.provider.clone();
        if let Some(provider) = &provider {
            provider.before_delete(self, &self.boards[index]).await?;
        }

        let before = self.boards.len();
        let board = self.boards.remove(index);
        let status = DeletionStatus::new(self.boards.len() < before, id);
        info!(board = %board.id(), deleted = status.succeeded(), "board deleted");

        if let Some(provider) = &provider {
            provider.after_delete(&board, &status).await?;
        }
        Ok(status)
    }

    /// Load boards from the provider.
    ///
    /// With ids, the matching stored boards are merged in, replacing any
    /// loaded copies. Without ids, everything is loaded, but only if the
    /// registry is still empty. Returns how many boards the provider
    /// handed back.
    pub async fn load(&mut self, ids: Option<IdSet>) -> Result<usize> {
        let Some(provider) = self.provider.clone() else {
            debug!("no persistence provider; nothing to load");
            return Ok(0);
        };

        match ids {
            Some(ids) => {
                let boards = provider.loading(Some(&ids)).await?;
                let count = boards.len();
                for board in boards {
                    self.insert(board, true).await?;
                }
                info!(requested = ids.len(), loaded = count, "boards reloaded");
                Ok(count)
            }
            None => {
                if !self.boards.is_empty() {
                    debug!(boards = self.boards.len(), "boards already loaded");
                    return Ok(0);
                }
                let boards = provider.loading(None).await?;
                let count = boards.len();
                for mut board in boards {
                    board.entity_mut().materialize_created_on();
                    self.boards.push(board);
                }
                info!(loaded = count, "boards loaded");
                Ok(count)
            }
        }
    }

    /// Hand the registry to the provider for saving, then clear it.
    ///
    /// Boards are cleared only when the provider reports them saved.
    /// Otherwise nothing changes and `false` is returned.
    pub async fn unload(&mut self) -> Result<bool> {
        let Some(provider) = self.provider.clone() else {
            return Ok(false);
        };

        if !provider.unloading(self).await? {
            debug!("provider does not save on unload; boards kept");
            return Ok(false);
        }
        let count = self.boards.len();
        self.boards.clear();
        info!(unloaded = count, "boards unloaded");
        Ok(true)
    }

    async fn make_room(&mut self, id: &EntityId, override_existing: bool) -> Result<()> {
        if self.position(id).is_none() {
            return Ok(());
        }
        if !override_existing {
            return Err(CorkboardError::AlreadyInUse(format!("board {id}")));
        }
        self.delete(id).await?;
        Ok(())
    }

    async fn push(&mut self, mut board: Board, override_existing: bool) -> Result<&mut Board> {
        board.entity_mut().materialize_created_on();
        debug!(board = %board.id(), "board created");
        self.boards.push(board);
        let index = self.boards.len() - 1;

        if !override_existing {
            if let Some(provider) = self.provider.clone() {
                if let Some(mut canonical) = provider.added(&self.boards[index]).await? {
                    canonical.entity_mut().materialize_created_on();
                    self.boards[index] = canonical;
                }
            }
        }
        Ok(&mut self.boards[index])
    }

    fn position(&self, id: &EntityId) -> Option<usize> {
        self.boards.iter().position(|b| b.id().matches(id))
    }
}
