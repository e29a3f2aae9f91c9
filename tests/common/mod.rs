//! Test helpers for registry integration tests.
//!
//! Provides an in-memory `PersistenceProvider` that records every hook call.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;

use corkboard::board::{Content, DeletionStatus, EntityBuilder};
use corkboard::{Board, BoardRegistry, IdSet, NewBoard, PersistenceProvider, Result};

/// Cost used for credentials in tests; keeps bcrypt fast.
pub const TEST_COST: u32 = 4;

/// A hook call seen by `MemoryProvider`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookCall {
    Loading(Option<usize>),
    Added(String),
    BeforeDelete(String),
    AfterDelete(String, bool),
    Unloading(usize),
}

/// Provider keeping "stored" boards in memory.
#[derive(Default)]
pub struct MemoryProvider {
    stored: Mutex<Vec<Board>>,
    calls: Mutex<Vec<HookCall>>,
    canonical_text: Option<String>,
}

impl MemoryProvider {
    /// Create a provider with nothing stored.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with `boards` already stored.
    pub fn with_stored(boards: Vec<Board>) -> Self {
        Self {
            stored: Mutex::new(boards),
            ..Self::default()
        }
    }

    /// Make `added` hand back a board with `text` as its description.
    pub fn canonicalizing(mut self, text: &str) -> Self {
        self.canonical_text = Some(text.to_string());
        self
    }

    /// Hook calls so far, in order.
    pub fn calls(&self) -> Vec<HookCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Boards currently stored.
    pub fn stored(&self) -> Vec<Board> {
        self.stored.lock().unwrap().clone()
    }

    fn record(&self, call: HookCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PersistenceProvider for MemoryProvider {
    async fn loading(&self, ids: Option<&IdSet>) -> Result<Vec<Board>> {
        self.record(HookCall::Loading(ids.map(IdSet::len)));
        let stored = self.stored.lock().unwrap();
        Ok(stored
            .iter()
            .filter(|b| ids.map_or(true, |ids| ids.contains(b.id())))
            .cloned()
            .collect())
    }

    async fn added(&self, board: &Board) -> Result<Option<Board>> {
        self.record(HookCall::Added(board.id().to_string()));
        match &self.canonical_text {
            Some(text) => {
                let canonical = Board::new(
                    NewBoard::new(board.id().clone())
                        .with_text(text.clone())
                        .with_created_on(0),
                )?;
                Ok(Some(canonical))
            }
            None => Ok(None),
        }
    }

    async fn before_delete(&self, registry: &BoardRegistry, board: &Board) -> Result<()> {
        assert!(registry.find(board.id().clone()).is_ok());
        self.record(HookCall::BeforeDelete(board.id().to_string()));
        Ok(())
    }

    async fn after_delete(&self, board: &Board, status: &DeletionStatus) -> Result<()> {
        self.record(HookCall::AfterDelete(
            board.id().to_string(),
            status.succeeded(),
        ));
        Ok(())
    }

    async fn unloading(&self, registry: &BoardRegistry) -> Result<bool> {
        self.record(HookCall::Unloading(registry.len()));
        *self.stored.lock().unwrap() = registry.boards().to_vec();
        Ok(true)
    }
}

/// Build a stored board with the given id and description.
pub fn stored_board(id: &str, text: &str) -> Board {
    Board::new(NewBoard::new(id).with_text(text).with_created_on(1_000)).unwrap()
}
