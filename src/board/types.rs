//! Board model for Corkboard.
//!
//! A board is an unordered set of threads. Threads are reached either by id
//! or through the recency ranking used for board listings.

use std::cmp::Reverse;

use tracing::{debug, info};

use super::entity::{Content, ContentKind, Entity, EntityBuilder, EntityId, EntityProperties};
use super::status::{DeletionStatus, FlagStatus};
use super::thread::{NewThread, Thread};
use crate::{CorkboardError, Result};

/// Number of threads returned by a listing when no size is given.
pub const DEFAULT_RANK_SIZE: i64 = 10;

/// Board entity representing a bulletin board.
#[derive(Debug, Clone)]
pub struct Board {
    entity: Entity,
    text: Option<String>,
    threads: Vec<Thread>,
}

impl Board {
    /// Build an empty board.
    pub fn new(new_board: NewBoard) -> Result<Self> {
        Ok(Self {
            entity: Entity::new(new_board.properties)?,
            text: new_board.text,
            threads: Vec::new(),
        })
    }

    /// Build an empty board from a bare id.
    pub fn from_id(id: impl Into<EntityId>) -> Result<Self> {
        Ok(Self {
            entity: Entity::from_id(id)?,
            text: None,
            threads: Vec::new(),
        })
    }

    /// Board description.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// All threads, in no particular order.
    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    /// Number of threads.
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    /// Whether the board has no threads.
    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Create a thread.
    ///
    /// An explicit id that is already taken fails; boards never replace
    /// an existing thread.
    pub fn create(&mut self, new_thread: NewThread) -> Result<&mut Thread> {
        if let Some(id) = &new_thread.properties.id {
            if self.position(id).is_some() {
                return Err(CorkboardError::AlreadyInUse(format!("thread {id}")));
            }
        }
        let thread = Thread::new(new_thread)?;
        Ok(self.push(thread))
    }

    /// Add an already built thread, e.g. one restored from storage.
    ///
    /// Unlike `create`, the id is always checked since it is never derived
    /// here.
    pub fn insert(&mut self, thread: Thread) -> Result<&mut Thread> {
        if self.position(thread.id()).is_some() {
            return Err(CorkboardError::AlreadyInUse(format!("thread {}", thread.id())));
        }
        Ok(self.push(thread))
    }

    fn push(&mut self, mut thread: Thread) -> &mut Thread {
        thread.entity_mut().materialize_created_on();
        debug!(board = %self.entity.id(), thread = %thread.id(), "thread created");

        self.threads.push(thread);
        let index = self.threads.len() - 1;
        &mut self.threads[index]
    }

    /// Look up a thread by id.
    pub fn find(&self, selector: impl Into<EntityId>) -> Result<&Thread> {
        let id = selector.into();
        match self.position(&id) {
            Some(index) => Ok(&self.threads[index]),
            None => Err(CorkboardError::not_found(ContentKind::Thread, id)),
        }
    }

    /// Look up a thread by id for posting into it.
    pub fn find_mut(&mut self, selector: impl Into<EntityId>) -> Result<&mut Thread> {
        let id = selector.into();
        match self.position(&id) {
            Some(index) => Ok(&mut self.threads[index]),
            None => Err(CorkboardError::not_found(ContentKind::Thread, id)),
        }
    }

    /// Threads ranked by last activity.
    ///
    /// A non-negative `size` returns the `size` most recently bumped
    /// threads, newest first. A negative `size` returns the `|size|` least
    /// recently bumped, oldest first.
    pub fn ranked(&self, size: i64) -> Vec<&Thread> {
        let count = usize::try_from(size.unsigned_abs()).unwrap_or(usize::MAX);
        let mut threads: Vec<&Thread> = self.threads.iter().collect();

        if size >= 0 {
            threads.sort_by_key(|t| Reverse(t.bumped_on()));
        } else {
            threads.sort_by_key(|t| t.bumped_on());
        }
        threads.truncate(count);
        threads
    }

    /// The default listing: the ten most recently bumped threads.
    pub fn latest(&self) -> Vec<&Thread> {
        self.ranked(DEFAULT_RANK_SIZE)
    }

    /// Delete a thread after checking its secret.
    pub fn delete(
        &mut self,
        selector: impl Into<EntityId>,
        secret: Option<&str>,
    ) -> Result<DeletionStatus> {
        let id = selector.into();
        let index = self
            .position(&id)
            .ok_or_else(|| CorkboardError::not_found(ContentKind::Thread, id.clone()))?;

        self.threads[index].entity().authorize(secret)?;
        let before = self.threads.len();
        self.threads.remove(index);
        let deleted = self.threads.len() < before;

        info!(board = %self.entity.id(), thread = %id, deleted, "thread deleted");
        Ok(DeletionStatus::new(deleted, id))
    }

    /// Flag a thread.
    pub fn flag(&mut self, selector: impl Into<EntityId>) -> Result<FlagStatus> {
        let id = selector.into();
        let thread = self.find_mut(id.clone())?;
        thread.entity_mut().mark_flagged();
        let flagged = thread.is_flagged();

        info!(board = %self.entity.id(), thread = %id, "thread flagged");
        Ok(FlagStatus::new(flagged, id))
    }

    fn position(&self, id: &EntityId) -> Option<usize> {
        self.threads.iter().position(|t| t.id().matches(id))
    }
}

impl Content for Board {
    const KIND: ContentKind = ContentKind::Board;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

/// Data for creating a new board.
#[derive(Debug, Clone, Default)]
pub struct NewBoard {
    /// Common properties.
    pub properties: EntityProperties,
    /// Board description.
    pub text: Option<String>,
}

impl NewBoard {
    /// Create a new board with the given id.
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self::default().with_id(id)
    }

    /// Set the description.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

impl EntityBuilder for NewBoard {
    fn properties_mut(&mut self) -> &mut EntityProperties {
        &mut self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credential;
    use crate::board::NewMessage;

    fn board_with_bumps(bumps: &[(i64, i64)]) -> Board {
        let mut board = Board::new(NewBoard::new("b")).unwrap();
        for (id, bumped) in bumps {
            board
                .create(NewThread::new().with_id(*id).with_created_on(*bumped))
                .unwrap();
        }
        board
    }

    fn ids(threads: &[&Thread]) -> Vec<EntityId> {
        threads.iter().map(|t| t.id().clone()).collect()
    }

    #[test]
    fn test_new_board() {
        let board = Board::new(NewBoard::new("news").with_text("Daily news")).unwrap();
        assert_eq!(board.id(), &EntityId::from("news"));
        assert_eq!(board.text(), Some("Daily news"));
        assert!(board.is_empty());
    }

    #[test]
    fn test_create_and_find() {
        let mut board = Board::new(NewBoard::new("b")).unwrap();
        board.create(NewThread::new().with_id(7)).unwrap();
        assert_eq!(board.find(7).unwrap().id(), &EntityId::Number(7));
        assert_eq!(board.find("7").unwrap().id(), &EntityId::Number(7));
        assert!(board.find(7).unwrap().created_on().is_some());
    }

    #[test]
    fn test_create_duplicate_never_overrides() {
        let mut board = Board::new(NewBoard::new("b")).unwrap();
        board
            .create(NewThread::new().with_id(7).with_text("original"))
            .unwrap();
        let result = board.create(NewThread::new().with_id(7).with_text("impostor"));
        assert!(matches!(result, Err(CorkboardError::AlreadyInUse(_))));
        assert_eq!(board.len(), 1);
        assert_eq!(board.find(7).unwrap().text(), Some("original"));
    }

    #[test]
    fn test_insert_checks_id() {
        let mut board = Board::new(NewBoard::new("b")).unwrap();
        board.insert(Thread::from_id(3).unwrap()).unwrap();
        assert!(board.find(3).unwrap().created_on().is_some());

        let result = board.insert(Thread::from_id("3").unwrap());
        assert!(matches!(result, Err(CorkboardError::AlreadyInUse(_))));
    }

    #[test]
    fn test_find_missing() {
        let board = Board::new(NewBoard::new("b")).unwrap();
        match board.find(1).unwrap_err() {
            CorkboardError::NotFound { kind, .. } => assert_eq!(kind, ContentKind::Thread),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_ranked_descending() {
        let board = board_with_bumps(&[(1, 10), (2, 30), (3, 20)]);
        assert_eq!(ids(&board.ranked(2)), vec![EntityId::Number(2), EntityId::Number(3)]);
    }

    #[test]
    fn test_ranked_ascending() {
        let board = board_with_bumps(&[(1, 10), (2, 30), (3, 20)]);
        assert_eq!(ids(&board.ranked(-2)), vec![EntityId::Number(1), EntityId::Number(3)]);
    }

    #[test]
    fn test_ranked_zero_and_oversize() {
        let board = board_with_bumps(&[(1, 10), (2, 30), (3, 20)]);
        assert!(board.ranked(0).is_empty());
        assert_eq!(board.ranked(100).len(), 3);
        assert_eq!(board.ranked(i64::MIN).len(), 3);
    }

    #[test]
    fn test_ranked_uses_bumps() {
        let mut board = board_with_bumps(&[(1, 10), (2, 30), (3, 20)]);
        board
            .find_mut(1)
            .unwrap()
            .create(NewMessage::new("bump").with_created_on(40))
            .unwrap();
        assert_eq!(ids(&board.latest())[0], EntityId::Number(1));
    }

    #[test]
    fn test_delete_thread() {
        let mut board = Board::new(NewBoard::new("b")).unwrap();
        board
            .create(
                NewThread::new()
                    .with_id(1)
                    .with_credential(Credential::new("pw", 4).unwrap()),
            )
            .unwrap();

        let result = board.delete(1, Some("wrong"));
        assert!(matches!(
            result,
            Err(CorkboardError::AuthenticationRequired(_))
        ));
        assert!(board.find(1).is_ok());

        let status = board.delete(1, Some("pw")).unwrap();
        assert!(status.succeeded());
        assert!(matches!(board.find(1), Err(CorkboardError::NotFound { .. })));
    }

    #[test]
    fn test_delete_missing_thread() {
        let mut board = Board::new(NewBoard::new("b")).unwrap();
        assert!(matches!(
            board.delete(1, None),
            Err(CorkboardError::NotFound { .. })
        ));
    }

    #[test]
    fn test_flag_thread() {
        let mut board = Board::new(NewBoard::new("b")).unwrap();
        board.create(NewThread::new().with_id(1)).unwrap();
        let status = board.flag(1).unwrap();
        assert!(status.succeeded());
        assert!(board.find(1).unwrap().is_flagged());
        assert!(matches!(board.flag(2), Err(CorkboardError::NotFound { .. })));
    }
}
