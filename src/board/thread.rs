//! Thread model for Corkboard.
//!
//! A thread keeps its messages in posting order. Deleted messages stay in
//! place as tombstones so positions never shift.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::entity::{Content, ContentKind, Entity, EntityBuilder, EntityId, EntityProperties};
use super::message::{Message, NewMessage};
use super::status::{DeletionStatus, FlagStatus};
use crate::{CorkboardError, Result};

/// Thread entity: an ordered conversation of messages.
#[derive(Debug, Clone)]
pub struct Thread {
    entity: Entity,
    text: Option<String>,
    messages: Vec<Message>,
}

impl Thread {
    /// Build an empty thread.
    pub fn new(new_thread: NewThread) -> Result<Self> {
        Ok(Self {
            entity: Entity::new(new_thread.properties)?,
            text: new_thread.text,
            messages: Vec::new(),
        })
    }

    /// Build an empty thread from a bare id.
    pub fn from_id(id: impl Into<EntityId>) -> Result<Self> {
        Ok(Self {
            entity: Entity::from_id(id)?,
            text: None,
            messages: Vec::new(),
        })
    }

    /// Thread description.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Messages in posting order, tombstones included.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages, tombstones included.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the thread has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Time of the latest message, or the thread's own creation time.
    pub fn bumped_on(&self) -> Option<DateTime<Utc>> {
        self.messages
            .last()
            .and_then(|m| m.created_on())
            .or_else(|| self.created_on())
    }

    /// Append a new message and return it.
    ///
    /// An explicit id already used in this thread is rejected.
    pub fn create(&mut self, new_message: NewMessage) -> Result<&Message> {
        if let Some(id) = &new_message.properties.id {
            if self.position(id).is_some() {
                return Err(CorkboardError::AlreadyInUse(format!("message {id}")));
            }
        }

        let mut message = Message::new(new_message)?;
        message.entity_mut().materialize_created_on();
        debug!(thread = %self.id(), message = %message.id(), "message created");

        self.messages.push(message);
        let index = self.messages.len() - 1;
        Ok(&self.messages[index])
    }

    /// Look up a message by id.
    pub fn find(&self, selector: impl Into<EntityId>) -> Result<&Message> {
        let id = selector.into();
        match self.position(&id) {
            Some(index) => Ok(&self.messages[index]),
            None => Err(CorkboardError::not_found(ContentKind::Message, id)),
        }
    }

    /// Delete a message, leaving a tombstone in its place.
    ///
    /// The secret is checked before anything changes. Deleting a tombstone
    /// again succeeds without touching it.
    pub fn delete(
        &mut self,
        selector: impl Into<EntityId>,
        secret: Option<&str>,
    ) -> Result<DeletionStatus> {
        let id = selector.into();
        let index = self
            .position(&id)
            .ok_or_else(|| CorkboardError::not_found(ContentKind::Message, id.clone()))?;

        let message = &mut self.messages[index];
        message.entity().authorize(secret)?;

        if message.tombstone() {
            info!(thread = %self.entity.id(), message = %id, "message deleted");
        } else {
            debug!(thread = %self.entity.id(), message = %id, "message already deleted");
        }
        Ok(DeletionStatus::new(true, id))
    }

    /// Flag a message.
    pub fn flag(&mut self, selector: impl Into<EntityId>) -> Result<FlagStatus> {
        let id = selector.into();
        let index = self
            .position(&id)
            .ok_or_else(|| CorkboardError::not_found(ContentKind::Message, id.clone()))?;

        let message = &mut self.messages[index];
        message.entity_mut().mark_flagged();
        info!(thread = %self.entity.id(), message = %id, "message flagged");
        Ok(FlagStatus::new(message.is_flagged(), id))
    }

    fn position(&self, id: &EntityId) -> Option<usize> {
        self.messages.iter().position(|m| m.id().matches(id))
    }
}

impl Content for Thread {
    const KIND: ContentKind = ContentKind::Thread;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

/// Data for creating a new thread.
#[derive(Debug, Clone, Default)]
pub struct NewThread {
    /// Common properties.
    pub properties: EntityProperties,
    /// Thread description.
    pub text: Option<String>,
}

impl NewThread {
    /// Create a new thread with no description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the description.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

impl EntityBuilder for NewThread {
    fn properties_mut(&mut self) -> &mut EntityProperties {
        &mut self.properties
    }
}
