//! Message model for Corkboard.
//!
//! A message is the leaf of the hierarchy. Deleting it leaves a tombstone
//! in the same slot: identity and timestamp stay, the text goes.

use super::entity::{Content, ContentKind, Entity, EntityBuilder, EntityId, EntityProperties};
use crate::Result;

/// Body of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    /// A live message and its text.
    Live {
        /// Message text, if any was posted.
        text: Option<String>,
    },
    /// A deleted message.
    Deleted,
}

/// A message, live or tombstoned.
#[derive(Debug, Clone)]
pub struct Message {
    entity: Entity,
    body: MessageBody,
}

impl Message {
    /// Build a live message.
    pub fn new(new_message: NewMessage) -> Result<Self> {
        Ok(Self {
            entity: Entity::new(new_message.properties)?,
            body: MessageBody::Live {
                text: new_message.text,
            },
        })
    }

    /// Build an empty live message from a bare id.
    pub fn from_id(id: impl Into<EntityId>) -> Result<Self> {
        Ok(Self {
            entity: Entity::from_id(id)?,
            body: MessageBody::Live { text: None },
        })
    }

    /// The text, unless the message has been deleted.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            MessageBody::Live { text } => text.as_deref(),
            MessageBody::Deleted => None,
        }
    }

    /// The body.
    pub fn body(&self) -> &MessageBody {
        &self.body
    }

    /// Whether this is a tombstone.
    pub fn is_deleted(&self) -> bool {
        matches!(self.body, MessageBody::Deleted)
    }

    /// Turn the message into a tombstone.
    ///
    /// Returns false if it already was one.
    pub(crate) fn tombstone(&mut self) -> bool {
        if self.is_deleted() {
            return false;
        }
        self.body = MessageBody::Deleted;
        true
    }
}

impl Content for Message {
    const KIND: ContentKind = ContentKind::Message;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

/// Data for creating a new message.
#[derive(Debug, Clone, Default)]
pub struct NewMessage {
    /// Common properties.
    pub properties: EntityProperties,
    /// Message text.
    pub text: Option<String>,
}

impl NewMessage {
    /// Create a new message with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            properties: EntityProperties::default(),
            text: Some(text.into()),
        }
    }
}

impl EntityBuilder for NewMessage {
    fn properties_mut(&mut self) -> &mut EntityProperties {
        &mut self.properties
    }
}
