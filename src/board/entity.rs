//! Shared identity and state for boards, threads and messages.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::Credential;
use crate::datetime::{parse_timestamp, to_epoch_millis, TimestampInput};
use crate::{CorkboardError, Result};

/// Identifier of a content item: an integer or a non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    /// Numeric id, usually a creation timestamp in epoch milliseconds.
    Number(i64),
    /// Caller-chosen string id.
    Text(String),
}

impl EntityId {
    /// Compare two ids, coercing a numeric string to a number.
    ///
    /// `Number(42)` matches `Text("42")`.
    pub fn matches(&self, other: &EntityId) -> bool {
        match (self, other) {
            (EntityId::Number(a), EntityId::Number(b)) => a == b,
            (EntityId::Text(a), EntityId::Text(b)) => a == b,
            (EntityId::Number(n), EntityId::Text(t)) | (EntityId::Text(t), EntityId::Number(n)) => {
                t.trim().parse::<i64>().is_ok_and(|v| v == *n)
            }
        }
    }

    /// Convert a numeric-looking text id to a number.
    ///
    /// Two ids that `matches` considers equal normalize to the same value.
    pub fn normalized(self) -> EntityId {
        match self {
            EntityId::Text(t) => match t.trim().parse::<i64>() {
                Ok(n) => EntityId::Number(n),
                Err(_) => EntityId::Text(t),
            },
            number => number,
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            EntityId::Text(t) if t.is_empty() => Err(CorkboardError::NullArgument(
                "id must not be empty".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{n}"),
            EntityId::Text(t) => write!(f, "{t}"),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Number(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId::Text(s)
    }
}

impl From<&EntityId> for EntityId {
    fn from(id: &EntityId) -> Self {
        id.clone()
    }
}

/// Which level of the hierarchy an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// A board.
    Board,
    /// A thread within a board.
    Thread,
    /// A message within a thread.
    Message,
}

impl ContentKind {
    /// Lowercase name used in errors and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Board => "board",
            ContentKind::Thread => "thread",
            ContentKind::Message => "message",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Properties common to every new content item.
#[derive(Debug, Clone, Default)]
pub struct EntityProperties {
    /// Explicit id; defaults to the creation time in epoch milliseconds.
    pub id: Option<EntityId>,
    /// Explicit creation time.
    pub created_on: Option<TimestampInput>,
    /// Initial flagged state.
    pub flagged: bool,
    /// Secret gating deletion.
    pub credential: Option<Credential>,
}

/// Builder methods shared by `NewMessage`, `NewThread` and `NewBoard`.
pub trait EntityBuilder: Sized {
    /// Access the common properties.
    fn properties_mut(&mut self) -> &mut EntityProperties;

    /// Set an explicit id.
    fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        self.properties_mut().id = Some(id.into());
        self
    }

    /// Set an explicit creation time.
    fn with_created_on(mut self, created_on: impl Into<TimestampInput>) -> Self {
        self.properties_mut().created_on = Some(created_on.into());
        self
    }

    /// Set the credential gating deletion.
    fn with_credential(mut self, credential: Credential) -> Self {
        self.properties_mut().credential = Some(credential);
        self
    }

    /// Start out flagged.
    fn flagged(mut self) -> Self {
        self.properties_mut().flagged = true;
        self
    }
}

/// Identity, timestamp, flag and credential of a content item.
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    created_on: Option<DateTime<Utc>>,
    flagged: bool,
    credential: Option<Credential>,
}

impl Entity {
    /// Build an entity from its properties.
    ///
    /// Without an explicit id, the creation time is materialized and its
    /// epoch milliseconds become the id.
    pub fn new(properties: EntityProperties) -> Result<Self> {
        let created_on = properties.created_on.map(parse_timestamp).transpose()?;

        let mut entity = Self {
            id: EntityId::Number(0),
            created_on,
            flagged: properties.flagged,
            credential: properties.credential,
        };

        entity.id = match properties.id {
            Some(id) => {
                id.validate()?;
                id
            }
            None => EntityId::Number(to_epoch_millis(&entity.materialize_created_on())),
        };

        Ok(entity)
    }

    /// Build an entity from a bare id, leaving the timestamp unset.
    pub fn from_id(id: impl Into<EntityId>) -> Result<Self> {
        let id = id.into();
        id.validate()?;
        Ok(Self {
            id,
            created_on: None,
            flagged: false,
            credential: None,
        })
    }

    /// The id.
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// The creation time, if materialized.
    pub fn created_on(&self) -> Option<DateTime<Utc>> {
        self.created_on
    }

    /// The creation time, set to now on first call and kept afterwards.
    pub fn materialize_created_on(&mut self) -> DateTime<Utc> {
        *self.created_on.get_or_insert_with(Utc::now)
    }

    /// Replace the creation time.
    pub fn set_created_on(&mut self, created_on: impl Into<TimestampInput>) -> Result<()> {
        self.created_on = Some(parse_timestamp(created_on.into())?);
        Ok(())
    }

    /// Whether the item has been flagged.
    pub fn flagged(&self) -> bool {
        self.flagged
    }

    /// Flag the item. There is no way back.
    pub fn mark_flagged(&mut self) {
        self.flagged = true;
    }

    /// The credential, if any.
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Mutable access to the credential, e.g. to materialize its hash.
    pub fn credential_mut(&mut self) -> Option<&mut Credential> {
        self.credential.as_mut()
    }

    /// Replace the credential; `None` clears it.
    pub fn set_credential(&mut self, credential: Option<Credential>) {
        self.credential = credential;
    }

    /// Check `secret` against the credential. Items without one pass.
    pub fn authorize(&self, secret: Option<&str>) -> Result<()> {
        match &self.credential {
            Some(credential) => credential.authorize(secret),
            None => Ok(()),
        }
    }

    /// Whether both entities share the same id.
    pub fn is_same(&self, other: &Entity) -> bool {
        std::ptr::eq(self, other) || self.id.matches(&other.id)
    }
}

/// Accessors shared by messages, threads and boards.
pub trait Content {
    /// Hierarchy level of the implementing type.
    const KIND: ContentKind;

    /// The shared entity state.
    fn entity(&self) -> &Entity;

    /// Mutable shared entity state.
    fn entity_mut(&mut self) -> &mut Entity;

    /// The id.
    fn id(&self) -> &EntityId {
        self.entity().id()
    }

    /// The creation time, if materialized.
    fn created_on(&self) -> Option<DateTime<Utc>> {
        self.entity().created_on()
    }

    /// Whether the item has been flagged.
    fn is_flagged(&self) -> bool {
        self.entity().flagged()
    }

    /// Whether both items share the same id.
    fn is_same(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.entity().is_same(other.entity())
    }
}
