//! Outcome values for delete and flag operations.
//!
//! Both wrap a boolean, but they are separate types so a transport layer
//! always knows which operation produced the result.

use serde::Serialize;

use super::entity::EntityId;

/// Outcome of a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionStatus {
    deleted: bool,
    target: EntityId,
}

impl DeletionStatus {
    /// Record a deletion outcome for `target`.
    pub fn new(deleted: bool, target: EntityId) -> Self {
        Self { deleted, target }
    }

    /// Whether the item is deleted.
    pub fn succeeded(&self) -> bool {
        self.deleted
    }

    /// The id the delete was aimed at.
    pub fn target(&self) -> &EntityId {
        &self.target
    }

    /// Response label.
    pub fn label(&self) -> &'static str {
        if self.deleted {
            "success"
        } else {
            "no"
        }
    }
}

/// Outcome of a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagStatus {
    flagged: bool,
    target: EntityId,
}

impl FlagStatus {
    /// Record a flag outcome for `target`.
    pub fn new(flagged: bool, target: EntityId) -> Self {
        Self { flagged, target }
    }

    /// Whether the item is now flagged.
    pub fn succeeded(&self) -> bool {
        self.flagged
    }

    /// The id the flag was aimed at.
    pub fn target(&self) -> &EntityId {
        &self.target
    }

    /// Response label.
    pub fn label(&self) -> &'static str {
        if self.flagged {
            "reported"
        } else {
            "not reported"
        }
    }
}
