//! Read-only views for a transport layer.
//!
//! These shapes are what a response formatter serializes. Tombstones show a
//! fixed placeholder instead of their text, and credentials never appear.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::board::{Board, Content, DeletionStatus, EntityId, FlagStatus, Message, Thread};
use crate::config::BoardConfig;

/// Text shown in place of a deleted message.
pub const DELETED_PLACEHOLDER: &str = "[deleted]";

/// Number of trailing replies shown per thread in board listings.
pub const DEFAULT_PREVIEW_REPLIES: usize = 3;

/// A message as shown to readers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageView {
    /// Message id.
    pub id: EntityId,
    /// Message text, or the placeholder for tombstones.
    pub text: Option<String>,
    /// Creation time.
    pub created_on: Option<DateTime<Utc>>,
    /// Whether the message has been flagged.
    pub reported: bool,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        let text = if message.is_deleted() {
            Some(DELETED_PLACEHOLDER.to_string())
        } else {
            message.text().map(str::to_string)
        };
        Self {
            id: message.id().clone(),
            text,
            created_on: message.created_on(),
            reported: message.is_flagged(),
        }
    }
}

/// A thread with its replies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadView {
    /// Thread id.
    pub id: EntityId,
    /// Thread description.
    pub text: Option<String>,
    /// Creation time.
    pub created_on: Option<DateTime<Utc>>,
    /// Time of last activity.
    pub bumped_on: Option<DateTime<Utc>>,
    /// Whether the thread has been flagged.
    pub reported: bool,
    /// Replies in posting order.
    pub replies: Vec<MessageView>,
}

impl ThreadView {
    /// View a thread, keeping only the last `preview` replies if given.
    pub fn new(thread: &Thread, preview: Option<usize>) -> Self {
        let messages = thread.messages();
        let skip = preview.map_or(0, |n| messages.len().saturating_sub(n));
        Self {
            id: thread.id().clone(),
            text: thread.text().map(str::to_string),
            created_on: thread.created_on(),
            bumped_on: thread.bumped_on(),
            reported: thread.is_flagged(),
            replies: messages[skip..].iter().map(MessageView::from).collect(),
        }
    }
}

impl From<&Thread> for ThreadView {
    fn from(thread: &Thread) -> Self {
        Self::new(thread, None)
    }
}

/// A board listing: ranked threads with reply previews.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BoardView {
    /// Threads in ranking order.
    pub threads: Vec<ThreadView>,
}

impl BoardView {
    /// List the board by recency, `size` threads with `preview` replies each.
    ///
    /// A `size` of zero falls back to the default listing size.
    pub fn latest(board: &Board, size: i64, preview: usize) -> Self {
        let size = if size == 0 {
            crate::board::DEFAULT_RANK_SIZE
        } else {
            size
        };
        Self {
            threads: board
                .ranked(size)
                .into_iter()
                .map(|t| ThreadView::new(t, Some(preview)))
                .collect(),
        }
    }

    /// List the board using the configured page size and preview length.
    pub fn with_config(board: &Board, config: &BoardConfig) -> Self {
        Self::latest(board, config.page_size, config.preview_replies)
    }
}

/// A delete or flag outcome as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    /// Whether the operation took effect.
    pub result: bool,
    /// Human-readable label.
    pub message: &'static str,
}

impl From<&DeletionStatus> for StatusView {
    fn from(status: &DeletionStatus) -> Self {
        Self {
            result: status.succeeded(),
            message: status.label(),
        }
    }
}

impl From<&FlagStatus> for StatusView {
    fn from(status: &FlagStatus) -> Self {
        Self {
            result: status.succeeded(),
            message: status.label(),
        }
    }
}
