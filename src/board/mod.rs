//! Board module for Corkboard.
//!
//! This module provides the content hierarchy:
//! - Boards holding an unordered set of threads
//! - Threads holding messages in posting order
//! - Messages and their tombstones
//! - Status values returned by delete and flag

mod entity;
mod message;
mod status;
mod thread;
mod types;

pub use entity::{Content, ContentKind, Entity, EntityBuilder, EntityId, EntityProperties};
pub use message::{Message, MessageBody, NewMessage};
pub use status::{DeletionStatus, FlagStatus};
pub use thread::{NewThread, Thread};
pub use types::{Board, NewBoard, DEFAULT_RANK_SIZE};
