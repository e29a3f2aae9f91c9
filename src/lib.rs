//! Corkboard - in-memory store for anonymous message boards
//!
//! Boards hold threads, threads hold messages, and any item can be flagged,
//! or deleted by whoever knows its secret. A storage layer can plug into the
//! board registry through `PersistenceProvider`.

pub mod auth;
pub mod board;
pub mod config;
pub mod datetime;
pub mod error;
pub mod logging;
pub mod registry;
pub mod view;

pub use auth::{Credential, DEFAULT_HASH_COST};
pub use board::{
    Board, Content, ContentKind, DeletionStatus, EntityBuilder, EntityId, FlagStatus, Message,
    NewBoard, NewMessage, NewThread, Thread,
};
pub use config::Config;
pub use datetime::TimestampInput;
pub use error::{CorkboardError, Result};
pub use registry::{BoardRegistry, IdSet, PersistenceProvider, SharedRegistry};
