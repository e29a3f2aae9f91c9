//! Authentication module for Corkboard.
//!
//! Content items are not owned by accounts. Each one may carry a
//! credential, and whoever knows its secret may delete it.

mod credential;

pub use credential::{is_bcrypt_hash, Credential, DEFAULT_HASH_COST};
