//! Error types for Corkboard.

use thiserror::Error;

use crate::board::{ContentKind, EntityId};

/// Common error type for Corkboard.
#[derive(Error, Debug)]
pub enum CorkboardError {
    /// A board, thread or message lookup found nothing.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What was being looked up.
        kind: ContentKind,
        /// The id searched for.
        id: EntityId,
    },

    /// An explicit id collided with an existing item on create.
    #[error("{0} already in use")]
    AlreadyInUse(String),

    /// A secret did not match the item's credential.
    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    /// Validation error for malformed input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Required construction input was missing or empty.
    #[error("missing argument: {0}")]
    NullArgument(String),

    /// The operation is not allowed in the current state.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Hash computation failed.
    #[error("hashing error: {0}")]
    Hashing(String),

    /// A persistence hook failed.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CorkboardError {
    /// Build a not-found error for the given kind and id.
    pub fn not_found(kind: ContentKind, id: impl Into<EntityId>) -> Self {
        CorkboardError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// HTTP status code a transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            CorkboardError::NotFound { .. } => 404,
            CorkboardError::AlreadyInUse(_) => 409,
            CorkboardError::AuthenticationRequired(_) => 401,
            CorkboardError::Validation(_) | CorkboardError::NullArgument(_) => 400,
            CorkboardError::InvalidOperation(_)
            | CorkboardError::Hashing(_)
            | CorkboardError::Persistence(_)
            | CorkboardError::Io(_)
            | CorkboardError::Config(_) => 500,
        }
    }
}

impl From<bcrypt::BcryptError> for CorkboardError {
    fn from(e: bcrypt::BcryptError) -> Self {
        CorkboardError::Hashing(e.to_string())
    }
}

/// Result type alias for Corkboard operations.
pub type Result<T> = std::result::Result<T, CorkboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = CorkboardError::not_found(ContentKind::Thread, 42);
        assert_eq!(err.to_string(), "thread not found: 42");

        let err = CorkboardError::not_found(ContentKind::Board, "news");
        assert_eq!(err.to_string(), "board not found: news");
    }

    #[test]
    fn test_auth_error_display() {
        let err = CorkboardError::AuthenticationRequired("incorrect password".to_string());
        assert_eq!(
            err.to_string(),
            "authentication required: incorrect password"
        );
    }

    #[test]
    fn test_already_in_use_display() {
        let err = CorkboardError::AlreadyInUse("board".to_string());
        assert_eq!(err.to_string(), "board already in use");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CorkboardError::not_found(ContentKind::Message, 1).status_code(),
            404
        );
        assert_eq!(
            CorkboardError::AlreadyInUse("thread".into()).status_code(),
            409
        );
        assert_eq!(
            CorkboardError::AuthenticationRequired("x".into()).status_code(),
            401
        );
        assert_eq!(CorkboardError::Validation("x".into()).status_code(), 400);
        assert_eq!(CorkboardError::NullArgument("x".into()).status_code(), 400);
        assert_eq!(
            CorkboardError::InvalidOperation("x".into()).status_code(),
            500
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CorkboardError = io_err.into();
        assert!(matches!(err, CorkboardError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_bcrypt_error_conversion() {
        let err: CorkboardError = bcrypt::BcryptError::CostNotAllowed(99).into();
        assert!(matches!(err, CorkboardError::Hashing(_)));
    }
}
