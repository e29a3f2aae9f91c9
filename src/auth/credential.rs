//! Per-item credentials for Corkboard.
//!
//! A credential gates destructive operations on a board, thread or message.
//! It holds either the raw secret chosen by the poster or a bcrypt hash of
//! it, so stored items can round-trip their credential without re-hashing.

use std::fmt;

use tracing::{debug, warn};

use crate::{CorkboardError, Result};

/// Default bcrypt cost factor.
pub const DEFAULT_HASH_COST: u32 = 11;

/// Length of a bcrypt hash string (`$2b$11$` + 53 characters).
const BCRYPT_HASH_LENGTH: usize = 60;

/// Length of the salt prefix (`$2b$11$` + 22 characters).
const BCRYPT_SALT_LENGTH: usize = 29;

/// Check whether a string looks like a bcrypt hash.
///
/// Matches `^\$2[aby]\$\d{2}\$[./A-Za-z0-9]{53}$`.
pub fn is_bcrypt_hash(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != BCRYPT_HASH_LENGTH {
        return false;
    }
    bytes[0] == b'$'
        && bytes[1] == b'2'
        && matches!(bytes[2], b'a' | b'b' | b'y')
        && bytes[3] == b'$'
        && bytes[4].is_ascii_digit()
        && bytes[5].is_ascii_digit()
        && bytes[6] == b'$'
        && bytes[7..]
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || *b == b'.' || *b == b'/')
}

/// A secret proof gating deletion of a content item.
#[derive(Clone)]
pub struct Credential {
    /// The raw secret, while still cached.
    plaintext: Option<String>,
    /// The bcrypt hash, once materialized.
    hash: Option<String>,
    /// Cost factor used when hashing the plaintext.
    cost: u32,
}

impl Credential {
    /// Create a credential from a raw secret or an existing bcrypt hash.
    ///
    /// Input matching the bcrypt hash pattern is stored as the hash;
    /// anything else is kept as the plaintext secret.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard::Credential;
    ///
    /// let credential = Credential::new("hunter2", 4).unwrap();
    /// assert!(credential.test("hunter2"));
    /// assert!(credential.hash().is_none());
    /// ```
    pub fn new(secret_or_hash: impl Into<String>, cost: u32) -> Result<Self> {
        let value = secret_or_hash.into();
        if value.is_empty() {
            return Err(CorkboardError::NullArgument(
                "credential secret must not be empty".to_string(),
            ));
        }

        if is_bcrypt_hash(&value) {
            Ok(Self {
                plaintext: None,
                hash: Some(value),
                cost,
            })
        } else {
            Ok(Self {
                plaintext: Some(value),
                hash: None,
                cost,
            })
        }
    }

    /// Create a credential with the default cost factor.
    pub fn with_default_cost(secret_or_hash: impl Into<String>) -> Result<Self> {
        Self::new(secret_or_hash, DEFAULT_HASH_COST)
    }

    /// The hash, if it has been computed or was supplied.
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Compute the hash if needed and return it.
    ///
    /// The hash is computed at most once; later calls return the same value.
    pub fn materialize_hash(&mut self) -> Result<&str> {
        if self.hash.is_none() {
            let plaintext = self.plaintext.as_deref().ok_or_else(|| {
                CorkboardError::InvalidOperation("no secret available to hash".to_string())
            })?;
            let hash = bcrypt::hash(plaintext, self.cost)?;
            debug!(cost = self.cost, "credential hash materialized");
            self.hash = Some(hash);
        }
        Ok(self.hash.as_deref().unwrap_or_default())
    }

    /// Whether the raw secret is still held in memory.
    pub fn has_plaintext(&self) -> bool {
        self.plaintext.is_some()
    }

    /// Cost factor recorded in the hash, if one exists.
    pub fn cost(&self) -> Option<u32> {
        self.hash.as_deref().and_then(|h| h.get(4..6)?.parse().ok())
    }

    /// Salt prefix of the hash, if one exists.
    pub fn salt(&self) -> Option<&str> {
        self.hash.as_deref().and_then(|h| h.get(..BCRYPT_SALT_LENGTH))
    }

    /// Test whether `value` matches this credential.
    ///
    /// Uses the cached plaintext when available, otherwise verifies against
    /// the hash. Never fails; a malformed hash simply does not match.
    pub fn test(&self, value: &str) -> bool {
        if let Some(plaintext) = &self.plaintext {
            return plaintext == value;
        }
        match &self.hash {
            Some(hash) => bcrypt::verify(value, hash).unwrap_or(false),
            None => false,
        }
    }

    /// Require `value` to match this credential.
    ///
    /// A missing or empty value is a validation error; a mismatch is an
    /// authentication failure.
    pub fn authorize(&self, value: Option<&str>) -> Result<()> {
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ => {
                return Err(CorkboardError::Validation(
                    "a secret is required".to_string(),
                ))
            }
        };

        if self.test(value) {
            Ok(())
        } else {
            warn!("credential rejected");
            Err(CorkboardError::AuthenticationRequired(
                "incorrect password".to_string(),
            ))
        }
    }

    /// Drop the cached plaintext, leaving only the hash.
    ///
    /// Fails if the hash has not been materialized, since the plaintext
    /// would otherwise be the only copy of the secret.
    pub fn obfuscate(&mut self) -> Result<()> {
        if self.hash.is_none() {
            return Err(CorkboardError::InvalidOperation(
                "cannot discard the secret before its hash is generated".to_string(),
            ));
        }
        self.plaintext = None;
        Ok(())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("plaintext", &self.plaintext.as_ref().map(|_| "<redacted>"))
            .field("hash", &self.hash)
            .field("cost", &self.cost)
            .finish()
    }
}
