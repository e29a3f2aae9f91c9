//! Configuration module for Corkboard.

use serde::Deserialize;
use std::path::Path;

use crate::auth::{Credential, DEFAULT_HASH_COST};
use crate::board::DEFAULT_RANK_SIZE;
use crate::view::DEFAULT_PREVIEW_REPLIES;
use crate::{CorkboardError, Result};

/// Environment variable overriding the credential hash cost.
pub const HASH_COST_ENV: &str = "CORKBOARD_SECURITY_STRENGTH";

/// Security configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// bcrypt cost factor for new credentials.
    #[serde(default = "default_hash_cost")]
    pub hash_cost: u32,
}

fn default_hash_cost() -> u32 {
    DEFAULT_HASH_COST
}

impl SecurityConfig {
    /// Build a credential hashed with the configured cost.
    pub fn credential(&self, secret_or_hash: impl Into<String>) -> Result<Credential> {
        Credential::new(secret_or_hash, self.hash_cost)
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            hash_cost: default_hash_cost(),
        }
    }
}

/// Board listing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Threads per listing; negative lists the oldest first.
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    /// Trailing replies shown per thread in listings.
    #[serde(default = "default_preview_replies")]
    pub preview_replies: usize,
}

fn default_page_size() -> i64 {
    DEFAULT_RANK_SIZE
}

fn default_preview_replies() -> usize {
    DEFAULT_PREVIEW_REPLIES
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            preview_replies: default_preview_replies(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file, written alongside stdout.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Security configuration.
    #[serde(default)]
    pub security: SecurityConfig,
    /// Board listing configuration.
    #[serde(default)]
    pub board: BoardConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(CorkboardError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable
    /// overrides, falling back to defaults when the file cannot be read or
    /// parsed.
    ///
    /// Environment overrides apply either way. The load error, if any, is
    /// returned alongside so the caller can report it.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<(Self, Option<CorkboardError>)> {
        let (mut config, load_error) = match Self::load(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        };
        config.apply_env_overrides()?;
        Ok((config, load_error))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| CorkboardError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CORKBOARD_SECURITY_STRENGTH`: bcrypt cost for new credentials
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(cost) = std::env::var(HASH_COST_ENV) {
            let cost = cost.trim();
            if !cost.is_empty() {
                self.security.hash_cost = cost.parse().map_err(|_| {
                    CorkboardError::Config(format!("{HASH_COST_ENV} must be an integer: {cost:?}"))
                })?;
            }
        }
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The hash cost is outside bcrypt's 4..=31 range
    /// - The listing page size is zero
    pub fn validate(&self) -> Result<()> {
        if !(4..=31).contains(&self.security.hash_cost) {
            return Err(CorkboardError::Config(format!(
                "hash_cost must be between 4 and 31, got {}",
                self.security.hash_cost
            )));
        }
        if self.board.page_size == 0 {
            return Err(CorkboardError::Config(
                "page_size must not be zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.security.hash_cost, 11);
        assert_eq!(config.board.page_size, 10);
        assert_eq!(config.board.preview_replies, 3);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[security]
hash_cost = 12

[board]
page_size = -5
preview_replies = 1

[logging]
level = "debug"
file = "logs/corkboard.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.security.hash_cost, 12);
        assert_eq!(config.board.page_size, -5);
        assert_eq!(config.board.preview_replies, 1);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file.as_deref(), Some("logs/corkboard.log"));
    }

    #[test]
    fn test_parse_partial_config() {
        let config = Config::parse("[board]\npage_size = 20\n").unwrap();

        assert_eq!(config.board.page_size, 20);
        assert_eq!(config.board.preview_replies, 3);
        assert_eq!(config.security.hash_cost, 11);
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(CorkboardError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[security]\nhash_cost = 5").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.security.hash_cost, 5);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");

        assert!(result.is_err());
        assert!(matches!(result, Err(CorkboardError::Io(_))));
    }

    #[test]
    fn test_apply_env_overrides_hash_cost() {
        let original = std::env::var(HASH_COST_ENV).ok();

        std::env::set_var(HASH_COST_ENV, "6");
        let mut config = Config::default();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.security.hash_cost, 6);

        std::env::set_var(HASH_COST_ENV, "");
        let mut config = Config::default();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.security.hash_cost, 11);

        std::env::set_var(HASH_COST_ENV, "lots");
        let mut config = Config::default();
        assert!(matches!(
            config.apply_env_overrides(),
            Err(CorkboardError::Config(_))
        ));
        assert!(Config::load_or_default("nonexistent.toml").is_err());

        // Overrides still apply when the file is missing.
        std::env::set_var(HASH_COST_ENV, "5");
        let (config, load_error) = Config::load_or_default("nonexistent.toml").unwrap();
        assert_eq!(config.security.hash_cost, 5);
        assert!(matches!(load_error, Some(CorkboardError::Io(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[board]\npage_size = 7").unwrap();
        let (config, load_error) = Config::load_or_default(file.path()).unwrap();
        assert_eq!(config.security.hash_cost, 5);
        assert_eq!(config.board.page_size, 7);
        assert!(load_error.is_none());

        if let Some(val) = original {
            std::env::set_var(HASH_COST_ENV, val);
        } else {
            std::env::remove_var(HASH_COST_ENV);
        }
    }

    #[test]
    fn test_validate_hash_cost_range() {
        let mut config = Config::default();
        config.security.hash_cost = 3;
        assert!(config.validate().is_err());

        config.security.hash_cost = 32;
        assert!(config.validate().is_err());

        config.security.hash_cost = 4;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_security_credential_factory() {
        let security = SecurityConfig { hash_cost: 4 };
        let mut credential = security.credential("pw").unwrap();
        credential.materialize_hash().unwrap();
        assert_eq!(credential.cost(), Some(4));
    }

    #[test]
    fn test_validate_page_size() {
        let mut config = Config::default();
        config.board.page_size = 0;
        assert!(config.validate().is_err());
    }
}
