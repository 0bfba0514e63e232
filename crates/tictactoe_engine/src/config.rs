//! Engine configuration.
//!
//! The board size lives on a [`GameConfig`] value that callers pass around
//! explicitly; nothing about the game is stored in process-wide state.

use crate::error::ConfigError;
use crate::types::CELLS;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// What the AI does when asked to move while inference says the human is next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnMismatch {
    /// Simulate every human reply and answer the best resulting position.
    #[default]
    Simulate,
    /// Fail with `InvalidTurnOrder`.
    Reject,
}

/// Configuration shared by the rules and search engines.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of cells on the board. Only 9 is supported.
    #[serde(default = "default_size")]
    size: usize,

    /// Maximum number of positions kept in the transposition cache.
    #[serde(default = "default_cache_capacity")]
    cache_capacity: usize,

    /// Policy for AI moves requested out of turn.
    #[serde(default)]
    turn_mismatch: TurnMismatch,
}

fn default_size() -> usize {
    CELLS
}

// Above the 5,478 legal positions, so the cache never fills in practice.
fn default_cache_capacity() -> usize {
    8192
}

impl GameConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self {
            size: default_size(),
            cache_capacity: default_cache_capacity(),
            turn_mismatch: TurnMismatch::default(),
        }
    }

    /// Sets the board size. Checked by [`GameConfig::validate`].
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Sets the transposition cache capacity.
    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    /// Sets the out-of-turn policy.
    pub fn with_turn_mismatch(mut self, turn_mismatch: TurnMismatch) -> Self {
        self.turn_mismatch = turn_mismatch;
        self
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(
            size = config.size,
            cache_capacity = config.cache_capacity,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Checks that the configuration describes a playable 3x3 game.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let side = self.size.isqrt();
        if side * side != self.size {
            return Err(ConfigError::new(format!(
                "Board size {} is not a perfect square",
                self.size
            )));
        }
        if self.size != CELLS {
            return Err(ConfigError::new(format!(
                "Board size {} is not supported (only {})",
                self.size, CELLS
            )));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(*config.size(), 9);
        assert_eq!(*config.cache_capacity(), 8192);
        assert_eq!(*config.turn_mismatch(), TurnMismatch::Simulate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_other_sizes() {
        assert!(GameConfig::new().with_size(8).validate().is_err());
        assert!(GameConfig::new().with_size(16).validate().is_err());
        assert!(GameConfig::new().with_size(0).validate().is_err());
    }

    #[test]
    fn test_rejects_huge_sizes_without_overflow() {
        let err = GameConfig::new().with_size(usize::MAX).validate().unwrap_err();
        assert!(err.message.contains("not a perfect square"));
        // (2^32 - 1)^2 is a perfect square, so only the size check rejects it.
        let square = (u32::MAX as usize).pow(2);
        let err = GameConfig::new().with_size(square).validate().unwrap_err();
        assert!(err.message.contains("not supported"));
    }

    #[test]
    fn test_from_file_rejects_huge_size() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "size = {}", i64::MAX).unwrap();

        let err = GameConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("not a perfect square"));
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "turn_mismatch = \"reject\"").unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.size(), 9);
        assert_eq!(*config.turn_mismatch(), TurnMismatch::Reject);
    }

    #[test]
    fn test_from_file_rejects_bad_size() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "size = 16").unwrap();

        let err = GameConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("not supported"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = GameConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.message.starts_with("Failed to read config file"));
    }
}
