//! Game constants and runtime configuration.

use crate::error::GameError;

/// Number of faces on every die
pub const FACES_COUNT: usize = 6;

/// Minimum number of dice a game needs
pub const MIN_DICE_COUNT: usize = 3;

/// Range used to decide who moves first
pub const FIRST_PLAYER_MIN_VALUE: i32 = 0;
pub const FIRST_PLAYER_MAX_VALUE: i32 = 1;

/// Range of face indices for a fair roll
pub const DICE_ROLL_MIN_VALUE: i32 = 0;
pub const DICE_ROLL_MAX_VALUE: i32 = FACES_COUNT as i32 - 1;

/// Default HMAC key length in bytes (matches the SHA-256 output size)
pub const DEFAULT_KEY_BYTES: usize = 32;

/// Environment variable overriding the HMAC key length
pub const KEY_BYTES_ENV: &str = "FAIR_DICE_KEY_BYTES";

/// Runtime configuration for a game session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Length of the per-round HMAC key
    pub key_bytes: usize,
}

impl GameConfig {
    /// Build a config with an explicit key length
    pub fn with_key_bytes(key_bytes: usize) -> Result<Self, GameError> {
        if key_bytes < DEFAULT_KEY_BYTES {
            return Err(GameError::InvalidKeyLength {
                min: DEFAULT_KEY_BYTES,
                actual: key_bytes,
            });
        }
        Ok(Self { key_bytes })
    }

    /// Read overrides from the environment, falling back to defaults
    pub fn from_env() -> Result<Self, GameError> {
        match std::env::var(KEY_BYTES_ENV).ok().and_then(|s| s.parse().ok()) {
            Some(key_bytes) => Self::with_key_bytes(key_bytes),
            None => Ok(Self::default()),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            key_bytes: DEFAULT_KEY_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key_bytes() {
        assert_eq!(GameConfig::default().key_bytes, 32);
    }

    #[test]
    fn test_short_key_rejected() {
        assert_eq!(
            GameConfig::with_key_bytes(16),
            Err(GameError::InvalidKeyLength { min: 32, actual: 16 })
        );
    }

    #[test]
    fn test_longer_key_accepted() {
        assert_eq!(GameConfig::with_key_bytes(64).unwrap().key_bytes, 64);
    }

    #[test]
    fn test_roll_range_covers_all_faces() {
        assert_eq!(
            (DICE_ROLL_MAX_VALUE - DICE_ROLL_MIN_VALUE + 1) as usize,
            FACES_COUNT
        );
    }
}
