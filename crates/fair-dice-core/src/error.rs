//! Error types shared across the crate.

use thiserror::Error;

/// Errors from dice construction, parsing and protocol setup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("A dice must have exactly {expected} faces, got {actual}")]
    InvalidFaceCount { expected: usize, actual: usize },

    #[error("Index must be between 0 and {max}, got {index}")]
    RollIndexOutOfRange { index: i32, max: usize },

    #[error("You must specify at least {min} dice, got {actual}. Example: fair-dice 2,2,4,4,9,9 6,8,1,1,8,6 7,5,3,7,5,3")]
    NotEnoughDice { min: usize, actual: usize },

    #[error("Invalid face value: {0:?}")]
    InvalidFace(String),

    #[error("No dice available to choose from")]
    NoDiceAvailable,

    #[error("Invalid range: {min}..{max}")]
    InvalidRange { min: i32, max: i32 },

    #[error("HMAC key must be at least {min} bytes, got {actual}")]
    InvalidKeyLength { min: usize, actual: usize },

    #[error("Invalid hex string: {0}")]
    InvalidHex(String),
}
