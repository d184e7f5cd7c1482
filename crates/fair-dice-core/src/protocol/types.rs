//! Protocol types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique protocol round identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(Uuid);

impl RoundId {
    /// Create a new random round ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RoundId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for RoundId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoundId({})", self.0)
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of one commit-reveal round
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome<T> {
    /// Round finished and the key was disclosed
    Completed(T),
    /// Counterpart left; nothing was disclosed
    Exit,
    /// Counterpart asked for help; the caller restarts the round
    Help,
}

/// Participant in the game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mover {
    Computer,
    User,
}

impl Mover {
    /// Map a first-player decision to the first mover.
    ///
    /// A matching guess yields decision `0` and the user moves first; a miss
    /// yields `1` and the computer moves first.
    pub fn from_first_player_decision(decision: i32) -> Mover {
        if decision == 1 {
            Mover::Computer
        } else {
            Mover::User
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_id_roundtrip() {
        let id = RoundId::new();
        let parsed: RoundId = id.to_string().parse().unwrap();

        assert_eq!(id, parsed);
        assert_ne!(id, RoundId::new());
    }

    #[test]
    fn test_first_player_mapping() {
        assert_eq!(Mover::from_first_player_decision(1), Mover::Computer);
        assert_eq!(Mover::from_first_player_decision(0), Mover::User);
    }
}
