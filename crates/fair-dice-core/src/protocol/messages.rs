//! Public halves of a protocol round.

use crate::crypto::{verify_tag, SecretKey, Tag};
use crate::protocol::RoundId;
use serde::{Deserialize, Serialize};

/// Phase 1: tag published before the counterpart answers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessage {
    pub round_id: RoundId,
    pub min: i32,
    pub max: i32,
    pub tag: Tag,
}

/// Phase 2: value and key disclosed after the counterpart answered
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealMessage {
    pub round_id: RoundId,
    pub value: i32,
    pub key: SecretKey,
    pub tag: Tag,
}

impl RevealMessage {
    /// Recompute the tag from the disclosed key and value
    pub fn verify(&self) -> bool {
        verify_tag(&self.key, self.value, &self.tag)
    }

    /// Check that this reveal answers `commit`
    pub fn matches(&self, commit: &CommitMessage) -> bool {
        self.round_id == commit.round_id
            && self.tag == commit.tag
            && (commit.min..=commit.max).contains(&self.value)
            && self.verify()
    }
}
