//! Commit-reveal protocol rounds, types and messages.

mod fair_play;
mod messages;
mod types;

pub use fair_play::{combine_values, FairPlayProtocol};
pub use messages::{CommitMessage, RevealMessage};
pub use types::{Mover, RoundId, RoundOutcome};
