//! Commit-reveal rounds: first-move decision and fair value generation.
//!
//! Every round follows the same five steps:
//! 1. draw a fresh key and secret value
//! 2. publish the HMAC tag only
//! 3. ask the counterpart for their number (exit/help abandon the round
//!    before anything secret is shown)
//! 4. disclose the secret value and key
//! 5. derive the result

use super::messages::{CommitMessage, RevealMessage};
use super::types::{RoundId, RoundOutcome};
use crate::crypto::{HmacService, SecretCommitment};
use crate::error::GameError;
use crate::ui::{UserInput, UserInterface};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;

/// `(secret + contribution) mod (max - min + 1)`
pub fn combine_values(secret: i32, contribution: i32, min: i32, max: i32) -> i32 {
    let range_size = i64::from(max) - i64::from(min) + 1;
    // rem_euclid keeps the result in [0, range_size), which fits in i32
    ((i64::from(secret) + i64::from(contribution)).rem_euclid(range_size)) as i32
}

/// Runs commit-reveal rounds against a [`UserInterface`]
pub struct FairPlayProtocol<R = OsRng> {
    hmac: HmacService<R>,
    commits: Vec<CommitMessage>,
    transcript: Vec<RevealMessage>,
}

impl FairPlayProtocol<OsRng> {
    pub fn new() -> Self {
        Self::with_service(HmacService::new())
    }
}

impl Default for FairPlayProtocol<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

/// A committed round waiting for the counterpart's number
struct OpenRound {
    commit: CommitMessage,
    commitment: SecretCommitment,
}

impl<R: RngCore + CryptoRng> FairPlayProtocol<R> {
    pub fn with_service(hmac: HmacService<R>) -> Self {
        Self {
            hmac,
            commits: Vec::new(),
            transcript: Vec::new(),
        }
    }

    /// Every published tag, including rounds abandoned before disclosure
    pub fn commits(&self) -> &[CommitMessage] {
        &self.commits
    }

    /// Reveals of every completed round, oldest first
    pub fn transcript(&self) -> &[RevealMessage] {
        &self.transcript
    }

    /// Decide who moves first.
    ///
    /// Returns `Completed(0)` if the counterpart guessed the secret, else
    /// `Completed(1)`. See [`crate::protocol::Mover::from_first_player_decision`].
    pub fn determine_first_player<U: UserInterface + ?Sized>(
        &mut self,
        ui: &mut U,
        min: i32,
        max: i32,
    ) -> Result<RoundOutcome<i32>, GameError> {
        ui.display("\nLet's determine who makes the first move.");

        let round = self.open_round(ui, min, max)?;
        ui.display("Try to guess my selection.");

        let guess = match ui.request_number("Your selection", min, max) {
            UserInput::Success(value) => value,
            other => return Ok(abandon(round, other)),
        };

        let secret = round.commitment.secret();
        ui.display(&format!(
            "My selection: {} (KEY={}).",
            secret,
            round.commitment.key().to_hex()
        ));
        self.close_round(round);

        Ok(RoundOutcome::Completed(if guess == secret { 0 } else { 1 }))
    }

    /// Agree on a value from the secret and the counterpart's contribution
    pub fn generate_fair_value<U: UserInterface + ?Sized>(
        &mut self,
        ui: &mut U,
        min: i32,
        max: i32,
    ) -> Result<RoundOutcome<i32>, GameError> {
        ui.display(&format!(
            "\nInitiating Fair Random Number Generation (Range: {} to {})",
            min, max
        ));

        let round = self.open_round(ui, min, max)?;
        let range_size = i64::from(max) - i64::from(min) + 1;

        let contribution = match ui.request_number(
            &format!("Add your number modulo {}", range_size),
            min,
            max,
        ) {
            UserInput::Success(value) => value,
            other => return Ok(abandon(round, other)),
        };

        let secret = round.commitment.secret();
        ui.display(&format!(
            "My number is {} (KEY={}).",
            secret,
            round.commitment.key().to_hex()
        ));
        self.close_round(round);

        let result = combine_values(secret, contribution, min, max);
        ui.display(&format!(
            "The fair number generation result is {} + {} = {} (mod {}).",
            secret, contribution, result, range_size
        ));
        ui.display("Fair Random Number Generation Complete");

        Ok(RoundOutcome::Completed(result))
    }

    /// Steps 1 and 2: commit and publish the tag
    fn open_round<U: UserInterface + ?Sized>(
        &mut self,
        ui: &mut U,
        min: i32,
        max: i32,
    ) -> Result<OpenRound, GameError> {
        let commitment = self.hmac.commit(min, max)?;
        let commit = CommitMessage {
            round_id: RoundId::new(),
            min,
            max,
            tag: *commitment.tag(),
        };
        debug!(round_id = %commit.round_id, tag = %commit.tag, "Committed to secret value");

        ui.display(&format!(
            "I selected a random value in the range {}..{} (HMAC={}).",
            min, max, commit.tag
        ));

        self.commits.push(commit.clone());
        Ok(OpenRound { commit, commitment })
    }

    /// Step 4 bookkeeping: record the disclosed round
    fn close_round(&mut self, round: OpenRound) {
        let reveal = RevealMessage {
            round_id: round.commit.round_id,
            value: round.commitment.secret(),
            key: round.commitment.key().clone(),
            tag: *round.commitment.tag(),
        };
        debug!(round_id = %reveal.round_id, value = reveal.value, "Disclosed secret value");
        self.transcript.push(reveal);
    }
}

/// Drop an open round without disclosing it
fn abandon(round: OpenRound, input: UserInput) -> RoundOutcome<i32> {
    debug!(round_id = %round.commit.round_id, ?input, "Round abandoned before disclosure");
    match input {
        UserInput::Help => RoundOutcome::Help,
        _ => RoundOutcome::Exit,
    }
}
