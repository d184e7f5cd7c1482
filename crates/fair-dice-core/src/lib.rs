//! Fair Dice Core Library
//!
//! This crate provides the commit-reveal protocol, the dice model, and the
//! win-probability engine for a provably fair non-transitive dice game.

pub mod config;
pub mod crypto;
pub mod dice;
pub mod error;
pub mod game;
pub mod probability;
pub mod protocol;
pub mod ui;

pub use config::GameConfig;
pub use crypto::{HmacService, SecretKey, Tag};
pub use dice::{parse_dice_args, Dice};
pub use error::GameError;
pub use game::{GameReport, GameSession, SessionEnd, Verdict};
pub use probability::{select_computer_dice, ProbabilityCalculator, ProbabilityTableGenerator};
pub use protocol::{FairPlayProtocol, Mover, RevealMessage, RoundOutcome};
pub use ui::{ConsoleInterface, ScriptedInterface, UserInput, UserInterface};
