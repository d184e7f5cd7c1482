//! One full game: first-move decision, dice selection, two fair rolls.

use crate::config::{
    DICE_ROLL_MAX_VALUE, DICE_ROLL_MIN_VALUE, FIRST_PLAYER_MAX_VALUE, FIRST_PLAYER_MIN_VALUE,
    MIN_DICE_COUNT,
};
use crate::dice::Dice;
use crate::error::GameError;
use crate::probability::{select_computer_dice, ProbabilityCalculator, ProbabilityTableGenerator};
use crate::protocol::{CommitMessage, FairPlayProtocol, Mover, RevealMessage, RoundOutcome};
use crate::ui::{UserInput, UserInterface};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::info;

pub const FIRST_MOVE_HELP: &str = "This phase determines who starts. The computer has chosen a secret number (0 or 1) and shown its HMAC. Guess the number. If your guess matches, you start. Otherwise, the computer starts. The computer will reveal its number and key after your guess, so you can verify fairness.";

pub const FAIR_ROLL_HELP: &str = "This protocol ensures fair random number generation. The computer commits to a number by showing its HMAC. You then choose a number. The final result is a modular sum of both, and the computer reveals its number and key, allowing you to verify the HMAC.";

/// Final result of a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    ComputerWins,
    UserWins,
    Draw,
}

impl Verdict {
    /// Compare the two rolled faces
    pub fn from_rolls(computer_roll: i32, user_roll: i32) -> Self {
        match computer_roll.cmp(&user_roll) {
            Ordering::Greater => Verdict::ComputerWins,
            Ordering::Less => Verdict::UserWins,
            Ordering::Equal => Verdict::Draw,
        }
    }
}

/// Everything needed to audit a finished game
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameReport {
    pub first_mover: Mover,
    pub computer_dice: Dice,
    pub user_dice: Dice,
    pub computer_roll: i32,
    pub user_roll: i32,
    pub verdict: Verdict,
    /// Every published tag in play order, abandoned rounds included
    pub commits: Vec<CommitMessage>,
    /// Disclosed rounds in play order: first move, computer roll, user roll
    pub reveals: Vec<RevealMessage>,
}

impl GameReport {
    /// Whether every disclosed round answers one of the published tags
    pub fn is_consistent(&self) -> bool {
        self.reveals
            .iter()
            .all(|reveal| self.commits.iter().any(|commit| reveal.matches(commit)))
    }
}

/// How a session ended
#[derive(Clone, Debug)]
pub enum SessionEnd {
    Finished(GameReport),
    Exited,
}

/// Drives one game between the computer and a user
pub struct GameSession<R = OsRng> {
    dice: Vec<Dice>,
    protocol: FairPlayProtocol<R>,
    calc: ProbabilityCalculator,
}

impl GameSession<OsRng> {
    pub fn new(dice: Vec<Dice>) -> Result<Self, GameError> {
        Self::with_protocol(dice, FairPlayProtocol::new())
    }
}

impl<R: RngCore + CryptoRng> GameSession<R> {
    /// Session using the given protocol; needs at least [`MIN_DICE_COUNT`] dice
    pub fn with_protocol(dice: Vec<Dice>, protocol: FairPlayProtocol<R>) -> Result<Self, GameError> {
        if dice.len() < MIN_DICE_COUNT {
            return Err(GameError::NotEnoughDice {
                min: MIN_DICE_COUNT,
                actual: dice.len(),
            });
        }
        Ok(Self {
            dice,
            protocol,
            calc: ProbabilityCalculator::new(),
        })
    }

    /// Play the game to the end, or until the user exits
    pub fn run<U: UserInterface + ?Sized>(&mut self, ui: &mut U) -> Result<SessionEnd, GameError> {
        info!(dice = self.dice.len(), "Game started");

        ui.display("Successfully parsed dice:");
        for (i, dice) in self.dice.iter().enumerate() {
            ui.display(&format!("{}: {}", i, dice));
        }

        let Some(first_mover) = self.first_mover(ui)? else {
            return Ok(self.exited());
        };
        info!(?first_mover, "First mover decided");
        ui.display(match first_mover {
            Mover::Computer => "I make the first move.",
            Mover::User => "You make the first move.",
        });

        let Some((computer_dice, user_dice)) = self.select_dice(ui, first_mover)? else {
            return Ok(self.exited());
        };

        ui.display("\nIt's time for my roll.");
        let Some(index) = self.fair_roll(ui)? else {
            return Ok(self.exited());
        };
        let computer_roll = computer_dice.roll(index)?;
        ui.display(&format!("My roll result is {}.", computer_roll));

        ui.display("\nIt's time for your roll.");
        let Some(index) = self.fair_roll(ui)? else {
            return Ok(self.exited());
        };
        let user_roll = user_dice.roll(index)?;
        ui.display(&format!("Your roll result is {}.", user_roll));

        let verdict = Verdict::from_rolls(computer_roll, user_roll);
        ui.display(&match verdict {
            Verdict::ComputerWins => format!("I win ({} > {})!", computer_roll, user_roll),
            Verdict::UserWins => format!("You win ({} > {})!", user_roll, computer_roll),
            Verdict::Draw => format!("It's a draw ({} = {})!", computer_roll, user_roll),
        });
        info!(?verdict, computer_roll, user_roll, "Game finished");

        Ok(SessionEnd::Finished(GameReport {
            first_mover,
            computer_dice,
            user_dice,
            computer_roll,
            user_roll,
            verdict,
            commits: self.protocol.commits().to_vec(),
            reveals: self.protocol.transcript().to_vec(),
        }))
    }

    fn exited(&self) -> SessionEnd {
        info!("User exited the game");
        SessionEnd::Exited
    }

    fn show_table<U: UserInterface + ?Sized>(&self, ui: &mut U) {
        ui.display(&ProbabilityTableGenerator::new(&self.calc).render(&self.dice));
    }

    /// Repeat the first-move round until it completes; `None` on exit
    fn first_mover<U: UserInterface + ?Sized>(
        &mut self,
        ui: &mut U,
    ) -> Result<Option<Mover>, GameError> {
        loop {
            match self.protocol.determine_first_player(
                ui,
                FIRST_PLAYER_MIN_VALUE,
                FIRST_PLAYER_MAX_VALUE,
            )? {
                RoundOutcome::Completed(decision) => {
                    return Ok(Some(Mover::from_first_player_decision(decision)))
                }
                RoundOutcome::Exit => return Ok(None),
                RoundOutcome::Help => ui.display(FIRST_MOVE_HELP),
            }
        }
    }

    /// Repeat a fair roll round until it completes; `None` on exit
    fn fair_roll<U: UserInterface + ?Sized>(&mut self, ui: &mut U) -> Result<Option<i32>, GameError> {
        loop {
            match self
                .protocol
                .generate_fair_value(ui, DICE_ROLL_MIN_VALUE, DICE_ROLL_MAX_VALUE)?
            {
                RoundOutcome::Completed(index) => return Ok(Some(index)),
                RoundOutcome::Exit => return Ok(None),
                RoundOutcome::Help => {
                    ui.display(FAIR_ROLL_HELP);
                    self.show_table(ui);
                }
            }
        }
    }

    /// Ask the user for a die until they pick one; `None` on exit
    fn choose_user_dice<U: UserInterface + ?Sized>(
        &self,
        ui: &mut U,
        remaining: &[Dice],
    ) -> Option<usize> {
        let options: Vec<String> = remaining.iter().map(ToString::to_string).collect();
        loop {
            match ui.request_menu_choice("Choose your dice", &options) {
                UserInput::Success(choice) => {
                    return usize::try_from(choice).ok().filter(|i| *i < remaining.len())
                }
                UserInput::Help => self.show_table(ui),
                UserInput::Exit | UserInput::Invalid => return None,
            }
        }
    }

    /// The first mover picks first; returns `(computer, user)` dice
    fn select_dice<U: UserInterface + ?Sized>(
        &self,
        ui: &mut U,
        first_mover: Mover,
    ) -> Result<Option<(Dice, Dice)>, GameError> {
        let mut remaining = self.dice.clone();

        let picked = match first_mover {
            Mover::Computer => {
                let chosen = select_computer_dice(&remaining, &self.calc)?;
                let pos = remaining.iter().position(|d| std::ptr::eq(d, chosen));
                let computer = chosen.clone();
                if let Some(pos) = pos {
                    remaining.remove(pos);
                }
                ui.display(&format!("I make the first move and choose the {} dice.", computer));

                self.choose_user_dice(ui, &remaining).map(|choice| {
                    let user = remaining[choice].clone();
                    ui.display(&format!("You choose the {} dice.", user));
                    (computer, user)
                })
            }
            Mover::User => match self.choose_user_dice(ui, &remaining) {
                Some(choice) => {
                    let user = remaining.remove(choice);
                    ui.display(&format!("You make the first move and choose the {} dice.", user));

                    let computer = select_computer_dice(&remaining, &self.calc)?.clone();
                    ui.display(&format!("I choose the {} dice.", computer));
                    Some((computer, user))
                }
                None => None,
            },
        };

        Ok(picked)
    }
}
