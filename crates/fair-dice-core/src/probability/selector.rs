//! Maximin dice selection for the computer player.

use super::calculator::ProbabilityCalculator;
use crate::dice::Dice;
use crate::error::GameError;
use tracing::debug;

/// Worst-case win probability of `candidates[index]` against every other die.
///
/// Opponents are skipped by position only, so a die is never scored against
/// itself while a copy with the same faces still counts. With no other die
/// the worst case is 1.0. Panics if `index` is out of bounds.
pub fn worst_case(index: usize, candidates: &[Dice], calc: &ProbabilityCalculator) -> f64 {
    let candidate = &candidates[index];
    candidates
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != index)
        .map(|(_, other)| calc.win_probability(candidate, other))
        .fold(1.0, f64::min)
}

/// Pick the die whose worst matchup is best.
///
/// Ties go to the first candidate in slice order.
pub fn select_computer_dice<'a>(
    candidates: &'a [Dice],
    calc: &ProbabilityCalculator,
) -> Result<&'a Dice, GameError> {
    if let [only] = candidates {
        return Ok(only);
    }

    let mut best: Option<(&Dice, f64)> = None;

    for (i, candidate) in candidates.iter().enumerate() {
        let score = worst_case(i, candidates, calc);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    let (dice, score) = best.ok_or(GameError::NoDiceAvailable)?;
    debug!(%dice, worst_case = score, "Selected computer dice");
    Ok(dice)
}
