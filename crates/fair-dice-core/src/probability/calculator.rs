//! Pairwise win probabilities with memoization.

use crate::dice::Dice;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::trace;

/// Probability that one die beats another, cached per ordered pair.
///
/// Dice are immutable, so a cached value always equals a fresh computation
/// and concurrent inserts of the same pair store the same value.
#[derive(Default)]
pub struct ProbabilityCalculator {
    cache: RwLock<HashMap<(String, String), f64>>,
}

impl ProbabilityCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of face pairs where `player` shows the strictly higher face.
    ///
    /// Ties count for neither side, so `p(a, b) + p(b, a)` may be below 1.
    pub fn win_probability(&self, player: &Dice, opponent: &Dice) -> f64 {
        let key = (player.to_string(), opponent.to_string());

        if let Some(prob) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return *prob;
        }

        let prob = compute_win_probability(player, opponent);
        trace!(player = %key.0, opponent = %key.1, prob, "Computed win probability");

        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(prob);
        prob
    }

    /// Number of ordered pairs cached so far
    pub fn cached_pairs(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Uncached win probability of `player` against `opponent`
pub fn compute_win_probability(player: &Dice, opponent: &Dice) -> f64 {
    let wins: usize = player
        .faces()
        .iter()
        .map(|p| opponent.faces().iter().filter(|o| **o < *p).count())
        .sum();
    let total = player.faces().len() * opponent.faces().len();
    wins as f64 / total as f64
}
