//! Text table of pairwise win probabilities, shown as help during a game.

use super::calculator::ProbabilityCalculator;
use crate::dice::Dice;

const MIN_COLUMN_WIDTH: usize = 8;

/// Renders the win probability of every row die against every column die
pub struct ProbabilityTableGenerator<'a> {
    calc: &'a ProbabilityCalculator,
}

impl<'a> ProbabilityTableGenerator<'a> {
    pub fn new(calc: &'a ProbabilityCalculator) -> Self {
        Self { calc }
    }

    /// Build the table. The diagonal shows `N/A` and is never computed.
    pub fn render(&self, dice: &[Dice]) -> String {
        if dice.is_empty() {
            return "No dice available to generate probability table.".to_string();
        }

        let width = dice
            .iter()
            .map(|d| d.to_string().len())
            .max()
            .unwrap_or(0)
            .max(MIN_COLUMN_WIDTH);

        let mut rows = Vec::with_capacity(dice.len() + 2);

        let mut header = vec![" ".repeat(width)];
        header.extend((0..dice.len()).map(|i| format!("{:>width$}", format!(" Die {}", i))));
        rows.push(header.join("|"));

        rows.push(vec!["-".repeat(width); dice.len() + 1].join("+"));

        for (i, row_dice) in dice.iter().enumerate() {
            let mut row = vec![format!("{:<width$}", format!("Die {}", i))];
            for (j, col_dice) in dice.iter().enumerate() {
                let cell = if i == j {
                    "  N/A".to_string()
                } else {
                    let prob = self.calc.win_probability(row_dice, col_dice);
                    format!(" {:.1}%", prob * 100.0)
                };
                row.push(format!("{:>width$}", cell));
            }
            rows.push(row.join("|"));
        }

        rows.join("\n")
    }
}
