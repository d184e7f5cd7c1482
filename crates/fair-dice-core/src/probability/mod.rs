//! Win-probability engine, maximin selection and the help table.

mod calculator;
mod selector;
mod table;

pub use calculator::{compute_win_probability, ProbabilityCalculator};
pub use selector::{select_computer_dice, worst_case};
pub use table::ProbabilityTableGenerator;
