//! Dice and dice argument parsing.

use crate::config::{FACES_COUNT, MIN_DICE_COUNT};
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A die with exactly [`FACES_COUNT`] faces.
///
/// Equality and hashing follow the face sequence, so two dice built from the
/// same faces are interchangeable as cache keys and list members.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    faces: [i32; FACES_COUNT],
}

impl Dice {
    /// Create a die, failing unless exactly [`FACES_COUNT`] faces are given
    pub fn new(faces: &[i32]) -> Result<Self, GameError> {
        let faces: [i32; FACES_COUNT] =
            faces.try_into().map_err(|_| GameError::InvalidFaceCount {
                expected: FACES_COUNT,
                actual: faces.len(),
            })?;
        Ok(Self { faces })
    }

    /// Face values in construction order
    pub fn faces(&self) -> &[i32; FACES_COUNT] {
        &self.faces
    }

    /// Face at the given roll index
    pub fn roll(&self, index: i32) -> Result<i32, GameError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.faces.get(i).copied())
            .ok_or(GameError::RollIndexOutOfRange {
                index,
                max: FACES_COUNT - 1,
            })
    }
}

impl fmt::Debug for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dice({})", self)
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, face) in self.faces.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", face)?;
        }
        write!(f, "]")
    }
}

impl FromStr for Dice {
    type Err = GameError;

    /// Parse a comma separated face list such as `2,2,4,4,9,9`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let faces = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<i32>()
                    .map_err(|_| GameError::InvalidFace(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&faces)
    }
}

/// Parse one die per argument, requiring at least [`MIN_DICE_COUNT`] dice
pub fn parse_dice_args<S: AsRef<str>>(args: &[S]) -> Result<Vec<Dice>, GameError> {
    if args.len() < MIN_DICE_COUNT {
        return Err(GameError::NotEnoughDice {
            min: MIN_DICE_COUNT,
            actual: args.len(),
        });
    }

    args.iter().map(|arg| arg.as_ref().parse()).collect()
}
