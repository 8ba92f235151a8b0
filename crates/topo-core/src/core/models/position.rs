use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A residue position within a protein sequence.
///
/// Positions are converted from their textual form exactly once, at the record
/// boundary, and are compared numerically from then on. A token that is not a
/// non-negative integer is rejected instead of being carried through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(u32);

impl Position {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the position shifted by `delta` residues.
    pub fn offset_by(self, delta: u32) -> Result<Self, MalformedPositionError> {
        self.0
            .checked_add(delta)
            .map(Self)
            .ok_or_else(|| MalformedPositionError {
                token: format!("{}+{}", self.0, delta),
            })
    }
}

impl From<u32> for Position {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Position {
    type Err = MalformedPositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MalformedPositionError { token: s.into() });
        }
        trimmed
            .parse::<u32>()
            .map(Self)
            .map_err(|_| MalformedPositionError { token: s.into() })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Malformed position token: '{token}'")]
pub struct MalformedPositionError {
    pub token: String,
}

/// A disulfide bond between two cysteine positions, written `"<left> <right>"` in the
/// source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BondPair {
    pub left: Position,
    pub right: Position,
}

impl BondPair {
    pub const fn new(left: Position, right: Position) -> Self {
        Self { left, right }
    }

    pub fn involves(&self, position: Position) -> bool {
        self.left == position || self.right == position
    }

    /// Renders the pair the way conflict reports expect it: both positions joined by a comma.
    pub fn conflict_label(&self) -> String {
        format!("{},{}", self.left, self.right)
    }
}

impl fmt::Display for BondPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.left, self.right)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BondPairError {
    #[error("Bond '{pair}' must contain exactly two positions, found {found}")]
    WrongArity { pair: String, found: usize },
    #[error("Bond '{pair}' contains an invalid position: {source}")]
    Position {
        pair: String,
        #[source]
        source: MalformedPositionError,
    },
}

impl FromStr for BondPair {
    type Err = BondPairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(BondPairError::WrongArity {
                pair: s.into(),
                found: tokens.len(),
            });
        }
        let parse = |token: &str| {
            token.parse::<Position>().map_err(|e| BondPairError::Position {
                pair: s.into(),
                source: e,
            })
        };
        Ok(Self {
            left: parse(tokens[0])?,
            right: parse(tokens[1])?,
        })
    }
}
