//! Cardinal headings and turn arithmetic.
//!
//! Headings are cyclic in the order N → E → S → W → N. A right turn steps
//! forward through the cycle, a left turn steps backward, wrapping at both
//! ends. Turning never fails — unknown compass letters are rejected at the
//! input boundary, not here.

use serde::{Deserialize, Serialize};

/// One of the four cardinal headings a robot can face.
///
/// Serialized as the single wire letter (`"N"`, `"E"`, `"S"`, `"W"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
}

/// Turn direction for an `L`/`R` instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Spin {
    Left,
    Right,
}

/// Cycle order used by both turn directions.
const COMPASS: [Heading; 4] = [
    Heading::North,
    Heading::East,
    Heading::South,
    Heading::West,
];

impl Heading {
    /// New heading after turning one quarter in the given direction.
    pub fn turn(self, spin: Spin) -> Heading {
        let idx = COMPASS.iter().position(|&h| h == self).unwrap_or(0);
        let next = match spin {
            Spin::Left => (idx + COMPASS.len() - 1) % COMPASS.len(),
            Spin::Right => (idx + 1) % COMPASS.len(),
        };
        COMPASS[next]
    }

    /// The (dx, dy) a single forward move applies from this heading.
    pub fn step_delta(self) -> (i32, i32) {
        match self {
            Heading::North => (0, 1),
            Heading::East => (1, 0),
            Heading::South => (0, -1),
            Heading::West => (-1, 0),
        }
    }

    /// Parse a compass letter, case-insensitive.
    pub fn from_char(c: char) -> Option<Heading> {
        match c.to_ascii_uppercase() {
            'N' => Some(Heading::North),
            'E' => Some(Heading::East),
            'S' => Some(Heading::South),
            'W' => Some(Heading::West),
            _ => None,
        }
    }

    /// Wire letter for this heading.
    pub fn as_char(self) -> char {
        match self {
            Heading::North => 'N',
            Heading::East => 'E',
            Heading::South => 'S',
            Heading::West => 'W',
        }
    }
}
