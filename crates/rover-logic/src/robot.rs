//! Robot pose state machine, instructions, and journey steps.
//!
//! A robot is `Active` until a forward move carries it off the surface;
//! `Lost` is terminal and irreversible. Turns change heading only, moves
//! change exactly one axis by one unit. The candidate cell of a move may
//! sit one unit outside the surface for the instant between computing it
//! and the loss rule resolving it — that is the only way coordinates ever
//! leave the surface.

use serde::{Deserialize, Serialize};

use crate::orientation::{Heading, Spin};

/// One character of a robot program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    Left,
    Right,
    Forward,
}

impl Instruction {
    /// Parse an instruction letter, case-insensitive.
    pub fn from_char(c: char) -> Option<Instruction> {
        match c.to_ascii_uppercase() {
            'L' => Some(Instruction::Left),
            'R' => Some(Instruction::Right),
            'F' => Some(Instruction::Forward),
            _ => None,
        }
    }
}

/// Parse a full instruction string. Returns the offending character on
/// the first unknown letter.
pub fn parse_program(raw: &str) -> Result<Vec<Instruction>, char> {
    raw.chars()
        .map(|c| Instruction::from_char(c).ok_or(c))
        .collect()
}

/// One probe's mutable position, heading, and lost flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotState {
    pub x: i32,
    pub y: i32,
    pub heading: Heading,
    pub lost: bool,
}

impl RobotState {
    pub fn new(x: i32, y: i32, heading: Heading) -> Self {
        Self {
            x,
            y,
            heading,
            lost: false,
        }
    }

    /// Rotate in place. Position never changes on a turn.
    pub fn turn(&mut self, spin: Spin) {
        self.heading = self.heading.turn(spin);
    }

    /// Candidate cell one step ahead. Does not mutate — the caller decides
    /// whether the move commits, is suppressed, or loses the robot.
    pub fn forward_target(&self) -> (i32, i32) {
        let (dx, dy) = self.heading.step_delta();
        (self.x + dx, self.y + dy)
    }

    /// Commit a previously computed move.
    pub fn commit_move(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Terminal transition. There is no way back to `Active`.
    pub fn mark_lost(&mut self) {
        self.lost = true;
    }
}

/// One recorded pose in a robot's journey.
///
/// Step 0 is always the initial pose before any instruction executes.
/// Later indices are instruction-index + 1, so a suppressed forward move
/// leaves a gap in the sequence rather than a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyStep {
    pub step: u32,
    pub x: i32,
    pub y: i32,
    pub heading: Heading,
    pub lost: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_program_accepts_mixed_case() {
        let program = parse_program("lRf").unwrap();
        assert_eq!(
            program,
            vec![Instruction::Left, Instruction::Right, Instruction::Forward]
        );
    }

    #[test]
    fn parse_program_reports_unknown_letter() {
        assert_eq!(parse_program("LFX"), Err('X'));
    }

    #[test]
    fn forward_target_moves_one_axis_one_unit() {
        let cases = [
            (Heading::North, (2, 3)),
            (Heading::East, (3, 2)),
            (Heading::South, (2, 1)),
            (Heading::West, (1, 2)),
        ];
        for (heading, want) in cases {
            let r = RobotState::new(2, 2, heading);
            assert_eq!(r.forward_target(), want);
        }
    }

    #[test]
    fn turn_changes_heading_not_position() {
        let mut r = RobotState::new(4, 1, Heading::North);
        r.turn(Spin::Right);
        assert_eq!((r.x, r.y), (4, 1));
        assert_eq!(r.heading, Heading::East);
        assert!(!r.lost);
    }

    #[test]
    fn lost_is_terminal() {
        let mut r = RobotState::new(0, 0, Heading::South);
        assert!(!r.lost);
        r.mark_lost();
        assert!(r.lost);
    }
}
