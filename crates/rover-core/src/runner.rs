//! Per-robot execution: replay one instruction program against the surface
//! and the danger-zone registry.
//!
//! The rules, in the order they apply to each instruction:
//! - Turns always execute and are always logged; a turn can neither cause
//!   loss nor be suppressed.
//! - A forward move from a pose matching a recorded danger zone is
//!   suppressed: no movement, no journey step, execution continues with the
//!   next instruction.
//! - An executed forward move is logged first, then bounds-checked. Leaving
//!   the surface loses the robot: the last in-bounds step before the fatal
//!   one becomes the danger-zone triple (never the out-of-bounds cell), the
//!   fatal step keeps its place in history with `lost = true`, and the rest
//!   of the program is not processed.

use rover_logic::input::RobotSpec;
use rover_logic::orientation::Spin;
use rover_logic::robot::{Instruction, JourneyStep, RobotState};
use rover_logic::surface::Surface;

use crate::store::{MissionStore, RobotId, StoreError};

/// Mission-fatal failure. There are no partial reports: a storage failure
/// or consistency defect during any robot's run aborts the whole mission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissionError {
    Store(StoreError),
    /// No in-bounds step preceded a loss. Cannot happen for validated
    /// input, whose step 0 is always on the surface.
    NoSafeStep { robot: u32 },
}

impl From<StoreError> for MissionError {
    fn from(e: StoreError) -> Self {
        MissionError::Store(e)
    }
}

impl std::fmt::Display for MissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissionError::Store(e) => write!(f, "mission store failure: {}", e),
            MissionError::NoSafeStep { robot } => {
                write!(f, "robot {}: lost without any prior in-bounds step", robot)
            }
        }
    }
}

impl std::error::Error for MissionError {}

/// Run one robot to completion, writing its journey into the store.
///
/// The robot either exhausts its program or is lost; either way its journey
/// and final state are in the store when this returns.
pub fn run_robot<S: MissionStore>(
    store: &mut S,
    surface: &Surface,
    id: RobotId,
    spec: &RobotSpec,
) -> Result<(), MissionError> {
    let mut robot = RobotState::new(spec.x, spec.y, spec.heading);

    store.append_step(
        id,
        JourneyStep {
            step: 0,
            x: robot.x,
            y: robot.y,
            heading: robot.heading,
            lost: false,
        },
    )?;

    for (idx, instruction) in spec.program.iter().enumerate() {
        // Step indices follow instruction positions, so a suppressed move
        // leaves a gap rather than a record.
        let step_index = (idx + 1) as u32;

        match instruction {
            Instruction::Left | Instruction::Right => {
                let spin = match instruction {
                    Instruction::Left => Spin::Left,
                    _ => Spin::Right,
                };
                robot.turn(spin);
                store.append_step(
                    id,
                    JourneyStep {
                        step: step_index,
                        x: robot.x,
                        y: robot.y,
                        heading: robot.heading,
                        lost: false,
                    },
                )?;
            }
            Instruction::Forward => {
                if store.query_hazard(robot.x, robot.y, robot.heading)? {
                    // Known-fatal move from this pose: play it safe.
                    continue;
                }

                let (tx, ty) = robot.forward_target();
                store.append_step(
                    id,
                    JourneyStep {
                        step: step_index,
                        x: tx,
                        y: ty,
                        heading: robot.heading,
                        lost: false,
                    },
                )?;

                if surface.contains(tx, ty) {
                    robot.commit_move(tx, ty);
                } else {
                    lose_robot(store, surface, id, step_index)?;
                    robot.commit_move(tx, ty);
                    robot.mark_lost();
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Resolve a fatal move: attribute a danger zone to the last safe pose,
/// flag the fatal step, and mark the robot lost.
fn lose_robot<S: MissionStore>(
    store: &mut S,
    surface: &Surface,
    id: RobotId,
    fatal_step: u32,
) -> Result<(), MissionError> {
    let journey = store.read_journey(id)?;
    let last_safe = journey
        .iter()
        .rev()
        .filter(|s| s.step < fatal_step)
        .find(|s| surface.contains(s.x, s.y))
        .ok_or(MissionError::NoSafeStep { robot: id.0 })?;

    store.record_danger_zone(last_safe.x, last_safe.y, last_safe.heading)?;
    store.flag_step_lost(id, fatal_step)?;
    store.mark_robot_lost(id)?;
    Ok(())
}
