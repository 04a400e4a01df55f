//! Mission request validation and normalization.
//!
//! The engine assumes well-formed integers, a valid heading, and programs
//! of only L/R/F. This module is the boundary that makes that assumption
//! true: it takes the raw request shape (optional fields, free-form
//! strings, any letter case) and produces a [`MissionPlan`] or a typed
//! error describing the first problem found.

use serde::Deserialize;

use crate::orientation::Heading;
use crate::robot::{parse_program, Instruction};
use crate::surface::Surface;

/// Surface dimensions must stay within this inclusive range.
pub const SURFACE_MIN: i32 = 2;
pub const SURFACE_MAX: i32 = 50;

/// Programs longer than this are rejected.
pub const MAX_PROGRAM_LEN: usize = 99;

/// Raw mission request as it arrives off the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct MissionRequest {
    pub surface: SurfaceRequest,
    #[serde(default)]
    pub robots: Vec<RobotRequest>,
}

/// Raw surface dimensions. Accepts upper-case keys as the wire does.
#[derive(Debug, Clone, Deserialize)]
pub struct SurfaceRequest {
    #[serde(alias = "X")]
    pub x: Option<i32>,
    #[serde(alias = "Y")]
    pub y: Option<i32>,
}

/// Raw robot declaration. Compass and instructions are free-form strings
/// normalized during validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RobotRequest {
    #[serde(alias = "X")]
    pub x: Option<i32>,
    #[serde(alias = "Y")]
    pub y: Option<i32>,
    #[serde(alias = "Compass")]
    pub compass: Option<String>,
    #[serde(alias = "Instructions")]
    pub instructions: Option<String>,
}

/// A validated robot ready to run: in-bounds start pose and a parsed program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotSpec {
    pub x: i32,
    pub y: i32,
    pub heading: Heading,
    pub program: Vec<Instruction>,
}

/// The well-formed input the engine runs against.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionPlan {
    pub surface: Surface,
    pub robots: Vec<RobotSpec>,
}

/// Why a mission request was rejected. Robot indices are zero-based
/// submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    MissingSurfaceAxis,
    SurfaceOutOfRange { x: i32, y: i32 },
    NoRobots,
    MissingRobotCoordinate { robot: usize },
    MissingCompass { robot: usize },
    UnknownCompass { robot: usize, got: String },
    MissingInstructions { robot: usize },
    ProgramTooLong { robot: usize, len: usize },
    UnknownInstruction { robot: usize, got: char },
    StartOutsideSurface { robot: usize, x: i32, y: i32 },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::MissingSurfaceAxis => {
                write!(f, "missing one or both surface coordinates")
            }
            InputError::SurfaceOutOfRange { x, y } => write!(
                f,
                "surface {}x{} outside allowed range {}..={}",
                x, y, SURFACE_MIN, SURFACE_MAX
            ),
            InputError::NoRobots => write!(f, "define at least one robot for the mission"),
            InputError::MissingRobotCoordinate { robot } => {
                write!(f, "robot {}: missing one or both start coordinates", robot)
            }
            InputError::MissingCompass { robot } => {
                write!(f, "robot {}: missing starting compass direction", robot)
            }
            InputError::UnknownCompass { robot, got } => {
                write!(f, "robot {}: unknown compass direction '{}'", robot, got)
            }
            InputError::MissingInstructions { robot } => {
                write!(f, "robot {}: missing instruction string", robot)
            }
            InputError::ProgramTooLong { robot, len } => write!(
                f,
                "robot {}: {} instructions, limit is {}",
                robot, len, MAX_PROGRAM_LEN
            ),
            InputError::UnknownInstruction { robot, got } => {
                write!(f, "robot {}: unknown instruction '{}'", robot, got)
            }
            InputError::StartOutsideSurface { robot, x, y } => {
                write!(f, "robot {}: start ({}, {}) is off the surface", robot, x, y)
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Validate and normalize a raw request into a runnable plan.
pub fn validate(request: &MissionRequest) -> Result<MissionPlan, InputError> {
    let (sx, sy) = match (request.surface.x, request.surface.y) {
        (Some(x), Some(y)) => (x, y),
        _ => return Err(InputError::MissingSurfaceAxis),
    };

    if !(SURFACE_MIN..=SURFACE_MAX).contains(&sx) || !(SURFACE_MIN..=SURFACE_MAX).contains(&sy) {
        return Err(InputError::SurfaceOutOfRange { x: sx, y: sy });
    }

    let surface = Surface::new(sx, sy);

    if request.robots.is_empty() {
        return Err(InputError::NoRobots);
    }

    let mut robots = Vec::with_capacity(request.robots.len());
    for (idx, raw) in request.robots.iter().enumerate() {
        robots.push(validate_robot(idx, raw, &surface)?);
    }

    Ok(MissionPlan { surface, robots })
}

fn validate_robot(
    idx: usize,
    raw: &RobotRequest,
    surface: &Surface,
) -> Result<RobotSpec, InputError> {
    let (x, y) = match (raw.x, raw.y) {
        (Some(x), Some(y)) => (x, y),
        _ => return Err(InputError::MissingRobotCoordinate { robot: idx }),
    };

    let compass = raw
        .compass
        .as_deref()
        .ok_or(InputError::MissingCompass { robot: idx })?;
    let heading = compass
        .trim()
        .chars()
        .next()
        .filter(|_| compass.trim().len() == 1)
        .and_then(Heading::from_char)
        .ok_or_else(|| InputError::UnknownCompass {
            robot: idx,
            got: compass.to_string(),
        })?;

    let instructions = raw
        .instructions
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(InputError::MissingInstructions { robot: idx })?;

    if instructions.len() > MAX_PROGRAM_LEN {
        return Err(InputError::ProgramTooLong {
            robot: idx,
            len: instructions.len(),
        });
    }

    let program = parse_program(instructions)
        .map_err(|got| InputError::UnknownInstruction { robot: idx, got })?;

    if !surface.contains(x, y) {
        return Err(InputError::StartOutsideSurface { robot: idx, x, y });
    }

    Ok(RobotSpec {
        x,
        y,
        heading,
        program,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(x: i32, y: i32) -> SurfaceRequest {
        SurfaceRequest {
            x: Some(x),
            y: Some(y),
        }
    }

    fn robot(x: i32, y: i32, compass: &str, instructions: &str) -> RobotRequest {
        RobotRequest {
            x: Some(x),
            y: Some(y),
            compass: Some(compass.to_string()),
            instructions: Some(instructions.to_string()),
        }
    }

    #[test]
    fn valid_request_produces_plan() {
        let req = MissionRequest {
            surface: surface(5, 3),
            robots: vec![robot(1, 1, "e", "rfrfrfrf")],
        };
        let plan = validate(&req).unwrap();
        assert_eq!(plan.surface, Surface::new(5, 3));
        assert_eq!(plan.robots[0].heading, Heading::East);
        assert_eq!(plan.robots[0].program.len(), 8);
    }

    #[test]
    fn surface_range_is_2_to_50() {
        for (x, y) in [(1, 3), (5, 51), (0, 0), (51, 51)] {
            let req = MissionRequest {
                surface: surface(x, y),
                robots: vec![robot(0, 0, "N", "F")],
            };
            assert_eq!(
                validate(&req),
                Err(InputError::SurfaceOutOfRange { x, y })
            );
        }
        let req = MissionRequest {
            surface: surface(2, 50),
            robots: vec![robot(0, 0, "N", "F")],
        };
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn missing_surface_axis_rejected() {
        let req = MissionRequest {
            surface: SurfaceRequest {
                x: Some(5),
                y: None,
            },
            robots: vec![robot(0, 0, "N", "F")],
        };
        assert_eq!(validate(&req), Err(InputError::MissingSurfaceAxis));
    }

    #[test]
    fn empty_robot_list_rejected() {
        let req = MissionRequest {
            surface: surface(5, 3),
            robots: vec![],
        };
        assert_eq!(validate(&req), Err(InputError::NoRobots));
    }

    #[test]
    fn unknown_compass_rejected() {
        let req = MissionRequest {
            surface: surface(5, 3),
            robots: vec![robot(1, 1, "Q", "F")],
        };
        assert_eq!(
            validate(&req),
            Err(InputError::UnknownCompass {
                robot: 0,
                got: "Q".to_string()
            })
        );
    }

    #[test]
    fn program_length_capped_at_99() {
        let long = "F".repeat(100);
        let req = MissionRequest {
            surface: surface(5, 3),
            robots: vec![robot(1, 1, "N", &long)],
        };
        assert_eq!(
            validate(&req),
            Err(InputError::ProgramTooLong { robot: 0, len: 100 })
        );

        let ok = "F".repeat(99);
        let req = MissionRequest {
            surface: surface(5, 3),
            robots: vec![robot(1, 1, "N", &ok)],
        };
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn unknown_instruction_letter_rejected() {
        let req = MissionRequest {
            surface: surface(5, 3),
            robots: vec![robot(1, 1, "N", "FFZ")],
        };
        assert_eq!(
            validate(&req),
            Err(InputError::UnknownInstruction { robot: 0, got: 'Z' })
        );
    }

    #[test]
    fn start_must_be_on_surface() {
        let req = MissionRequest {
            surface: surface(5, 3),
            robots: vec![robot(6, 1, "N", "F")],
        };
        assert_eq!(
            validate(&req),
            Err(InputError::StartOutsideSurface {
                robot: 0,
                x: 6,
                y: 1
            })
        );

        let req = MissionRequest {
            surface: surface(5, 3),
            robots: vec![robot(-1, 0, "N", "F")],
        };
        assert!(matches!(
            validate(&req),
            Err(InputError::StartOutsideSurface { .. })
        ));
    }

    #[test]
    fn second_robot_errors_name_its_index() {
        let req = MissionRequest {
            surface: surface(5, 3),
            robots: vec![robot(1, 1, "N", "F"), robot(1, 1, "N", "")],
        };
        assert_eq!(
            validate(&req),
            Err(InputError::MissingInstructions { robot: 1 })
        );
    }
}
