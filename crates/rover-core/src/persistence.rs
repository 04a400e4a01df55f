//! Save/Load functionality for persisting mission state
//!
//! Uses bincode for compact binary serialization. Rows are extracted from
//! the world store individually and respawned on load, so entity ids never
//! leak into the snapshot format.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use rover_logic::surface::Surface;

use crate::store::{RobotRow, StepRow, WorldStore, ZoneRow};

/// Version number for the snapshot format (increment when format changes)
const SNAPSHOT_VERSION: u32 = 1;

/// Serializable snapshot of a mission
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Snapshot format version
    pub version: u32,
    /// Mission surface
    pub surface: Surface,
    /// Robot rows in id order
    pub robots: Vec<RobotRow>,
    /// Journey-step rows in (robot, step) order
    pub steps: Vec<StepRow>,
    /// Danger-zone rows in discovery order
    pub zones: Vec<ZoneRow>,
}

/// Result of loading a mission snapshot
pub struct LoadedMission {
    pub surface: Surface,
    pub store: WorldStore,
}

/// Save a mission's surface and store contents to a writer
pub fn save_mission<W: Write>(
    writer: W,
    surface: &Surface,
    store: &WorldStore,
) -> Result<(), SnapshotError> {
    let save_data = SaveData {
        version: SNAPSHOT_VERSION,
        surface: *surface,
        robots: store.robot_rows(),
        steps: store.step_rows(),
        zones: store.zone_rows(),
    };

    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Load a mission from a reader
pub fn load_mission<R: Read>(reader: R) -> Result<LoadedMission, SnapshotError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            expected: SNAPSHOT_VERSION,
            found: save_data.version,
        });
    }

    let store = WorldStore::from_rows(save_data.robots, save_data.steps, save_data.zones);

    Ok(LoadedMission {
        surface: save_data.surface,
        store,
    })
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SnapshotError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SnapshotError::Bincode(e)
    }
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "IO error: {}", e),
            SnapshotError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SnapshotError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Snapshot version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SnapshotError {}
