//! Mission storage: the persistence collaborator behind the run loop.
//!
//! [`MissionStore`] is the contract the engine needs — append-only journey
//! writes, an exact-match hazard lookup, and idempotent danger-zone
//! recording. [`WorldStore`] implements it over a `hecs::World` where each
//! robot, journey step, and danger zone is one entity holding one row
//! component. Single-threaded `&mut` access gives the read-your-writes
//! ordering the hazard check depends on: a step appended for robot N is
//! visible to every later query in the same mission.

use hecs::World;
use serde::{Deserialize, Serialize};

use rover_logic::orientation::Heading;
use rover_logic::robot::JourneyStep;

/// Opaque mission-scoped robot identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RobotId(pub u32);

/// A (position, heading) triple known to cause signal loss.
///
/// Immutable once created; never removed for the lifetime of the mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DangerZone {
    pub x: i32,
    pub y: i32,
    pub heading: Heading,
}

/// Storage failure. Any of these aborts the whole mission — the engine
/// never retries and never returns a partial report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    RobotNotFound(u32),
    StepNotFound { robot: u32, step: u32 },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::RobotNotFound(id) => write!(f, "robot {} not found in store", id),
            StoreError::StepNotFound { robot, step } => {
                write!(f, "robot {} has no journey step {}", robot, step)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Operations the engine needs from a persistence collaborator.
///
/// The step-append and the hazard/fatality evaluation that follows it must
/// be linearizable; any backend with read-your-writes within one robot run
/// satisfies that.
pub trait MissionStore {
    /// Register a robot, returning its mission-scoped id.
    fn create_robot(&mut self, batch: u32) -> Result<RobotId, StoreError>;

    /// Append one journey step. Journeys are append-only; history is never
    /// rewritten except for the lost flag on the terminal step.
    fn append_step(&mut self, robot: RobotId, step: JourneyStep) -> Result<(), StoreError>;

    /// Flag an already-written step as the one where the signal was lost.
    fn flag_step_lost(&mut self, robot: RobotId, step: u32) -> Result<(), StoreError>;

    /// Terminal robot transition.
    fn mark_robot_lost(&mut self, robot: RobotId) -> Result<(), StoreError>;

    fn robot_lost(&self, robot: RobotId) -> Result<bool, StoreError>;

    /// Exact-match membership test against the danger-zone registry.
    fn query_hazard(&self, x: i32, y: i32, heading: Heading) -> Result<bool, StoreError>;

    /// Record a danger zone. Idempotent: a triple already present is a no-op.
    fn record_danger_zone(&mut self, x: i32, y: i32, heading: Heading) -> Result<(), StoreError>;

    /// Full journey in step order.
    fn read_journey(&self, robot: RobotId) -> Result<Vec<JourneyStep>, StoreError>;

    /// All danger zones in discovery order.
    fn danger_zones(&self) -> Result<Vec<DangerZone>, StoreError>;
}

// ── Row components ──────────────────────────────────────────────────────

/// One robot row: identity plus the terminal lost flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotRow {
    pub id: u32,
    pub batch: u32,
    pub lost: bool,
}

/// One journey-step row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRow {
    pub robot_id: u32,
    pub step: JourneyStep,
}

/// One danger-zone row. `seq` preserves discovery order, which matters for
/// display only — matching is by field equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneRow {
    pub seq: u32,
    pub zone: DangerZone,
}

/// In-process mission store over a `hecs::World`.
pub struct WorldStore {
    world: World,
    next_robot: u32,
    next_zone_seq: u32,
}

impl WorldStore {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            next_robot: 0,
            next_zone_seq: 0,
        }
    }

    /// Rebuild a store from snapshot rows.
    pub(crate) fn from_rows(
        robots: Vec<RobotRow>,
        steps: Vec<StepRow>,
        zones: Vec<ZoneRow>,
    ) -> Self {
        let mut store = Self::new();
        store.next_robot = robots.iter().map(|r| r.id + 1).max().unwrap_or(0);
        store.next_zone_seq = zones.iter().map(|z| z.seq + 1).max().unwrap_or(0);
        for row in robots {
            store.world.spawn((row,));
        }
        for row in steps {
            store.world.spawn((row,));
        }
        for row in zones {
            store.world.spawn((row,));
        }
        store
    }

    pub(crate) fn robot_rows(&self) -> Vec<RobotRow> {
        let mut rows: Vec<RobotRow> = self
            .world
            .query::<&RobotRow>()
            .iter()
            .map(|(_, r)| r.clone())
            .collect();
        rows.sort_by_key(|r| r.id);
        rows
    }

    pub(crate) fn step_rows(&self) -> Vec<StepRow> {
        let mut rows: Vec<StepRow> = self
            .world
            .query::<&StepRow>()
            .iter()
            .map(|(_, r)| r.clone())
            .collect();
        rows.sort_by_key(|r| (r.robot_id, r.step.step));
        rows
    }

    pub(crate) fn zone_rows(&self) -> Vec<ZoneRow> {
        let mut rows: Vec<ZoneRow> = self
            .world
            .query::<&ZoneRow>()
            .iter()
            .map(|(_, r)| r.clone())
            .collect();
        rows.sort_by_key(|r| r.seq);
        rows
    }
}

impl Default for WorldStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MissionStore for WorldStore {
    fn create_robot(&mut self, batch: u32) -> Result<RobotId, StoreError> {
        let id = self.next_robot;
        self.next_robot += 1;
        self.world.spawn((RobotRow {
            id,
            batch,
            lost: false,
        },));
        Ok(RobotId(id))
    }

    fn append_step(&mut self, robot: RobotId, step: JourneyStep) -> Result<(), StoreError> {
        self.robot_lost(robot)?; // existence check
        self.world.spawn((StepRow {
            robot_id: robot.0,
            step,
        },));
        Ok(())
    }

    fn flag_step_lost(&mut self, robot: RobotId, step: u32) -> Result<(), StoreError> {
        for (_, row) in self.world.query_mut::<&mut StepRow>() {
            if row.robot_id == robot.0 && row.step.step == step {
                row.step.lost = true;
                return Ok(());
            }
        }
        Err(StoreError::StepNotFound {
            robot: robot.0,
            step,
        })
    }

    fn mark_robot_lost(&mut self, robot: RobotId) -> Result<(), StoreError> {
        for (_, row) in self.world.query_mut::<&mut RobotRow>() {
            if row.id == robot.0 {
                row.lost = true;
                return Ok(());
            }
        }
        Err(StoreError::RobotNotFound(robot.0))
    }

    fn robot_lost(&self, robot: RobotId) -> Result<bool, StoreError> {
        self.world
            .query::<&RobotRow>()
            .iter()
            .find(|(_, r)| r.id == robot.0)
            .map(|(_, r)| r.lost)
            .ok_or(StoreError::RobotNotFound(robot.0))
    }

    fn query_hazard(&self, x: i32, y: i32, heading: Heading) -> Result<bool, StoreError> {
        Ok(self
            .world
            .query::<&ZoneRow>()
            .iter()
            .any(|(_, z)| z.zone.x == x && z.zone.y == y && z.zone.heading == heading))
    }

    fn record_danger_zone(&mut self, x: i32, y: i32, heading: Heading) -> Result<(), StoreError> {
        if self.query_hazard(x, y, heading)? {
            return Ok(());
        }
        let seq = self.next_zone_seq;
        self.next_zone_seq += 1;
        self.world.spawn((ZoneRow {
            seq,
            zone: DangerZone { x, y, heading },
        },));
        Ok(())
    }

    fn read_journey(&self, robot: RobotId) -> Result<Vec<JourneyStep>, StoreError> {
        self.robot_lost(robot)?; // existence check
        let mut steps: Vec<JourneyStep> = self
            .world
            .query::<&StepRow>()
            .iter()
            .filter(|(_, row)| row.robot_id == robot.0)
            .map(|(_, row)| row.step)
            .collect();
        steps.sort_by_key(|s| s.step);
        Ok(steps)
    }

    fn danger_zones(&self) -> Result<Vec<DangerZone>, StoreError> {
        Ok(self.zone_rows().into_iter().map(|r| r.zone).collect())
    }
}
