//! Mission engine - main entry point for running a mission.
//!
//! Robots run strictly sequentially in submission order; there is no
//! parallelism across robots because robot N+1 must observe every danger
//! zone created by robot N. That visibility is a correctness requirement
//! of the hazard-avoidance rule, not an optimization.

use rover_logic::input::{MissionPlan, RobotSpec};
use rover_logic::surface::Surface;

use crate::report::{build_report, MissionReport};
use crate::runner::{run_robot, MissionError};
use crate::store::{MissionStore, RobotId, WorldStore};

/// Owns the surface and the mission store for one mission.
pub struct MissionEngine<S: MissionStore = WorldStore> {
    surface: Surface,
    store: S,
    robots: Vec<RobotId>,
}

impl MissionEngine<WorldStore> {
    /// New mission over the in-process store.
    pub fn new(surface: Surface) -> Self {
        Self::with_store(surface, WorldStore::new())
    }
}

impl<S: MissionStore> MissionEngine<S> {
    /// New mission over an arbitrary storage collaborator.
    pub fn with_store(surface: Surface, store: S) -> Self {
        Self {
            surface,
            store,
            robots: Vec::new(),
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Robots processed so far, in submission order.
    pub fn robot_ids(&self) -> &[RobotId] {
        &self.robots
    }

    /// Run one robot to completion and remember it for the report.
    pub fn run_one(&mut self, spec: &RobotSpec) -> Result<RobotId, MissionError> {
        let batch = self.robots.len() as u32;
        let id = self.store.create_robot(batch)?;
        run_robot(&mut self.store, &self.surface, id, spec)?;
        self.robots.push(id);
        Ok(id)
    }

    /// Run all robots in submission order and build the mission report.
    ///
    /// Fails atomically: any storage failure mid-run surfaces here and no
    /// partial report is produced.
    pub fn run(&mut self, robots: &[RobotSpec]) -> Result<MissionReport, MissionError> {
        for spec in robots {
            self.run_one(spec)?;
        }
        self.report()
    }

    /// Build the report over everything run so far.
    pub fn report(&self) -> Result<MissionReport, MissionError> {
        build_report(&self.store, &self.surface, &self.robots)
    }
}

/// Run a whole validated plan on a fresh in-process store.
pub fn run_mission(plan: &MissionPlan) -> Result<MissionReport, MissionError> {
    MissionEngine::new(plan.surface).run(&plan.robots)
}
