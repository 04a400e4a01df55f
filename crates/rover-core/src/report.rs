//! Mission report aggregation.
//!
//! Read-only derivation over the frozen journeys and the danger-zone
//! registry. `lost_robots` counts danger zones discovered, not robots
//! marked lost: a robot stopped by the registry never adds an entry, and
//! each actual loss creates at most one, so the two counts agree by
//! construction within a mission.

use serde::Serialize;

use rover_logic::orientation::Heading;
use rover_logic::robot::JourneyStep;
use rover_logic::stats;
use rover_logic::surface::Surface;

use crate::runner::MissionError;
use crate::store::{DangerZone, MissionStore, RobotId};

/// One explored cell in the mission-level union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExploredCell {
    pub x: i32,
    pub y: i32,
}

/// Final pose summary for one robot, taken from the last journey step.
/// For a lost robot that is the out-of-bounds terminal step.
#[derive(Debug, Clone, Serialize)]
pub struct RobotResume {
    pub position: [i32; 2],
    pub heading: Heading,
    pub lost: bool,
}

/// One robot's section of the report.
#[derive(Debug, Clone, Serialize)]
pub struct RobotLog {
    pub robot_id: u32,
    pub resume: RobotResume,
    pub total_explored_surface: String,
    pub journey: Vec<JourneyStep>,
}

/// The full mission report returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct MissionReport {
    pub sent_robots: usize,
    pub lost_robots: usize,
    pub surface_dimensions: [i32; 2],
    pub surface_total_area: String,
    pub total_explored_surface: String,
    pub explored_surface: Vec<ExploredCell>,
    pub danger_zones: Vec<DangerZone>,
    pub robot_logs: Vec<RobotLog>,
}

/// Build the report for a finished mission.
pub fn build_report<S: MissionStore>(
    store: &S,
    surface: &Surface,
    robots: &[RobotId],
) -> Result<MissionReport, MissionError> {
    let area = surface.area();

    let mut journeys = Vec::with_capacity(robots.len());
    for &id in robots {
        journeys.push((id, store.read_journey(id)?));
    }

    let union = stats::union_cells(journeys.iter().map(|(_, j)| j.as_slice()), surface);
    let explored_surface: Vec<ExploredCell> = union
        .iter()
        .map(|&(x, y)| ExploredCell { x, y })
        .collect();

    let mut robot_logs = Vec::with_capacity(journeys.len());
    for (id, journey) in &journeys {
        let covered = stats::visited_cells(journey, surface, true).len();
        // Journeys always hold at least step 0 for a robot that ran.
        let last = journey
            .last()
            .ok_or(MissionError::NoSafeStep { robot: id.0 })?;

        robot_logs.push(RobotLog {
            robot_id: id.0,
            resume: RobotResume {
                position: [last.x, last.y],
                heading: last.heading,
                lost: last.lost,
            },
            total_explored_surface: stats::coverage_label(covered, area),
            journey: journey.clone(),
        });
    }

    let danger_zones = store.danger_zones()?;

    Ok(MissionReport {
        sent_robots: robots.len(),
        lost_robots: danger_zones.len(),
        surface_dimensions: [surface.x, surface.y],
        surface_total_area: stats::area_label(surface),
        total_explored_surface: stats::coverage_label(explored_surface.len(), area),
        explored_surface,
        danger_zones,
        robot_logs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::run_robot;
    use crate::store::WorldStore;
    use rover_logic::input::RobotSpec;
    use rover_logic::robot::parse_program;

    fn run_mission(surface: Surface, robots: &[(i32, i32, Heading, &str)]) -> MissionReport {
        let mut store = WorldStore::new();
        let mut ids = Vec::new();
        for (batch, &(x, y, heading, program)) in robots.iter().enumerate() {
            let spec = RobotSpec {
                x,
                y,
                heading,
                program: parse_program(program).unwrap(),
            };
            let id = store.create_robot(batch as u32).unwrap();
            run_robot(&mut store, &surface, id, &spec).unwrap();
            ids.push(id);
        }
        build_report(&store, &surface, &ids).unwrap()
    }

    #[test]
    fn square_patrol_covers_four_cells() {
        let report = run_mission(Surface::new(5, 3), &[(1, 1, Heading::East, "RFRFRFRF")]);
        let log = &report.robot_logs[0];

        assert_eq!(log.resume.position, [1, 1]);
        assert_eq!(log.resume.heading, Heading::East);
        assert!(!log.resume.lost);
        assert_eq!(log.journey.len(), 9);
        assert_eq!(log.total_explored_surface, "4 m2 | 26%");

        let cells: Vec<(i32, i32)> = report
            .explored_surface
            .iter()
            .map(|c| (c.x, c.y))
            .collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn lost_robots_counts_zones_not_losses() {
        // Two robots lost, but the second at an already-known zone would be
        // suppressed; send them off different edges to get two zones, then
        // a third protected robot.
        let report = run_mission(
            Surface::new(5, 3),
            &[
                (3, 3, Heading::North, "F"),
                (0, 0, Heading::South, "F"),
                (3, 3, Heading::North, "F"),
            ],
        );
        assert_eq!(report.sent_robots, 3);
        assert_eq!(report.lost_robots, 2);
        assert_eq!(report.danger_zones.len(), 2);
        assert!(!report.robot_logs[2].resume.lost);
    }

    #[test]
    fn resume_of_lost_robot_is_the_terminal_step() {
        let report = run_mission(Surface::new(5, 3), &[(3, 3, Heading::North, "F")]);
        let log = &report.robot_logs[0];
        assert_eq!(log.resume.position, [3, 4]);
        assert!(log.resume.lost);
    }

    #[test]
    fn surface_labels() {
        let report = run_mission(Surface::new(5, 3), &[(1, 1, Heading::East, "F")]);
        assert_eq!(report.surface_dimensions, [5, 3]);
        assert_eq!(report.surface_total_area, "15 m2");
        assert_eq!(report.total_explored_surface, "2 m2 | 13%");
    }

    #[test]
    fn report_serializes_headings_as_letters() {
        let report = run_mission(Surface::new(5, 3), &[(3, 3, Heading::North, "F")]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["danger_zones"][0]["heading"], "N");
        assert_eq!(json["robot_logs"][0]["resume"]["heading"], "N");
    }
}
