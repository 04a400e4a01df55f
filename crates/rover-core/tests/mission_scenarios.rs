//! End-to-end mission scenarios: raw request in, report out.

use rover_core::engine::run_mission;
use rover_core::store::DangerZone;
use rover_logic::input::{validate, MissionRequest};
use rover_logic::orientation::Heading;

fn plan_from_json(json: &str) -> rover_logic::input::MissionPlan {
    let request: MissionRequest = serde_json::from_str(json).expect("request should parse");
    validate(&request).expect("request should validate")
}

#[test]
fn hazard_learning_protects_the_second_robot() {
    let plan = plan_from_json(
        r#"{
            "surface": { "x": 5, "y": 3 },
            "robots": [
                { "x": 3, "y": 2, "compass": "N", "instructions": "FRRFLLFFRRFLL" },
                { "x": 3, "y": 2, "compass": "N", "instructions": "FRRFLLFFRRFLL" }
            ]
        }"#,
    );
    let report = run_mission(&plan).unwrap();

    // First robot loses signal leaving (3, 3) heading north the second time.
    let first = &report.robot_logs[0];
    assert!(first.resume.lost);
    assert_eq!(first.resume.position, [3, 4]);
    assert_eq!(first.journey.last().unwrap().step, 8);

    assert_eq!(
        report.danger_zones,
        vec![DangerZone {
            x: 3,
            y: 3,
            heading: Heading::North
        }]
    );

    // Identical second robot survives: the repeat of the fatal move is
    // suppressed, leaving a gap at step 8, and the program runs out.
    let second = &report.robot_logs[1];
    assert!(!second.resume.lost);
    let steps: Vec<u32> = second.journey.iter().map(|s| s.step).collect();
    assert!(!steps.contains(&8));
    assert_eq!(*steps.last().unwrap(), 13);
    assert_eq!(second.resume.position, [3, 2]);
    assert_eq!(second.resume.heading, Heading::North);

    // One zone, even though the pose was fatal twice over.
    assert_eq!(report.lost_robots, 1);
}

#[test]
fn square_patrol_returns_home() {
    let plan = plan_from_json(
        r#"{
            "surface": { "x": 5, "y": 3 },
            "robots": [{ "x": 1, "y": 1, "compass": "E", "instructions": "RFRFRFRF" }]
        }"#,
    );
    let report = run_mission(&plan).unwrap();
    let log = &report.robot_logs[0];

    assert_eq!(log.resume.position, [1, 1]);
    assert_eq!(log.resume.heading, Heading::East);
    assert!(!log.resume.lost);
    assert_eq!(log.total_explored_surface, "4 m2 | 26%");

    let cells: Vec<(i32, i32)> = report
        .explored_surface
        .iter()
        .map(|c| (c.x, c.y))
        .collect();
    assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
}

#[test]
fn three_robot_mission_matches_expected_outcomes() {
    let plan = plan_from_json(
        r#"{
            "surface": { "X": 5, "Y": 3 },
            "robots": [
                { "X": 1, "Y": 1, "Compass": "E", "Instructions": "RFRFRFRF" },
                { "X": 3, "Y": 2, "Compass": "N", "Instructions": "FRRFLLFFRRFLL" },
                { "X": 0, "Y": 3, "Compass": "W", "Instructions": "LLFFFLFLFL" }
            ]
        }"#,
    );
    let report = run_mission(&plan).unwrap();

    assert_eq!(report.sent_robots, 3);
    assert_eq!(report.lost_robots, 1);
    assert_eq!(report.surface_total_area, "15 m2");

    // Robot 1 patrols its square, robot 2 is lost going north off (3, 3),
    // robot 3 is saved by robot 2's danger zone and ends at (2, 3) south.
    assert!(!report.robot_logs[0].resume.lost);
    assert!(report.robot_logs[1].resume.lost);
    let third = &report.robot_logs[2];
    assert!(!third.resume.lost);
    assert_eq!(third.resume.position, [2, 3]);
    assert_eq!(third.resume.heading, Heading::South);

    // Union of all in-bounds visits.
    assert_eq!(report.explored_surface.len(), 9);
    assert_eq!(report.total_explored_surface, "9 m2 | 60%");
}

#[test]
fn mixed_case_input_normalizes() {
    let plan = plan_from_json(
        r#"{
            "surface": { "x": 5, "y": 3 },
            "robots": [{ "x": 1, "y": 1, "compass": "e", "instructions": "rfrfrfrf" }]
        }"#,
    );
    let report = run_mission(&plan).unwrap();
    assert_eq!(report.robot_logs[0].resume.heading, Heading::East);
    assert_eq!(report.robot_logs[0].journey.len(), 9);
}

#[test]
fn report_json_shape() {
    let plan = plan_from_json(
        r#"{
            "surface": { "x": 5, "y": 3 },
            "robots": [{ "x": 3, "y": 3, "compass": "N", "instructions": "F" }]
        }"#,
    );
    let report = run_mission(&plan).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["sent_robots"], 1);
    assert_eq!(json["lost_robots"], 1);
    assert_eq!(json["surface_dimensions"][0], 5);
    assert_eq!(json["danger_zones"][0]["x"], 3);
    assert_eq!(json["danger_zones"][0]["heading"], "N");
    assert_eq!(json["robot_logs"][0]["journey"][1]["lost"], true);
}
