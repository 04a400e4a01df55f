//! Headless Mission Harness
//!
//! Validates rover logic and the mission engine without any transport or
//! external storage. Runs entirely in-process.
//!
//! Usage:
//!   cargo run -p rover-simtest
//!   cargo run -p rover-simtest -- --verbose

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rover_core::engine::{run_mission, MissionEngine};
use rover_core::store::DangerZone;
use rover_logic::input::{validate, MissionRequest, RobotSpec};
use rover_logic::orientation::{Heading, Spin};
use rover_logic::robot::{parse_program, Instruction, RobotState};
use rover_logic::surface::Surface;

// ── Sample mission (same JSON a transport layer would post) ─────────────
const SAMPLE_MISSION_JSON: &str = include_str!("../../../data/sample_mission.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Rover Mission Harness ===\n");

    let mut results = Vec::new();

    // 1. Orientation arithmetic sweep
    results.extend(validate_orientation(verbose));

    // 2. Pose transition invariants
    results.extend(validate_transitions(verbose));

    // 3. Hazard learning across sequential robots
    results.extend(validate_hazard_learning(verbose));

    // 4. Square patrol and coverage math
    results.extend(validate_square_patrol(verbose));

    // 5. Sample mission JSON end to end
    results.extend(validate_sample_mission(verbose));

    // 6. Randomized invariant sweep
    results.extend(validate_random_missions(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Orientation ──────────────────────────────────────────────────────

fn validate_orientation(_verbose: bool) -> Vec<TestResult> {
    println!("--- Orientation ---");
    let mut results = Vec::new();

    let mut h = Heading::North;
    for _ in 0..4 {
        h = h.turn(Spin::Right);
    }
    results.push(check(
        "right_cycle_closes",
        h == Heading::North,
        format!("N after 4 right turns, got {:?}", h),
    ));

    let mut h = Heading::North;
    for _ in 0..4 {
        h = h.turn(Spin::Left);
    }
    results.push(check(
        "left_cycle_closes",
        h == Heading::North,
        format!("N after 4 left turns, got {:?}", h),
    ));

    results.push(check(
        "wraps_at_both_ends",
        Heading::West.turn(Spin::Right) == Heading::North
            && Heading::North.turn(Spin::Left) == Heading::West,
        "W+R=N, N+L=W".into(),
    ));

    let deltas_ok = [Heading::North, Heading::East, Heading::South, Heading::West]
        .iter()
        .all(|h| {
            let (dx, dy) = h.step_delta();
            dx.abs() + dy.abs() == 1
        });
    results.push(check(
        "deltas_are_unit_moves",
        deltas_ok,
        "every heading moves one axis by one unit".into(),
    ));

    results
}

// ── 2. Pose transitions ─────────────────────────────────────────────────

fn validate_transitions(_verbose: bool) -> Vec<TestResult> {
    println!("--- Pose Transitions ---");
    let mut results = Vec::new();

    let mut robot = RobotState::new(2, 2, Heading::North);
    robot.turn(Spin::Right);
    results.push(check(
        "turn_keeps_position",
        (robot.x, robot.y) == (2, 2) && robot.heading == Heading::East,
        format!("({}, {}) facing {:?}", robot.x, robot.y, robot.heading),
    ));

    let target = robot.forward_target();
    results.push(check(
        "forward_target_is_adjacent",
        target == (3, 2),
        format!("east of (2, 2) is {:?}", target),
    ));

    let surface = Surface::new(5, 3);
    results.push(check(
        "upper_edge_is_on_surface",
        surface.contains(5, 3) && !surface.contains(6, 3) && !surface.contains(5, 4),
        "(5, 3) in, (6, 3) and (5, 4) out".into(),
    ));

    results
}

// ── 3. Hazard learning ──────────────────────────────────────────────────

fn validate_hazard_learning(verbose: bool) -> Vec<TestResult> {
    println!("--- Hazard Learning ---");
    let mut results = Vec::new();

    let spec = RobotSpec {
        x: 3,
        y: 2,
        heading: Heading::North,
        program: parse_program("FRRFLLFFRRFLL").unwrap(),
    };

    let mut engine = MissionEngine::new(Surface::new(5, 3));
    let report = engine.run(&[spec.clone(), spec]).unwrap();

    let first = &report.robot_logs[0];
    results.push(check(
        "first_robot_lost_off_north_edge",
        first.resume.lost && first.resume.position == [3, 4],
        format!("resume {:?} lost={}", first.resume.position, first.resume.lost),
    ));

    let zone_ok = report.danger_zones
        == vec![DangerZone {
            x: 3,
            y: 3,
            heading: Heading::North,
        }];
    results.push(check(
        "zone_is_last_safe_pose",
        zone_ok,
        format!("{:?}", report.danger_zones),
    ));

    let second = &report.robot_logs[1];
    let steps: Vec<u32> = second.journey.iter().map(|s| s.step).collect();
    results.push(check(
        "second_robot_survives_with_gap",
        !second.resume.lost && !steps.contains(&8) && steps.contains(&13),
        format!("steps {:?}", steps),
    ));

    results.push(check(
        "lost_count_equals_zone_count",
        report.lost_robots == 1,
        format!("lost_robots = {}", report.lost_robots),
    ));

    if verbose {
        println!("  second robot journey: {:?}", second.journey);
    }

    results
}

// ── 4. Square patrol ────────────────────────────────────────────────────

fn validate_square_patrol(_verbose: bool) -> Vec<TestResult> {
    println!("--- Square Patrol ---");
    let mut results = Vec::new();

    let mut engine = MissionEngine::new(Surface::new(5, 3));
    let report = engine
        .run(&[RobotSpec {
            x: 1,
            y: 1,
            heading: Heading::East,
            program: parse_program("RFRFRFRF").unwrap(),
        }])
        .unwrap();

    let log = &report.robot_logs[0];
    results.push(check(
        "returns_to_start_pose",
        log.resume.position == [1, 1] && log.resume.heading == Heading::East && !log.resume.lost,
        format!("{:?} facing {:?}", log.resume.position, log.resume.heading),
    ));

    results.push(check(
        "covers_four_cells_at_26_percent",
        log.total_explored_surface == "4 m2 | 26%",
        log.total_explored_surface.clone(),
    ));

    let cells: Vec<(i32, i32)> = report
        .explored_surface
        .iter()
        .map(|c| (c.x, c.y))
        .collect();
    results.push(check(
        "explored_cells_ordered_x_then_y",
        cells == vec![(0, 0), (0, 1), (1, 0), (1, 1)],
        format!("{:?}", cells),
    ));

    results
}

// ── 5. Sample mission JSON ──────────────────────────────────────────────

fn validate_sample_mission(verbose: bool) -> Vec<TestResult> {
    println!("--- Sample Mission ---");
    let mut results = Vec::new();

    let request: MissionRequest = match serde_json::from_str(SAMPLE_MISSION_JSON) {
        Ok(r) => r,
        Err(e) => {
            results.push(check(
                "sample_parses",
                false,
                format!("JSON parse error: {}", e),
            ));
            return results;
        }
    };

    let plan = match validate(&request) {
        Ok(p) => p,
        Err(e) => {
            results.push(check("sample_validates", false, format!("{}", e)));
            return results;
        }
    };

    let report = match run_mission(&plan) {
        Ok(r) => r,
        Err(e) => {
            results.push(check("sample_runs", false, format!("{}", e)));
            return results;
        }
    };

    results.push(check(
        "one_robot_lost_of_three",
        report.sent_robots == 3 && report.lost_robots == 1,
        format!("sent {}, lost {}", report.sent_robots, report.lost_robots),
    ));

    let third = &report.robot_logs[2];
    results.push(check(
        "third_robot_saved_by_registry",
        !third.resume.lost
            && third.resume.position == [2, 3]
            && third.resume.heading == Heading::South,
        format!("{:?} facing {:?}", third.resume.position, third.resume.heading),
    ));

    results.push(check(
        "mission_coverage",
        report.total_explored_surface == "9 m2 | 60%",
        report.total_explored_surface.clone(),
    ));

    if verbose {
        println!(
            "  report: {}",
            serde_json::to_string_pretty(&report).unwrap_or_default()
        );
    }

    results
}

// ── 6. Randomized sweep ─────────────────────────────────────────────────

fn validate_random_missions(verbose: bool) -> Vec<TestResult> {
    println!("--- Randomized Sweep ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(0x526f766572);

    let headings = [Heading::North, Heading::East, Heading::South, Heading::West];
    let letters = [
        Instruction::Left,
        Instruction::Right,
        Instruction::Forward,
    ];

    let mut missions = 0;
    let mut robots_run = 0;
    let mut violations = Vec::new();

    for _ in 0..200 {
        let surface = Surface::new(rng.gen_range(2..=8), rng.gen_range(2..=8));
        let robot_count = rng.gen_range(1..=4);
        let specs: Vec<RobotSpec> = (0..robot_count)
            .map(|_| RobotSpec {
                x: rng.gen_range(0..=surface.x),
                y: rng.gen_range(0..=surface.y),
                heading: headings[rng.gen_range(0..headings.len())],
                program: (0..rng.gen_range(0..=30))
                    .map(|_| letters[rng.gen_range(0..letters.len())])
                    .collect(),
            })
            .collect();

        let mut engine = MissionEngine::new(surface);
        let report = match engine.run(&specs) {
            Ok(r) => r,
            Err(e) => {
                violations.push(format!("mission failed: {}", e));
                break;
            }
        };

        missions += 1;
        robots_run += specs.len();

        if report.lost_robots != report.danger_zones.len() {
            violations.push("lost_robots != zone count".into());
        }
        for zone in &report.danger_zones {
            if !surface.contains(zone.x, zone.y) {
                violations.push(format!("zone off surface: {:?}", zone));
            }
        }

        for (spec, log) in specs.iter().zip(&report.robot_logs) {
            check_journey(&surface, spec, &log.journey, &mut violations);
        }
    }

    results.push(check(
        "random_missions_ran",
        missions == 200,
        format!("{} missions, {} robots", missions, robots_run),
    ));
    results.push(check(
        "no_invariant_violations",
        violations.is_empty(),
        if violations.is_empty() {
            "journeys well-formed".into()
        } else {
            violations[..violations.len().min(3)].join("; ")
        },
    ));

    if verbose && !violations.is_empty() {
        for v in &violations {
            println!("  violation: {}", v);
        }
    }

    results
}

/// Journey invariants that must hold for any program on any surface.
fn check_journey(
    surface: &Surface,
    spec: &RobotSpec,
    journey: &[rover_logic::robot::JourneyStep],
    violations: &mut Vec<String>,
) {
    let Some(first) = journey.first() else {
        violations.push("journey missing step 0".into());
        return;
    };
    if first.step != 0
        || (first.x, first.y) != (spec.x, spec.y)
        || first.heading != spec.heading
        || first.lost
    {
        violations.push(format!("bad step 0: {:?}", first));
    }

    for pair in journey.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if b.step <= a.step {
            violations.push(format!("steps not increasing: {} then {}", a.step, b.step));
        }
        if a.lost {
            violations.push("step recorded after loss".into());
        }

        let moved = (a.x, a.y) != (b.x, b.y);
        let turned = a.heading != b.heading;
        if moved && turned {
            violations.push(format!("move and turn in one step: {:?} -> {:?}", a, b));
        } else if moved {
            let (dx, dy) = (b.x - a.x, b.y - a.y);
            if dx.abs() + dy.abs() != 1 || (dx, dy) != a.heading.step_delta() {
                violations.push(format!("non-unit move: {:?} -> {:?}", a, b));
            }
        } else if turned {
            let quarter = b.heading == a.heading.turn(Spin::Left)
                || b.heading == a.heading.turn(Spin::Right);
            if !quarter {
                violations.push(format!("non-quarter turn: {:?} -> {:?}", a, b));
            }
        }
    }

    for (idx, step) in journey.iter().enumerate() {
        let is_last = idx == journey.len() - 1;
        if step.lost && !is_last {
            violations.push("lost step is not terminal".into());
        }
        if !step.lost && !surface.contains(step.x, step.y) {
            violations.push(format!("unlost step off surface: {:?}", step));
        }
    }
}
