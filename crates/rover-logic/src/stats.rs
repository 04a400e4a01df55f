//! Explored-surface aggregation and coverage labels.
//!
//! Pure set math over journey steps. Cells outside the surface (the
//! terminal step of a lost robot) never count as explored, and the
//! mission-level union is ordered ascending by x then y so reports are
//! deterministic regardless of visit order.

use std::collections::BTreeSet;

use crate::robot::JourneyStep;
use crate::surface::Surface;

/// A distinct visited cell.
pub type Cell = (i32, i32);

/// Distinct in-bounds cells touched by one journey.
///
/// With `only_safe`, steps flagged lost are skipped — that is the per-robot
/// counting rule, so a lost robot's terminal step never inflates its score.
pub fn visited_cells(steps: &[JourneyStep], surface: &Surface, only_safe: bool) -> BTreeSet<Cell> {
    steps
        .iter()
        .filter(|s| !only_safe || !s.lost)
        .filter(|s| surface.contains(s.x, s.y))
        .map(|s| (s.x, s.y))
        .collect()
}

/// Union of several robots' visited cells, already deduplicated and ordered.
pub fn union_cells<'a, I>(journeys: I, surface: &Surface) -> BTreeSet<Cell>
where
    I: IntoIterator<Item = &'a [JourneyStep]>,
{
    let mut all = BTreeSet::new();
    for steps in journeys {
        all.extend(visited_cells(steps, surface, false));
    }
    all
}

/// Human-readable coverage: `"<n> m2 | <pct>%"`.
///
/// The percentage truncates toward zero, matching the report format
/// (4 cells of 15 is 26%, not 27%).
pub fn coverage_label(cells: usize, area: i32) -> String {
    let pct = if area > 0 {
        (100 * cells as i64) / area as i64
    } else {
        0
    };
    format!("{} m2 | {}%", cells, pct)
}

/// Area label for the whole surface: `"<area> m2"`.
pub fn area_label(surface: &Surface) -> String {
    format!("{} m2", surface.area())
}
