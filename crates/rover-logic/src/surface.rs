//! The bounded rectangular surface a mission operates on.

use serde::{Deserialize, Serialize};

/// Immutable mission surface. Cells run from (0, 0) to (x, y) inclusive.
///
/// Created once per mission from validated input; never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    pub x: i32,
    pub y: i32,
}

impl Surface {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Inclusive bounds check — the upper edge cells are on the surface.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x <= self.x && y >= 0 && y <= self.y
    }

    /// Total area in square meters, the denominator for coverage ratios.
    pub fn area(&self) -> i32 {
        self.x * self.y
    }
}
