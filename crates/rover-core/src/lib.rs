//! Rover Core - Mission Engine
//!
//! Drives robots one at a time through their instruction programs against a
//! bounded surface, learns which poses cause signal loss, and aggregates
//! everything into a mission report.
//!
//! # Architecture
//!
//! Storage is a row store over `hecs`: robots, journey steps, and danger
//! zones are each one entity carrying a single row component — the same
//! shape a relational backend would give them. The engine only talks to
//! storage through the [`store::MissionStore`] trait, so the in-process
//! [`store::WorldStore`] can be swapped for a transactional backend without
//! touching the run loop.
//!
//! # Example
//!
//! ```rust,no_run
//! use rover_core::prelude::*;
//! use rover_logic::input::{validate, MissionRequest};
//!
//! let request: MissionRequest = serde_json::from_str("{ ... }").unwrap();
//! let plan = validate(&request).unwrap();
//!
//! let mut engine = MissionEngine::new(plan.surface);
//! let report = engine.run(&plan.robots).unwrap();
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! ```

pub mod engine;
pub mod persistence;
pub mod report;
pub mod runner;
pub mod store;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::engine::MissionEngine;
    pub use crate::report::MissionReport;
    pub use crate::runner::MissionError;
    pub use crate::store::{DangerZone, MissionStore, RobotId, WorldStore};
}
