//! Pure simulation logic for rover missions.
//!
//! This crate contains all mission logic that is independent of any storage
//! backend or runtime. Functions take plain data and return results, making
//! them unit-testable and portable between the in-process engine, the
//! headless harness, and any future transport layer.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`orientation`] | Cardinal headings, left/right turns, forward deltas |
//! | [`surface`] | Bounded rectangular mission surface |
//! | [`robot`] | Robot pose state machine, instructions, journey steps |
//! | [`input`] | Mission request validation and normalization |
//! | [`stats`] | Explored-surface aggregation and coverage labels |

pub mod input;
pub mod orientation;
pub mod robot;
pub mod stats;
pub mod surface;
