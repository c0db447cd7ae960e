//! timeline-rs: interval timeline layout and rendering engine.
//!
//! This crate turns rows of labeled, time-stamped intervals into a
//! pixel-accurate stacked Gantt scene: domain inference, time scaling, lane
//! stacking, color resolution, per-interval geometry, axis ticks, chrome
//! decorations, and an interaction model with tooltip placement and a
//! clamped pan offset. Drawing stays behind a backend-agnostic primitive
//! frame so Cairo, retained-mode UIs, or headless tests consume the same
//! contract.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{TimelineConfig, TimelineEngine, TimelineScene};
pub use error::{TimelineError, TimelineResult};
