//! Two-point zero-offset calibration
//!
//! The user places the watch flat, a first pose is captured, the watch is
//! rotated by 180° about the vertical axis and a second pose is captured.
//! Gravity bias is symmetric between the two poses, so the true zero lies at
//! their midpoint.

pub mod engine;
pub mod offset;

pub use engine::{CalibrationEngine, CalibrationEvent, CalibrationPhase, CalibrationState};
pub use offset::CalibrationOffset;
