//! Hardware abstraction traits
//!
//! These traits define the interface between the level meter logic and
//! sensor-specific implementations.

pub mod accel;

pub use accel::Accelerometer;
