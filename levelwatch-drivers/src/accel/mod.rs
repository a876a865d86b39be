//! Accelerometer driver implementations

pub mod lis2dh12;

pub use lis2dh12::{DriverError, Lis2dh12, Lis2dh12Config};
