//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in levelwatch-core:
//!
//! - Accelerometers (LIS2DH12 over async I2C)

#![no_std]
#![deny(unsafe_code)]

pub mod accel;
