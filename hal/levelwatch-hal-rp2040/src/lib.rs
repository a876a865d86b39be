//! RP2040-specific HAL for the level meter firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `levelwatch-hal` traits:
//!
//! - Flash storage driver (implements `levelwatch_hal::FlashStorage`)

#![no_std]

pub mod flash;

// Re-export shared traits from levelwatch-hal for convenience
pub use levelwatch_hal::{FlashStorage as FlashStorageTrait, StorageKey};
