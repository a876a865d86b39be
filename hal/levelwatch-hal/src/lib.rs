//! Levelwatch Hardware Abstraction Layer
//!
//! Traits that chip-specific HALs implement so the core logic can run
//! unchanged on the target and on the host.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  levelwatch-core / levelwatch-firmware  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  levelwatch-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          ┌──────────────────────┐
//!          │ levelwatch-hal-rp2040│
//!          └──────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`flash::FlashStorage`] - Persistent key-value storage

#![no_std]
#![deny(unsafe_code)]

pub mod flash;

pub use flash::{FlashError, FlashStorage, StorageKey};
