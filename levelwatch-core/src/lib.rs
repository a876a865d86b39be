//! Board-agnostic core logic for the level meter watch face
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Sensor sample and tap types
//! - Tilt mapping for the gauge
//! - Two-point calibration state machine
//! - Live sampling window
//! - Tap gesture dispatch and the `Levelmeter` controller
//! - Gauge model and drawing
//! - Offset persistence over [`levelwatch_hal::FlashStorage`]
//! - Configuration type definitions
//!
//! Every handler returns [`command::Commands`] instead of touching hardware,
//! so the whole core can be driven by synthetic events in tests.

#![no_std]
#![deny(unsafe_code)]

pub mod calibration;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod gauge;
pub mod levelmeter;
pub mod persist;
pub mod sampling;
pub mod sensor;
pub mod tilt;
pub mod traits;

pub use calibration::{CalibrationEngine, CalibrationOffset, CalibrationPhase};
pub use command::{Command, Commands, Prompt, SensorCommand};
pub use config::LevelmeterConfig;
pub use dispatch::GestureDispatcher;
pub use levelmeter::Levelmeter;
pub use sampling::SamplingSession;
pub use sensor::{RawSample, SamplingRate, TapAxis, TapDirection, TapEvent, SENTINEL};
