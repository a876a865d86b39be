//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use heapless::Vec;

use levelwatch_core::{CalibrationOffset, RawSample, SensorCommand, TapEvent};

/// Largest batch the accelerometer task will accumulate
pub const MAX_BATCH: usize = 8;

/// One delivery of the sensor feed
pub type SampleBatch = Vec<RawSample, MAX_BATCH>;

/// Channel capacity for sample deliveries
const SAMPLE_CHANNEL_SIZE: usize = 4;

/// Channel capacity for tap events
const TAP_CHANNEL_SIZE: usize = 4;

/// Channel capacity for sensor commands
const SENSOR_CMD_CHANNEL_SIZE: usize = 4;

/// Sample deliveries from the accelerometer task
pub static SAMPLE_CHANNEL: Channel<CriticalSectionRawMutex, SampleBatch, SAMPLE_CHANNEL_SIZE> =
    Channel::new();

/// Tap gestures decoded from the click interrupt
pub static TAP_CHANNEL: Channel<CriticalSectionRawMutex, TapEvent, TAP_CHANNEL_SIZE> =
    Channel::new();

/// Sensor commands from the controller, in issue order
pub static SENSOR_CMD: Channel<CriticalSectionRawMutex, SensorCommand, SENSOR_CMD_CHANNEL_SIZE> =
    Channel::new();

/// Offset save request (latest value wins)
pub static OFFSET_SAVE: Signal<CriticalSectionRawMutex, CalibrationOffset> = Signal::new();

/// Signal that a new frame is ready to be drawn
pub static REDRAW: Signal<CriticalSectionRawMutex, ()> = Signal::new();
