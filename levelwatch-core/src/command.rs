//! Side effects requested by the state machines
//!
//! The core never talks to hardware. Handlers return a short list of
//! commands which the host (firmware task or test) carries out in order.

use heapless::Vec;

use crate::calibration::CalibrationOffset;
use crate::sensor::SamplingRate;

/// Upper bound on commands produced by a single handler call
pub const MAX_COMMANDS: usize = 6;

/// Commands produced by one handler call, in execution order
pub type Commands = Vec<Command, MAX_COMMANDS>;

/// How sensor data should be delivered while subscribed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feed {
    /// Every sample, unfiltered, at the current sampling rate
    Raw,
    /// Batches of `samples_per_update` samples, one delivery per batch
    Batched { samples_per_update: u8 },
}

/// Requests for the sensor service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorCommand {
    Subscribe(Feed),
    SetSamplingRate(SamplingRate),
    Unsubscribe,
}

/// User-facing calibration prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prompt {
    PlaceFlat,
    Rotate,
    Done,
    NoData,
}

impl Prompt {
    pub const fn as_str(self) -> &'static str {
        match self {
            Prompt::PlaceFlat => "place watch flat",
            Prompt::Rotate => "rotate 180deg",
            Prompt::Done => "done",
            Prompt::NoData => "no data",
        }
    }
}

/// A single side effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Sensor(SensorCommand),
    /// Write the offset to durable storage (fire-and-forget)
    PersistOffset(CalibrationOffset),
    /// Replace the level meter text line
    Prompt(Prompt),
    /// Mark the gauge dirty
    Redraw,
}

/// Append a command, dropping it if the list is full
///
/// `MAX_COMMANDS` is sized for the longest handler sequence, so this never
/// drops in practice.
pub(crate) fn push(commands: &mut Commands, command: Command) {
    let _ = commands.push(command);
}
