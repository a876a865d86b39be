//! Accelerometer sample and tap types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reserved out-of-range X value marking "no live data"
///
/// Real readings stay within ±4096 (±4 g in milli-g), so this value can
/// never be produced by the sensor.
pub const SENTINEL: i16 = 10_000;

/// One accelerometer reading in milli-g
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl RawSample {
    /// The "no live data" marker
    pub const NO_DATA: Self = Self {
        x: SENTINEL,
        y: 0,
        z: 0,
    };

    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Check whether this sample carries the sentinel marker
    pub const fn is_sentinel(&self) -> bool {
        self.x == SENTINEL
    }
}

/// Sensor output data rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SamplingRate {
    Hz10,
    #[default]
    Hz25,
    Hz50,
    Hz100,
}

impl SamplingRate {
    pub const fn hz(self) -> u32 {
        match self {
            SamplingRate::Hz10 => 10,
            SamplingRate::Hz25 => 25,
            SamplingRate::Hz50 => 50,
            SamplingRate::Hz100 => 100,
        }
    }

    /// Interval between two samples in milliseconds
    pub const fn period_ms(self) -> u32 {
        1000 / self.hz()
    }
}

/// Accelerometer axis a tap was detected on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapAxis {
    /// In-plane, along the watch face's width
    X,
    /// In-plane, along the watch face's height
    Y,
    /// Perpendicular to the face
    Z,
}

impl TapAxis {
    /// Tap on the face itself rather than on an edge
    pub const fn is_face(self) -> bool {
        matches!(self, TapAxis::Z)
    }
}

/// Sign of the acceleration that triggered the tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapDirection {
    Positive,
    Negative,
}

/// Discrete tap gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapEvent {
    pub axis: TapAxis,
    pub direction: TapDirection,
}

impl TapEvent {
    pub const fn new(axis: TapAxis, direction: TapDirection) -> Self {
        Self { axis, direction }
    }
}
