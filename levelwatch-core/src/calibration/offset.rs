//! Zero offset produced by calibration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sensor::RawSample;

/// Per-axis bias subtracted from raw readings
///
/// `(0, 0)` until a calibration has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationOffset {
    pub offset_x: i32,
    pub offset_y: i32,
}

impl CalibrationOffset {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(offset_x: i32, offset_y: i32) -> Self {
        Self { offset_x, offset_y }
    }

    /// Midpoint of two opposite poses, truncating toward zero per axis
    pub fn midpoint(first: &RawSample, second: &RawSample) -> Self {
        Self {
            offset_x: (first.x as i32 + second.x as i32) / 2,
            offset_y: (first.y as i32 + second.y as i32) / 2,
        }
    }

    /// Subtract the offset from a sample's X and Y axes
    ///
    /// Z is not calibrated and is returned unchanged.
    pub fn correct(&self, sample: &RawSample) -> (i32, i32, i32) {
        (
            sample.x as i32 - self.offset_x,
            sample.y as i32 - self.offset_y,
            sample.z as i32,
        )
    }
}
