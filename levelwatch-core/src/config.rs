//! Configuration types
//!
//! Defaults reproduce the stock watch face: a 20 s calibration with captures
//! at 10 s and 1 s remaining, a 60 s live window at 10 Hz and a 41×41 gauge.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sensor::SamplingRate;

/// Tick indices of the calibration run
///
/// The countdown starts at `start_countdown` and decreases once per tick.
/// Poses are captured when it equals `first_capture_at` and
/// `second_capture_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationSchedule {
    pub start_countdown: u8,
    pub first_capture_at: u8,
    pub second_capture_at: u8,
}

impl Default for CalibrationSchedule {
    fn default() -> Self {
        Self {
            start_countdown: 20,
            first_capture_at: 10,
            second_capture_at: 1,
        }
    }
}

/// Gauge layout in pixels, relative to the gauge's top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaugeGeometry {
    pub center_x: i32,
    pub center_y: i32,
    pub outer_radius: u32,
    pub inner_radius: u32,
    pub dot_radius: u32,
    /// Raw reading that maps to full deflection before the sine warp
    pub scale: f32,
}

impl Default for GaugeGeometry {
    fn default() -> Self {
        Self {
            center_x: 20,
            center_y: 20,
            outer_radius: 20,
            inner_radius: 10,
            dot_radius: 3,
            scale: 1000.0,
        }
    }
}

impl GaugeGeometry {
    /// Side length of the square the gauge occupies
    pub fn size(&self) -> u32 {
        self.outer_radius * 2 + 1
    }
}

/// Complete level meter configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelmeterConfig {
    pub schedule: CalibrationSchedule,
    /// Deliveries in one live sampling window
    pub live_samples: u16,
    /// Sampling rate of the live window
    pub live_rate: SamplingRate,
    pub gauge: GaugeGeometry,
}

impl Default for LevelmeterConfig {
    fn default() -> Self {
        Self {
            schedule: CalibrationSchedule::default(),
            live_samples: 600,
            live_rate: SamplingRate::Hz10,
            gauge: GaugeGeometry::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Capture points must satisfy start > first > second >= 1
    InvalidSchedule,
    /// A live window needs at least one delivery
    EmptyLiveWindow,
    /// Radii must be non-zero and nested dot < inner < outer
    InvalidGauge,
    /// Scale must be a positive finite number
    InvalidScale,
}

impl LevelmeterConfig {
    /// Check the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.schedule;
        if !(s.start_countdown > s.first_capture_at
            && s.first_capture_at > s.second_capture_at
            && s.second_capture_at >= 1)
        {
            return Err(ConfigError::InvalidSchedule);
        }

        if self.live_samples == 0 {
            return Err(ConfigError::EmptyLiveWindow);
        }

        let g = &self.gauge;
        if g.dot_radius == 0 || g.dot_radius >= g.inner_radius || g.inner_radius >= g.outer_radius
        {
            return Err(ConfigError::InvalidGauge);
        }

        if !(g.scale.is_finite() && g.scale > 0.0) {
            return Err(ConfigError::InvalidScale);
        }

        Ok(())
    }
}
