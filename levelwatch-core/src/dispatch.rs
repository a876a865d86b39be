//! Tap gesture dispatch
//!
//! A tap on the face starts a calibration, a tap on an edge opens a live
//! sampling window. Taps arriving while either is running are dropped.

use crate::calibration::CalibrationEngine;
use crate::command::Commands;
use crate::config::LevelmeterConfig;
use crate::sampling::SamplingSession;
use crate::sensor::{SamplingRate, TapEvent};

/// Routes tap gestures to the calibration engine or the sampling session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureDispatcher {
    live_samples: u16,
    live_rate: SamplingRate,
}

impl Default for GestureDispatcher {
    fn default() -> Self {
        Self::from_config(&LevelmeterConfig::default())
    }
}

impl GestureDispatcher {
    pub const fn new(live_samples: u16, live_rate: SamplingRate) -> Self {
        Self {
            live_samples,
            live_rate,
        }
    }

    pub fn from_config(config: &LevelmeterConfig) -> Self {
        Self::new(config.live_samples, config.live_rate)
    }

    pub fn on_tap(
        &self,
        tap: TapEvent,
        calibration: &mut CalibrationEngine,
        sampling: &mut SamplingSession,
    ) -> Commands {
        if !calibration.is_idle() || sampling.is_active() {
            return Commands::new();
        }

        if tap.axis.is_face() {
            calibration.start()
        } else {
            sampling.start(self.live_samples, self.live_rate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationPhase;
    use crate::sensor::{RawSample, TapAxis, TapDirection};

    const FACE: TapEvent = TapEvent::new(TapAxis::Z, TapDirection::Positive);
    const EDGE: TapEvent = TapEvent::new(TapAxis::X, TapDirection::Negative);

    #[test]
    fn test_face_tap_starts_calibration() {
        let dispatcher = GestureDispatcher::default();
        let mut calibration = CalibrationEngine::default();
        let mut sampling = SamplingSession::new();

        dispatcher.on_tap(FACE, &mut calibration, &mut sampling);
        assert_eq!(calibration.phase(), CalibrationPhase::WaitingPlaceFlat);
        assert!(!sampling.is_active());
    }

    #[test]
    fn test_edge_tap_starts_sampling() {
        let dispatcher = GestureDispatcher::default();
        let mut calibration = CalibrationEngine::default();
        let mut sampling = SamplingSession::new();

        let commands = dispatcher.on_tap(EDGE, &mut calibration, &mut sampling);
        assert_eq!(commands.len(), 2);
        assert_eq!(sampling.remaining(), 600);
        assert!(calibration.is_idle());

        let y_tap = TapEvent::new(TapAxis::Y, TapDirection::Positive);
        let mut sampling = SamplingSession::new();
        dispatcher.on_tap(y_tap, &mut calibration, &mut sampling);
        assert_eq!(sampling.remaining(), 600);
    }

    #[test]
    fn test_tap_ignored_while_calibrating() {
        let dispatcher = GestureDispatcher::default();
        let mut calibration = CalibrationEngine::default();
        let mut sampling = SamplingSession::new();

        dispatcher.on_tap(FACE, &mut calibration, &mut sampling);
        calibration.step();

        let commands = dispatcher.on_tap(EDGE, &mut calibration, &mut sampling);
        assert!(commands.is_empty());
        assert_eq!(sampling.remaining(), 0);
    }

    #[test]
    fn test_tap_ignored_while_sampling() {
        let dispatcher = GestureDispatcher::default();
        let mut calibration = CalibrationEngine::default();
        let mut sampling = SamplingSession::new();

        dispatcher.on_tap(EDGE, &mut calibration, &mut sampling);
        sampling.on_samples(&[RawSample::new(1, 2, 3)]);

        assert!(dispatcher
            .on_tap(FACE, &mut calibration, &mut sampling)
            .is_empty());
        assert_eq!(calibration.phase(), CalibrationPhase::Idle);
        assert_eq!(sampling.remaining(), 599);
    }

    #[test]
    fn test_custom_live_window() {
        let dispatcher = GestureDispatcher::new(5, SamplingRate::Hz25);
        let mut calibration = CalibrationEngine::default();
        let mut sampling = SamplingSession::new();

        dispatcher.on_tap(EDGE, &mut calibration, &mut sampling);
        assert_eq!(sampling.remaining(), 5);
    }
}
