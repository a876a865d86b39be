//! Level meter controller
//!
//! Owns the offset and both engines and serializes the three event sources:
//! the 1 Hz tick, sample deliveries and taps. Hardware effects leave as
//! [`Commands`]; offset and prompt changes are also applied here so the
//! renderer always sees the state the commands describe.

use crate::calibration::{CalibrationEngine, CalibrationOffset};
use crate::command::{self, Command, Commands, Prompt};
use crate::config::LevelmeterConfig;
use crate::dispatch::GestureDispatcher;
use crate::gauge::GaugeView;
use crate::sampling::SamplingSession;
use crate::sensor::{RawSample, TapEvent};

#[derive(Debug, Clone)]
pub struct Levelmeter {
    config: LevelmeterConfig,
    offset: CalibrationOffset,
    calibration: CalibrationEngine,
    sampling: SamplingSession,
    dispatcher: GestureDispatcher,
    prompt: Option<Prompt>,
}

impl Levelmeter {
    /// Create a controller with the offset loaded from storage
    pub fn new(config: LevelmeterConfig, offset: CalibrationOffset) -> Self {
        Self {
            config,
            offset,
            calibration: CalibrationEngine::new(config.schedule),
            sampling: SamplingSession::new(),
            dispatcher: GestureDispatcher::from_config(&config),
            prompt: None,
        }
    }

    /// Handle the 1 Hz tick
    pub fn on_tick(&mut self) -> Commands {
        let mut commands = self.calibration.step();
        command::push(&mut commands, Command::Redraw);
        self.apply(commands)
    }

    /// Handle one delivery from whichever feed is subscribed
    pub fn on_samples(&mut self, batch: &[RawSample]) -> Commands {
        let commands = if !self.calibration.is_idle() {
            match batch.last() {
                Some(sample) => self.calibration.on_sample(*sample),
                None => Commands::new(),
            }
        } else if self.sampling.is_active() {
            self.sampling.on_samples(batch)
        } else {
            Commands::new()
        };
        self.apply(commands)
    }

    /// Handle a tap gesture
    pub fn on_tap(&mut self, tap: TapEvent) -> Commands {
        let commands = self
            .dispatcher
            .on_tap(tap, &mut self.calibration, &mut self.sampling);
        self.apply(commands)
    }

    pub fn config(&self) -> &LevelmeterConfig {
        &self.config
    }

    pub fn offset(&self) -> CalibrationOffset {
        self.offset
    }

    /// Last calibration prompt, shown while not live
    pub fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    pub fn calibration(&self) -> &CalibrationEngine {
        &self.calibration
    }

    pub fn sampling(&self) -> &SamplingSession {
        &self.sampling
    }

    /// Gauge model for the renderer
    pub fn view(&self) -> GaugeView {
        GaugeView::new(self.offset, &self.sampling.last_sample())
    }

    fn apply(&mut self, commands: Commands) -> Commands {
        for command in &commands {
            match *command {
                Command::PersistOffset(offset) => self.offset = offset,
                Command::Prompt(prompt) => self.prompt = Some(prompt),
                Command::Sensor(_) | Command::Redraw => {}
            }
        }
        commands
    }
}

impl Default for Levelmeter {
    fn default() -> Self {
        Self::new(LevelmeterConfig::default(), CalibrationOffset::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationPhase;
    use crate::command::{Feed, SensorCommand};
    use crate::sensor::{TapAxis, TapDirection, SENTINEL};

    const FACE: TapEvent = TapEvent::new(TapAxis::Z, TapDirection::Negative);
    const EDGE: TapEvent = TapEvent::new(TapAxis::Y, TapDirection::Positive);

    #[test]
    fn test_tick_requests_redraw() {
        let mut meter = Levelmeter::default();
        assert_eq!(meter.on_tick().as_slice(), &[Command::Redraw]);
    }

    #[test]
    fn test_calibration_updates_offset_and_prompt() {
        let mut meter = Levelmeter::default();
        meter.on_tap(FACE);

        let commands = meter.on_tick();
        assert_eq!(
            commands.as_slice(),
            &[
                Command::Sensor(SensorCommand::Subscribe(Feed::Raw)),
                Command::Prompt(Prompt::PlaceFlat),
                Command::Redraw,
            ]
        );
        assert_eq!(meter.prompt(), Some(Prompt::PlaceFlat));

        while meter.calibration().countdown() > 0 {
            let sample = if meter.calibration().countdown() > 1 {
                RawSample::new(100, 200, 1000)
            } else {
                RawSample::new(300, 400, 1000)
            };
            meter.on_samples(&[sample]);
            meter.on_tick();
        }

        assert_eq!(meter.offset(), CalibrationOffset::new(200, 300));
        assert_eq!(meter.prompt(), Some(Prompt::Done));
        assert!(matches!(meter.calibration().phase(), CalibrationPhase::Done(_)));
    }

    #[test]
    fn test_samples_routed_to_live_window() {
        let mut meter = Levelmeter::new(
            LevelmeterConfig::default(),
            CalibrationOffset::new(10, -10),
        );
        meter.on_tap(EDGE);
        assert!(!meter.view().is_live());

        let commands = meter.on_samples(&[RawSample::new(110, 90, 1000)]);
        assert_eq!(commands.as_slice(), &[Command::Redraw]);

        let live = meter.view().live.unwrap();
        assert_eq!((live.x, live.y, live.z), (100, 100, 1000));
    }

    #[test]
    fn test_live_window_ends_with_sentinel() {
        let config = LevelmeterConfig {
            live_samples: 2,
            ..Default::default()
        };
        let mut meter = Levelmeter::new(config, CalibrationOffset::ZERO);
        meter.on_tap(EDGE);
        meter.on_samples(&[RawSample::new(1, 2, 3)]);
        let commands = meter.on_samples(&[RawSample::new(1, 2, 3)]);

        assert!(commands.contains(&Command::Sensor(SensorCommand::Unsubscribe)));
        assert_eq!(meter.sampling().last_sample().x, SENTINEL);
        assert!(!meter.view().is_live());
    }

    #[test]
    fn test_samples_ignored_when_idle() {
        let mut meter = Levelmeter::default();
        assert!(meter.on_samples(&[RawSample::new(1, 2, 3)]).is_empty());
        assert!(!meter.view().is_live());
    }

    #[test]
    fn test_tap_during_calibration_does_not_open_window() {
        let mut meter = Levelmeter::default();
        meter.on_tap(FACE);
        meter.on_tick();

        assert!(meter.on_tap(EDGE).is_empty());
        assert_eq!(meter.sampling().remaining(), 0);
    }
}
