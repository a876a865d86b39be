//! Calibration state machine
//!
//! Driven by three inputs: `Start` from the gesture dispatcher, `Tick` once
//! per second and `Sample` for every delivery of the raw sensor feed. The
//! countdown encodes two dwell windows around two capture points:
//!
//! ```text
//! countdown  20           10            1          0
//!            |-- place ---|-- rotate ---|          |
//!            subscribe    first pose    second     Done -> Idle
//!                                       pose,
//!                                       persist
//! ```
//!
//! A capture uses the freshest sample delivered since the previous capture.
//! If none has arrived yet, the machine waits in a `Sampling*` phase and
//! captures the next delivery instead.

use crate::calibration::offset::CalibrationOffset;
use crate::command::{self, Command, Commands, Feed, Prompt, SensorCommand};
use crate::config::CalibrationSchedule;
use crate::sensor::RawSample;

/// Calibration phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationPhase {
    /// No calibration running
    Idle,
    /// First dwell window: user places the watch flat
    WaitingPlaceFlat,
    /// First capture point reached, waiting for a sample from the feed
    SamplingFirstPose,
    /// Second dwell window: user rotates the watch by 180°
    WaitingRotate { first: RawSample },
    /// Second capture point reached, waiting for a sample from the feed
    SamplingSecondPose { first: RawSample },
    /// Offset computed and persisted; becomes `Idle` on the next tick
    Done(CalibrationOffset),
}

impl CalibrationPhase {
    /// Check if a calibration run currently holds the sensor
    pub fn is_active(&self) -> bool {
        !matches!(self, CalibrationPhase::Idle | CalibrationPhase::Done(_))
    }

    /// First pose, once captured
    pub fn first_pose(&self) -> Option<RawSample> {
        match *self {
            CalibrationPhase::WaitingRotate { first }
            | CalibrationPhase::SamplingSecondPose { first } => Some(first),
            _ => None,
        }
    }
}

/// Inputs of the calibration state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationEvent {
    Start,
    Tick,
    Sample(RawSample),
}

/// Complete calibration state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationState {
    countdown: u8,
    phase: CalibrationPhase,
    /// Freshest sample not yet consumed by a capture
    latest: Option<RawSample>,
}

impl Default for CalibrationState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationState {
    pub const fn new() -> Self {
        Self {
            countdown: 0,
            phase: CalibrationPhase::Idle,
            latest: None,
        }
    }

    pub fn countdown(&self) -> u8 {
        self.countdown
    }

    pub fn phase(&self) -> CalibrationPhase {
        self.phase
    }

    /// Process an event and return the next state with its side effects
    ///
    /// This is the core transition logic; it does not mutate `self`.
    pub fn transition(
        self,
        event: CalibrationEvent,
        schedule: &CalibrationSchedule,
    ) -> (Self, Commands) {
        let mut next = self;
        let mut commands = Commands::new();

        match event {
            CalibrationEvent::Start => next.start(schedule),
            CalibrationEvent::Tick => next.tick(schedule, &mut commands),
            CalibrationEvent::Sample(sample) => next.sample(sample, &mut commands),
        }

        (next, commands)
    }

    fn start(&mut self, schedule: &CalibrationSchedule) {
        if self.phase.is_active() {
            return;
        }
        self.countdown = schedule.start_countdown;
        self.phase = CalibrationPhase::WaitingPlaceFlat;
        self.latest = None;
    }

    fn tick(&mut self, schedule: &CalibrationSchedule, commands: &mut Commands) {
        if self.countdown == 0 {
            match self.phase {
                CalibrationPhase::Done(_) => self.phase = CalibrationPhase::Idle,
                // The feed never delivered the pending pose
                CalibrationPhase::SamplingFirstPose
                | CalibrationPhase::SamplingSecondPose { .. } => self.abandon(commands),
                _ => {}
            }
            return;
        }

        if self.countdown == schedule.start_countdown {
            command::push(commands, Command::Sensor(SensorCommand::Subscribe(Feed::Raw)));
            command::push(commands, Command::Prompt(Prompt::PlaceFlat));
        } else if self.countdown == schedule.first_capture_at {
            if self.phase == CalibrationPhase::WaitingPlaceFlat {
                match self.latest.take() {
                    Some(sample) => self.capture_first(sample, commands),
                    None => self.phase = CalibrationPhase::SamplingFirstPose,
                }
            }
        } else if self.countdown == schedule.second_capture_at {
            match self.phase {
                CalibrationPhase::WaitingRotate { first } => match self.latest.take() {
                    Some(second) => self.finish(first, second, commands),
                    None => self.phase = CalibrationPhase::SamplingSecondPose { first },
                },
                CalibrationPhase::SamplingFirstPose => self.abandon(commands),
                _ => {}
            }
        }

        self.countdown = self.countdown.saturating_sub(1);
    }

    fn sample(&mut self, sample: RawSample, commands: &mut Commands) {
        match self.phase {
            CalibrationPhase::WaitingPlaceFlat | CalibrationPhase::WaitingRotate { .. } => {
                self.latest = Some(sample);
            }
            CalibrationPhase::SamplingFirstPose => self.capture_first(sample, commands),
            CalibrationPhase::SamplingSecondPose { first } => {
                self.finish(first, sample, commands)
            }
            CalibrationPhase::Idle | CalibrationPhase::Done(_) => {}
        }
    }

    fn capture_first(&mut self, first: RawSample, commands: &mut Commands) {
        self.phase = CalibrationPhase::WaitingRotate { first };
        self.latest = None;
        command::push(commands, Command::Prompt(Prompt::Rotate));
    }

    fn finish(&mut self, first: RawSample, second: RawSample, commands: &mut Commands) {
        let offset = CalibrationOffset::midpoint(&first, &second);
        self.phase = CalibrationPhase::Done(offset);
        self.latest = None;
        command::push(commands, Command::Sensor(SensorCommand::Unsubscribe));
        command::push(commands, Command::PersistOffset(offset));
        command::push(commands, Command::Prompt(Prompt::Done));
    }

    fn abandon(&mut self, commands: &mut Commands) {
        self.phase = CalibrationPhase::Idle;
        self.countdown = 0;
        self.latest = None;
        command::push(commands, Command::Sensor(SensorCommand::Unsubscribe));
        command::push(commands, Command::Prompt(Prompt::NoData));
    }
}

/// Calibration engine
///
/// Owns the calibration state and schedule and applies transitions.
#[derive(Debug, Clone)]
pub struct CalibrationEngine {
    state: CalibrationState,
    schedule: CalibrationSchedule,
}

impl Default for CalibrationEngine {
    fn default() -> Self {
        Self::new(CalibrationSchedule::default())
    }
}

impl CalibrationEngine {
    pub const fn new(schedule: CalibrationSchedule) -> Self {
        Self {
            state: CalibrationState::new(),
            schedule,
        }
    }

    /// Arm a calibration run
    ///
    /// Both engines must be idle; the gesture dispatcher checks this. A run
    /// already in progress is left untouched.
    pub fn start(&mut self) -> Commands {
        self.apply(CalibrationEvent::Start)
    }

    /// Advance by one tick (one second)
    pub fn step(&mut self) -> Commands {
        self.apply(CalibrationEvent::Tick)
    }

    /// Feed one sample from the raw subscription
    pub fn on_sample(&mut self, sample: RawSample) -> Commands {
        self.apply(CalibrationEvent::Sample(sample))
    }

    pub fn state(&self) -> CalibrationState {
        self.state
    }

    pub fn phase(&self) -> CalibrationPhase {
        self.state.phase()
    }

    pub fn countdown(&self) -> u8 {
        self.state.countdown()
    }

    /// Check if no calibration run holds the sensor
    pub fn is_idle(&self) -> bool {
        !self.state.phase().is_active()
    }

    fn apply(&mut self, event: CalibrationEvent) -> Commands {
        let (next, commands) = self.state.transition(event, &self.schedule);
        self.state = next;
        commands
    }
}
