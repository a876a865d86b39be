//! Live sampling window
//!
//! A fixed number of batched deliveries feeding the live gauge. The session
//! tears itself down after the last delivery and leaves the sentinel in
//! `last_sample` so the renderer stops drawing the dot.

use crate::command::{self, Command, Commands, Feed, SensorCommand};
use crate::sensor::{RawSample, SamplingRate, SENTINEL};

/// Samples per delivery for the live feed
const SAMPLES_PER_UPDATE: u8 = 1;

/// Live sampling state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplingSession {
    remaining: u16,
    last_sample: RawSample,
}

impl Default for SamplingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SamplingSession {
    pub const fn new() -> Self {
        Self {
            remaining: 0,
            last_sample: RawSample::NO_DATA,
        }
    }

    /// Check if the session is consuming deliveries
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Deliveries left before the session ends
    pub fn remaining(&self) -> u16 {
        self.remaining
    }

    /// Most recent sample, or [`RawSample::NO_DATA`] when not live
    pub fn last_sample(&self) -> RawSample {
        self.last_sample
    }

    /// Open a window of `count` deliveries at `rate`
    ///
    /// The rate is set before subscribing. Ignored while a session is
    /// running or when `count` is zero.
    pub fn start(&mut self, count: u16, rate: SamplingRate) -> Commands {
        let mut commands = Commands::new();
        if self.is_active() || count == 0 {
            return commands;
        }

        self.remaining = count;
        command::push(&mut commands, Command::Sensor(SensorCommand::SetSamplingRate(rate)));
        command::push(
            &mut commands,
            Command::Sensor(SensorCommand::Subscribe(Feed::Batched {
                samples_per_update: SAMPLES_PER_UPDATE,
            })),
        );
        commands
    }

    /// Handle one delivery of the batched feed
    pub fn on_samples(&mut self, batch: &[RawSample]) -> Commands {
        let mut commands = Commands::new();
        if !self.is_active() {
            return commands;
        }

        self.remaining -= 1;
        if self.remaining == 0 {
            self.last_sample.x = SENTINEL;
            command::push(&mut commands, Command::Sensor(SensorCommand::Unsubscribe));
        } else if let Some(sample) = batch.last() {
            self.last_sample = *sample;
        }

        command::push(&mut commands, Command::Redraw);
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: RawSample = RawSample::new(12, -34, 990);

    #[test]
    fn test_new_session_is_idle() {
        let session = SamplingSession::new();
        assert!(!session.is_active());
        assert!(session.last_sample().is_sentinel());
    }

    #[test]
    fn test_start_sets_rate_before_subscribe() {
        let mut session = SamplingSession::new();
        let commands = session.start(600, SamplingRate::Hz10);

        assert_eq!(
            commands.as_slice(),
            &[
                Command::Sensor(SensorCommand::SetSamplingRate(SamplingRate::Hz10)),
                Command::Sensor(SensorCommand::Subscribe(Feed::Batched {
                    samples_per_update: 1
                })),
            ]
        );
        assert_eq!(session.remaining(), 600);
    }

    #[test]
    fn test_start_zero_is_ignored() {
        let mut session = SamplingSession::new();
        assert!(session.start(0, SamplingRate::Hz10).is_empty());
        assert!(!session.is_active());
    }

    #[test]
    fn test_start_while_active_is_ignored() {
        let mut session = SamplingSession::new();
        session.start(5, SamplingRate::Hz10);
        session.on_samples(&[SAMPLE]);

        assert!(session.start(600, SamplingRate::Hz10).is_empty());
        assert_eq!(session.remaining(), 4);
    }

    #[test]
    fn test_session_ends_after_count() {
        let mut session = SamplingSession::new();
        session.start(3, SamplingRate::Hz10);

        let commands = session.on_samples(&[SAMPLE]);
        assert_eq!(commands.as_slice(), &[Command::Redraw]);
        assert_eq!(session.last_sample(), SAMPLE);

        session.on_samples(&[SAMPLE]);
        assert!(session.is_active());

        let commands = session.on_samples(&[SAMPLE]);
        assert_eq!(
            commands.as_slice(),
            &[
                Command::Sensor(SensorCommand::Unsubscribe),
                Command::Redraw,
            ]
        );
        assert!(!session.is_active());
        assert_eq!(session.last_sample().x, SENTINEL);
    }

    #[test]
    fn test_keeps_last_of_batch() {
        let mut session = SamplingSession::new();
        session.start(10, SamplingRate::Hz10);
        session.on_samples(&[RawSample::new(1, 1, 1), SAMPLE]);
        assert_eq!(session.last_sample(), SAMPLE);
    }

    #[test]
    fn test_empty_batch_still_counts() {
        let mut session = SamplingSession::new();
        session.start(2, SamplingRate::Hz10);
        session.on_samples(&[SAMPLE]);
        session.on_samples(&[]);
        assert!(!session.is_active());
    }

    #[test]
    fn test_late_delivery_ignored() {
        let mut session = SamplingSession::new();
        session.start(1, SamplingRate::Hz10);
        session.on_samples(&[SAMPLE]);

        let before = session;
        assert!(session.on_samples(&[SAMPLE]).is_empty());
        assert_eq!(session, before);
    }
}
