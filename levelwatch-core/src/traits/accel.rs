//! Accelerometer trait

use core::future::Future;

use crate::sensor::{RawSample, SamplingRate, TapEvent};

/// Three-axis accelerometer with tap detection
///
/// Implementations report samples in milli-g and own the sensor's click
/// detection configuration.
pub trait Accelerometer {
    type Error;

    /// Read the current acceleration on all three axes
    fn read_sample(&mut self) -> impl Future<Output = Result<RawSample, Self::Error>>;

    /// Change the output data rate
    fn set_sampling_rate(
        &mut self,
        rate: SamplingRate,
    ) -> impl Future<Output = Result<(), Self::Error>>;

    /// Read and clear the latched tap source
    ///
    /// Returns `None` when no tap has been latched since the last call.
    fn read_tap(&mut self) -> impl Future<Output = Result<Option<TapEvent>, Self::Error>>;
}
