//! Accelerometer task
//!
//! Owns the LIS2DH12 and its click interrupt pin. Carries out sensor
//! commands from the controller, polls samples at the current data rate
//! while a feed is subscribed and forwards decoded taps. Every wake on
//! INT1 reads CLICK_SRC, which releases the latched interrupt.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_rp::gpio::Input;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Ticker};

use levelwatch_core::command::Feed;
use levelwatch_core::traits::Accelerometer;
use levelwatch_core::{SamplingRate, SensorCommand};
use levelwatch_drivers::accel::Lis2dh12;

use crate::channels::{SampleBatch, MAX_BATCH, SAMPLE_CHANNEL, SENSOR_CMD, TAP_CHANNEL};

pub type Accel = Lis2dh12<I2c<'static, I2C0, Async>>;

/// Rate the sensor runs at until a command changes it
pub const INITIAL_RATE: SamplingRate = SamplingRate::Hz25;

fn sample_ticker(rate: SamplingRate) -> Ticker {
    Ticker::every(Duration::from_millis(rate.period_ms() as u64))
}

#[embassy_executor::task]
pub async fn accel_task(mut accel: Accel, mut int_pin: Input<'static>) {
    info!("Accelerometer task started");

    if let Err(e) = accel.init(INITIAL_RATE).await {
        error!("Accelerometer init failed: {:?}", e);
        return;
    }

    // Drop a click latched before the task took over
    let _ = accel.read_tap().await;

    let mut feed: Option<Feed> = None;
    let mut batch = SampleBatch::new();
    let mut ticker = sample_ticker(accel.rate());

    loop {
        let subscribed = feed.is_some();
        match select3(
            SENSOR_CMD.receive(),
            async {
                if subscribed {
                    ticker.next().await
                } else {
                    core::future::pending::<()>().await
                }
            },
            // INT1 stays high until CLICK_SRC is read, so wait on the level:
            // a click latched while another arm ran is still picked up
            int_pin.wait_for_high(),
        )
        .await
        {
            Either3::First(command) => {
                debug!("Sensor command: {:?}", command);
                match command {
                    SensorCommand::SetSamplingRate(rate) => {
                        if let Err(e) = accel.set_sampling_rate(rate).await {
                            warn!("Failed to set sampling rate: {:?}", e);
                        }
                        ticker = sample_ticker(rate);
                    }
                    SensorCommand::Subscribe(f) => {
                        feed = Some(f);
                        batch.clear();
                        ticker.reset();
                    }
                    SensorCommand::Unsubscribe => {
                        feed = None;
                        batch.clear();
                    }
                }
            }

            Either3::Second(()) => {
                let sample = match accel.read_sample().await {
                    Ok(sample) => sample,
                    Err(e) => {
                        warn!("Sample read failed: {:?}", e);
                        continue;
                    }
                };
                trace!("Sample {} {} {}", sample.x, sample.y, sample.z);

                let per_update = match feed {
                    Some(Feed::Batched { samples_per_update }) => {
                        (samples_per_update as usize).clamp(1, MAX_BATCH)
                    }
                    _ => 1,
                };
                let _ = batch.push(sample);
                if batch.len() >= per_update {
                    SAMPLE_CHANNEL.send(batch.clone()).await;
                    batch.clear();
                }
            }

            Either3::Third(()) => match accel.read_tap().await {
                Ok(Some(tap)) => {
                    debug!("Tap: {:?}", tap);
                    TAP_CHANNEL.send(tap).await;
                }
                Ok(None) => {}
                Err(e) => warn!("Tap read failed: {:?}", e),
            },
        }
    }
}
