//! Main controller task
//!
//! Serializes the three event sources into the level meter: ticks, sample
//! deliveries and taps. Commands returned by the core are carried out in
//! order.

use defmt::*;
use embassy_futures::select::{select3, Either3};

use levelwatch_core::{CalibrationOffset, Command, Commands, Levelmeter, LevelmeterConfig};

use crate::channels::{OFFSET_SAVE, REDRAW, SAMPLE_CHANNEL, SENSOR_CMD, TAP_CHANNEL};
use crate::display::Frame;
use crate::tasks::display::FRAME;
use crate::tasks::tick::TICK_SIGNAL;

#[embassy_executor::task]
pub async fn controller_task(config: LevelmeterConfig, offset: CalibrationOffset) {
    info!("Controller task started");

    let mut meter = Levelmeter::new(config, offset);
    publish_frame(&meter).await;

    loop {
        let commands = match select3(
            TICK_SIGNAL.wait(),
            SAMPLE_CHANNEL.receive(),
            TAP_CHANNEL.receive(),
        )
        .await
        {
            Either3::First(count) => {
                trace!("Tick {}", count);
                meter.on_tick()
            }
            Either3::Second(batch) => meter.on_samples(&batch),
            Either3::Third(tap) => {
                info!("Tap on {:?} axis", tap.axis);
                meter.on_tap(tap)
            }
        };

        execute(&meter, commands).await;
    }
}

/// Carry out commands in the order they were issued
async fn execute(meter: &Levelmeter, commands: Commands) {
    for command in commands {
        match command {
            Command::Sensor(sensor) => SENSOR_CMD.send(sensor).await,
            Command::PersistOffset(offset) => {
                info!(
                    "Calibration complete: offset x={} y={}",
                    offset.offset_x, offset.offset_y
                );
                OFFSET_SAVE.signal(offset);
            }
            Command::Prompt(prompt) => info!("Prompt: {}", prompt.as_str()),
            Command::Redraw => publish_frame(meter).await,
        }
    }
}

/// Copy the current view into the shared frame and wake the display
async fn publish_frame(meter: &Levelmeter) {
    {
        let mut frame = FRAME.lock().await;
        *frame = Frame::new(meter.view(), meter.prompt());
    }
    REDRAW.signal(());
}
