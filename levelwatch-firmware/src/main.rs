//! Levelwatch - tilt gauge and level meter firmware
//!
//! Main firmware binary for an RP2040 board with a LIS2DH12 accelerometer
//! and an SH1106 OLED. A tap on the face runs a two-point calibration, a
//! tap on an edge shows the live tilt for one minute.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, I2C1};
use {defmt_rtt as _, panic_probe as _};

use levelwatch_core::persist;
use levelwatch_core::{CalibrationOffset, LevelmeterConfig};
use levelwatch_drivers::accel::{Lis2dh12, Lis2dh12Config};
use levelwatch_hal_rp2040::flash::Rp2040FlashStorage;

mod channels;
mod display;
mod tasks;

use display::Sh1106;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});

/// Accelerometer bus frequency
const ACCEL_I2C_HZ: u32 = 400_000;

/// Display bus frequency
const DISPLAY_I2C_HZ: u32 = 400_000;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Levelwatch firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = LevelmeterConfig::default();
    if let Err(e) = config.validate() {
        error!("Invalid level meter configuration: {:?}", e);
    }

    // Offset storage in the last flash sectors
    let mut storage = Rp2040FlashStorage::new(p.FLASH, p.DMA_CH0);
    let offset = load_offset(&mut storage).await;

    // Accelerometer on I2C0 (GPIO4 SDA, GPIO5 SCL), click interrupt on GPIO8
    let mut accel_i2c_config = i2c::Config::default();
    accel_i2c_config.frequency = ACCEL_I2C_HZ;
    let accel_i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, accel_i2c_config);
    let accel = Lis2dh12::new(accel_i2c, Lis2dh12Config::default());
    let int_pin = Input::new(p.PIN_8, Pull::Down);
    info!("Accelerometer bus initialized");

    // Display on I2C1 (GPIO6 SDA, GPIO7 SCL)
    let mut display_i2c_config = i2c::Config::default();
    display_i2c_config.frequency = DISPLAY_I2C_HZ;
    let display_i2c = I2c::new_async(p.I2C1, p.PIN_7, p.PIN_6, Irqs, display_i2c_config);
    let display = Sh1106::new(display_i2c);
    info!("Display bus initialized");

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::persistence_task(storage)).unwrap();
    spawner.spawn(tasks::accel_task(accel, int_pin)).unwrap();
    spawner
        .spawn(tasks::display_task(display, config.gauge))
        .unwrap();
    spawner
        .spawn(tasks::controller_task(config, offset))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Load the stored offset; an unreadable axis falls back to zero
async fn load_offset(storage: &mut Rp2040FlashStorage<'static>) -> CalibrationOffset {
    match persist::read_offset(storage).await {
        Ok(offset) => {
            info!(
                "Loaded offset x={} y={}",
                offset.offset_x, offset.offset_y
            );
            offset
        }
        Err(e) => {
            warn!("Failed to load offset: {:?}, zeroing unreadable axes", e);
            persist::load_offset(storage).await
        }
    }
}
