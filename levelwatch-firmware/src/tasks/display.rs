//! Display task
//!
//! Redraws the SH1106 whenever the controller publishes a new frame.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;

use levelwatch_core::config::GaugeGeometry;

use crate::channels::REDRAW;
use crate::display::{render, Frame, Sh1106};

pub type Display = Sh1106<I2c<'static, I2C1, Async>>;

/// Shared frame protected by mutex
pub static FRAME: Mutex<CriticalSectionRawMutex, Frame> = Mutex::new(Frame::empty());

#[embassy_executor::task]
pub async fn display_task(mut display: Display, geometry: GaugeGeometry) {
    info!("Display task started");

    if let Err(e) = display.init().await {
        error!("Display init failed: {:?}", e);
        return;
    }

    loop {
        REDRAW.wait().await;

        let frame = *FRAME.lock().await;
        render(&mut display, &frame, &geometry);

        if let Err(e) = display.flush().await {
            warn!("Display flush failed: {:?}", e);
        }
    }
}
