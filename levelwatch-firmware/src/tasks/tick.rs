//! Tick task
//!
//! Drives the calibration countdown and the periodic redraw.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Signal to notify the controller of a tick, carrying the tick count
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u32> = Signal::new();

#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    let mut count: u32 = 0;

    loop {
        ticker.next().await;
        count = count.wrapping_add(1);
        TICK_SIGNAL.signal(count);
    }
}
