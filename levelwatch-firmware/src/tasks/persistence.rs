//! Offset persistence task
//!
//! Owns the flash storage and writes the calibration offset whenever the
//! controller requests it. Flash writes are slow, so they run here rather
//! than in the controller loop.

use defmt::*;

use levelwatch_core::persist::save_offset;
use levelwatch_hal_rp2040::flash::Rp2040FlashStorage;

use crate::channels::OFFSET_SAVE;

#[embassy_executor::task]
pub async fn persistence_task(mut storage: Rp2040FlashStorage<'static>) {
    info!("Persistence task started");

    loop {
        let offset = OFFSET_SAVE.wait().await;

        info!(
            "Saving offset x={} y={}",
            offset.offset_x, offset.offset_y
        );

        match save_offset(&mut storage, offset).await {
            Ok(()) => info!("Offset saved"),
            Err(e) => error!("Failed to save offset: {:?}", e),
        }
    }
}
