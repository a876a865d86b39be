//! Offset persistence
//!
//! Each axis is stored as its own postcard-encoded `i32` record, so a
//! partially written offset still loads the axis that made it to flash.

use levelwatch_hal::{FlashError, FlashStorage, StorageKey};

use crate::calibration::CalibrationOffset;

/// Largest postcard encoding of an `i32` (zigzag varint)
const MAX_RECORD_SIZE: usize = 8;

/// Persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// Flash operation failed
    Flash(FlashError),
    /// Serialization failed
    Serialize,
    /// Stored record could not be decoded
    Deserialize,
}

impl From<FlashError> for PersistError {
    fn from(e: FlashError) -> Self {
        PersistError::Flash(e)
    }
}

/// Read the stored offset
///
/// A missing record reads as 0 for its axis. Any other failure is returned
/// so the caller can report it; the first failing axis wins.
pub async fn read_offset<S: FlashStorage>(
    storage: &mut S,
) -> Result<CalibrationOffset, PersistError> {
    let offset_x = read_axis(storage, StorageKey::LevelmeterOffsetX).await?;
    let offset_y = read_axis(storage, StorageKey::LevelmeterOffsetY).await?;
    Ok(CalibrationOffset::new(offset_x, offset_y))
}

/// Load the stored offset, falling back to 0 for any axis that fails
pub async fn load_offset<S: FlashStorage>(storage: &mut S) -> CalibrationOffset {
    let offset_x = read_axis(storage, StorageKey::LevelmeterOffsetX)
        .await
        .unwrap_or(0);
    let offset_y = read_axis(storage, StorageKey::LevelmeterOffsetY)
        .await
        .unwrap_or(0);
    CalibrationOffset::new(offset_x, offset_y)
}

/// Write both axes of the offset
pub async fn save_offset<S: FlashStorage>(
    storage: &mut S,
    offset: CalibrationOffset,
) -> Result<(), PersistError> {
    write_axis(storage, StorageKey::LevelmeterOffsetX, offset.offset_x).await?;
    write_axis(storage, StorageKey::LevelmeterOffsetY, offset.offset_y).await
}

async fn read_axis<S: FlashStorage>(storage: &mut S, key: StorageKey) -> Result<i32, PersistError> {
    let mut buffer = [0u8; MAX_RECORD_SIZE];
    match storage.read(key, &mut buffer).await {
        Ok(len) => {
            let record = buffer.get(..len).ok_or(PersistError::Deserialize)?;
            postcard::from_bytes(record).map_err(|_| PersistError::Deserialize)
        }
        Err(FlashError::NotFound) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

async fn write_axis<S: FlashStorage>(
    storage: &mut S,
    key: StorageKey,
    value: i32,
) -> Result<(), PersistError> {
    let mut buffer = [0u8; MAX_RECORD_SIZE];
    let bytes = postcard::to_slice(&value, &mut buffer).map_err(|_| PersistError::Serialize)?;
    storage.write(key, bytes).await?;
    Ok(())
}
