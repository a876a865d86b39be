//! Flash storage abstractions
//!
//! Persistent key-value storage implemented by chip-specific HALs on top of
//! their flash memory.

/// Storage keys for persisted records
///
/// The numeric values are stable on-flash identifiers; never renumber them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Level meter zero offset, X axis (signed integer record)
    LevelmeterOffsetX = 11,
    /// Level meter zero offset, Y axis (signed integer record)
    LevelmeterOffsetY = 12,
}

impl StorageKey {
    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            11 => Some(StorageKey::LevelmeterOffsetX),
            12 => Some(StorageKey::LevelmeterOffsetY),
            _ => None,
        }
    }
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash operation failed
    Flash,
    /// Storage operation failed
    Storage,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Data corrupted or invalid
    Corrupted,
    /// Storage is full
    Full,
}

/// Flash storage trait
///
/// Wear-leveled key-value storage. Implementations own wear leveling and
/// data integrity; a write either replaces the record or fails.
pub trait FlashStorage {
    /// Read a value by key into the provided buffer
    ///
    /// Returns the number of bytes read, or [`FlashError::NotFound`] when the
    /// key has never been written.
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, FlashError>>;

    /// Write a value by key
    fn write(
        &mut self,
        key: StorageKey,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), FlashError>>;
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        match StorageKey::from_u8(buffer[0]) {
            Some(key) => Ok((key, 1)),
            None => Err(sequential_storage::map::SerializationError::InvalidFormat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_keys_are_stable() {
        assert_eq!(StorageKey::LevelmeterOffsetX.as_u8(), 11);
        assert_eq!(StorageKey::LevelmeterOffsetY.as_u8(), 12);
    }

    #[test]
    fn test_key_from_u8() {
        assert_eq!(StorageKey::from_u8(11), Some(StorageKey::LevelmeterOffsetX));
        assert_eq!(StorageKey::from_u8(12), Some(StorageKey::LevelmeterOffsetY));
        assert_eq!(StorageKey::from_u8(0), None);
        assert_eq!(StorageKey::from_u8(13), None);
    }
}
