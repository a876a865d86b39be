//! Shared test fixtures

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::vec::Vec;

use levelwatch_hal::{FlashError, FlashStorage, StorageKey};

/// In-memory key-value store standing in for flash
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: BTreeMap<StorageKey, Vec<u8>>,
    pub fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_raw(&mut self, key: StorageKey, bytes: &[u8]) {
        self.records.insert(key, bytes.to_vec());
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

impl FlashStorage for MemoryStorage {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let record = self.records.get(&key).ok_or(FlashError::NotFound)?;
        let target = buffer
            .get_mut(..record.len())
            .ok_or(FlashError::BufferTooSmall)?;
        target.copy_from_slice(record);
        Ok(record.len())
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        if self.fail_writes {
            return Err(FlashError::Flash);
        }
        self.records.insert(key, data.to_vec());
        Ok(())
    }
}
