//! End-to-end calibration and persistence

mod common;

use common::MemoryStorage;
use embassy_futures::block_on;
use levelwatch_core::persist::{self, PersistError};
use levelwatch_core::{
    CalibrationOffset, Command, Levelmeter, LevelmeterConfig, RawSample, SensorCommand, TapAxis,
    TapDirection, TapEvent,
};
use levelwatch_hal::{FlashError, StorageKey};

const FACE_TAP: TapEvent = TapEvent::new(TapAxis::Z, TapDirection::Positive);

/// Run a full calibration with the two poses available on the feed,
/// carrying out persistence commands against `storage`
fn run_calibration(meter: &mut Levelmeter, storage: &mut MemoryStorage) -> Vec<Command> {
    let mut log = Vec::new();
    log.extend(meter.on_tap(FACE_TAP));

    for _ in 0..20 {
        match meter.calibration().countdown() {
            10 => log.extend(meter.on_samples(&[RawSample::new(100, 200, 1000)])),
            1 => log.extend(meter.on_samples(&[RawSample::new(300, 400, 1000)])),
            _ => {}
        }
        log.extend(meter.on_tick());
    }

    for command in &log {
        if let Command::PersistOffset(offset) = command {
            block_on(persist::save_offset(storage, *offset)).unwrap();
        }
    }
    log
}

#[test]
fn test_absent_storage_loads_zero() {
    let mut storage = MemoryStorage::new();
    let offset = block_on(persist::load_offset(&mut storage));
    assert_eq!(offset, CalibrationOffset::ZERO);
}

#[test]
fn test_calibration_persists_and_reloads() {
    let mut storage = MemoryStorage::new();
    let offset = block_on(persist::load_offset(&mut storage));
    let mut meter = Levelmeter::new(LevelmeterConfig::default(), offset);

    let log = run_calibration(&mut meter, &mut storage);

    assert_eq!(
        log.iter()
            .filter(|c| matches!(c, Command::PersistOffset(_)))
            .count(),
        1
    );
    assert!(log.contains(&Command::Sensor(SensorCommand::Unsubscribe)));
    assert_eq!(meter.offset(), CalibrationOffset::new(200, 300));
    assert_eq!(storage.len(), 2);

    let reloaded = block_on(persist::load_offset(&mut storage));
    assert_eq!(reloaded, CalibrationOffset::new(200, 300));

    // A fresh controller picks up the stored offset
    let meter = Levelmeter::new(LevelmeterConfig::default(), reloaded);
    assert_eq!(meter.offset(), CalibrationOffset::new(200, 300));
}

#[test]
fn test_negative_offset_roundtrip() {
    let mut storage = MemoryStorage::new();
    let offset = CalibrationOffset::new(-4096, 17);
    block_on(persist::save_offset(&mut storage, offset)).unwrap();
    assert_eq!(block_on(persist::load_offset(&mut storage)), offset);
}

#[test]
fn test_missing_axis_reads_zero() {
    let mut storage = MemoryStorage::new();
    // Only X present
    let mut buffer = [0u8; 8];
    let bytes = postcard::to_slice(&42i32, &mut buffer).unwrap();
    storage.insert_raw(StorageKey::LevelmeterOffsetX, bytes);

    assert_eq!(
        block_on(persist::read_offset(&mut storage)),
        Ok(CalibrationOffset::new(42, 0))
    );
}

#[test]
fn test_corrupt_record_falls_back_to_zero() {
    let mut storage = MemoryStorage::new();
    // Unterminated varint
    storage.insert_raw(StorageKey::LevelmeterOffsetY, &[0xff]);

    assert_eq!(
        block_on(persist::read_offset(&mut storage)),
        Err(PersistError::Deserialize)
    );
    assert_eq!(
        block_on(persist::load_offset(&mut storage)),
        CalibrationOffset::ZERO
    );
}

#[test]
fn test_corrupt_axis_keeps_the_other() {
    let mut storage = MemoryStorage::new();
    block_on(persist::save_offset(&mut storage, CalibrationOffset::new(5, -6))).unwrap();
    storage.insert_raw(StorageKey::LevelmeterOffsetX, &[0xff]);

    assert_eq!(
        block_on(persist::read_offset(&mut storage)),
        Err(PersistError::Deserialize)
    );
    assert_eq!(
        block_on(persist::load_offset(&mut storage)),
        CalibrationOffset::new(0, -6)
    );
}

#[test]
fn test_write_failure_is_reported() {
    let mut storage = MemoryStorage::new();
    storage.fail_writes = true;

    let result = block_on(persist::save_offset(
        &mut storage,
        CalibrationOffset::new(1, 2),
    ));
    assert_eq!(result, Err(PersistError::Flash(FlashError::Flash)));
}

#[test]
fn test_idle_ticks_never_persist() {
    let mut meter = Levelmeter::default();
    for _ in 0..100 {
        let commands = meter.on_tick();
        assert_eq!(commands.as_slice(), &[Command::Redraw]);
    }
    assert_eq!(meter.offset(), CalibrationOffset::ZERO);
}
