//! Storage write failures are surfaced to the caller.

use savestate_core::{
    device::{EepromKind, MemoryEeprom},
    game::MemoryGameState,
    SaveError, SaveMode, SaveStateStore, StoreConfig,
};

fn faulty_chip() -> MemoryEeprom {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut chip = MemoryEeprom::new(EepromKind::Eeprom4k);
    chip.set_write_fault(true);
    chip
}

#[test]
fn failed_full_save_returns_io_error() {
    let mut store = SaveStateStore::new(faulty_chip(), StoreConfig::default_test());
    store.initialize().unwrap();

    let err = store.save(SaveMode::Full, &MemoryGameState::default()).unwrap_err();
    assert!(matches!(err, SaveError::Io(_)), "expected I/O error, got {err}");
    assert!(store.device().contents().iter().all(|&b| b == 0), "nothing may land on a faulty chip");
}

#[test]
fn failed_clear_returns_io_error() {
    let mut store = SaveStateStore::new(faulty_chip(), StoreConfig::default_test());
    store.initialize().unwrap();

    assert!(matches!(store.clear(), Err(SaveError::Io(_))));
}

#[test]
fn failed_immediate_format_is_reported_from_initialize() {
    let config = StoreConfig { write_on_format: true, ..StoreConfig::default_test() };
    let mut store = SaveStateStore::new(faulty_chip(), config);

    assert!(matches!(store.initialize(), Err(SaveError::Io(_))));
}

#[test]
fn save_succeeds_once_the_fault_clears() {
    let mut store = SaveStateStore::new(faulty_chip(), StoreConfig::default_test());
    store.initialize().unwrap();
    assert!(store.save(SaveMode::Full, &MemoryGameState::default()).is_err());

    store.device_mut().set_write_fault(false);
    store.save(SaveMode::Full, &MemoryGameState::default()).unwrap();
    assert!(store.crashed());
    assert_eq!(store.device().write_count(), 1);
}
