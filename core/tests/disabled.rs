//! Behavior without an EEPROM: every operation is a no-op.

use savestate_core::{
    device::NoEeprom,
    game::{MemoryGameState, MinigameRegistry},
    SaveMode, SaveStateStore, StoreConfig,
};

fn build() -> SaveStateStore<NoEeprom> {
    let _ = env_logger::builder().is_test(true).try_init();
    SaveStateStore::new(NoEeprom, StoreConfig::default_test())
}

fn busy_game() -> MemoryGameState {
    MemoryGameState {
        player_controllers: [true; 4],
        points:             [1, 2, 3, 4],
        current_minigame:   1,
        ..Default::default()
    }
}

#[test]
fn initialize_reports_missing_chip() {
    let mut store = build();
    assert!(!store.initialize().unwrap());
    assert!(!store.can_persist());
}

#[test]
fn operations_do_nothing_and_never_report_a_crash() {
    let mut store = build();
    store.initialize().unwrap();

    store.save(SaveMode::Full, &busy_game()).unwrap();
    assert!(!store.crashed(), "a disabled store never reports a crash");
    assert!(!store.record().crashed);

    store.save(SaveMode::ConfigOnly, &busy_game()).unwrap();
    store.clear().unwrap();
    assert!(!store.crashed());
}

#[test]
fn load_leaves_game_untouched() {
    let mut store = build();
    store.initialize().unwrap();

    let mut game = busy_game();
    store.load(&mut game, &MinigameRegistry::new(["only"])).unwrap();
    assert_eq!(game, busy_game());
}

#[test]
fn blacklist_still_round_trips_in_memory() {
    let mut store = build();
    store.initialize().unwrap();

    store.set_blacklist(&[true, false, true]).unwrap();
    assert_eq!(store.blacklist(3).unwrap(), vec![true, false, true]);
    store.save(SaveMode::ConfigOnly, &MemoryGameState::default()).unwrap();
}
