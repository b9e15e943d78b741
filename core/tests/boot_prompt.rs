//! Boot prompt decisions.
//!
//! Tests cover: which screen each store state produces, selection
//! wrap-around, and the level and store effects of each confirmation.

use savestate_core::{
    boot::{BootPrompt, BootScreen},
    device::{EepromKind, MemoryEeprom, NoEeprom},
    game::{Level, MemoryGameState, MinigameRegistry},
    SaveMode, SaveStateStore, StoreConfig,
};

fn minigames() -> MinigameRegistry {
    MinigameRegistry::new(["avoider", "snake", "sumo"])
}

fn booted_store(crashed: bool) -> SaveStateStore<MemoryEeprom> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut store = SaveStateStore::new(MemoryEeprom::new(EepromKind::Eeprom4k), StoreConfig::default_test());
    store.initialize().expect("initialize");
    if crashed {
        let game = MemoryGameState {
            player_controllers: [true, true, false, false],
            points:             [2, 3, 0, 0],
            current_minigame:   2,
            ..Default::default()
        };
        store.save(SaveMode::Full, &game).expect("save");
    }
    store
}

#[test]
fn clean_boot_skips_the_prompt() {
    let mut store = booted_store(false);
    let prompt = BootPrompt::new(&store);
    assert_eq!(prompt.screen(), BootScreen::Skip);
    assert!(prompt.options().is_empty());

    let mut game = MemoryGameState::default();
    let level = prompt.confirm(&mut store, &mut game, &minigames()).unwrap();
    assert_eq!(level, Level::MainMenu);
    assert_eq!(game.level, Some(Level::MainMenu));
    assert_eq!(store.device().write_count(), 0, "nothing to clear on a clean boot");
}

#[test]
fn crash_offers_restore_with_yes_selected() {
    let store = booted_store(true);
    let prompt = BootPrompt::new(&store);
    assert_eq!(prompt.screen(), BootScreen::RestorePrompt);
    assert_eq!(prompt.options(), &["Yes", "No"]);
    assert_eq!(prompt.selection(), 0);
}

#[test]
fn accepting_restore_loads_match_and_enters_minigame() {
    let mut store = booted_store(true);
    let prompt = BootPrompt::new(&store);

    let mut game = MemoryGameState::default();
    let level = prompt.confirm(&mut store, &mut game, &minigames()).unwrap();

    assert_eq!(level, Level::Minigame);
    assert_eq!(game.level, Some(Level::Minigame));
    assert_eq!(game.points, [2, 3, 0, 0]);
    assert_eq!(game.queued_minigame.as_deref(), Some("sumo"));
    assert!(store.crashed(), "restoring keeps the match live");
}

#[test]
fn declining_restore_clears_crash_and_goes_to_menu() {
    let mut store = booted_store(true);
    let mut prompt = BootPrompt::new(&store);
    prompt.move_left();
    assert_eq!(prompt.selection(), 1);

    let mut game = MemoryGameState::default();
    let level = prompt.confirm(&mut store, &mut game, &minigames()).unwrap();

    assert_eq!(level, Level::MainMenu);
    assert!(!store.crashed());
    assert_eq!(game.queued_minigame, None);
}

#[test]
fn selection_wraps_in_both_directions() {
    let store = booted_store(true);
    let mut prompt = BootPrompt::new(&store);

    prompt.move_right();
    assert_eq!(prompt.selection(), 1, "right from the first option wraps to the last");
    prompt.move_left();
    assert_eq!(prompt.selection(), 0, "left from the last option wraps to the first");
    prompt.move_left();
    prompt.move_left();
    assert_eq!(prompt.selection(), 0);
}

#[test]
fn missing_chip_shows_single_ok_warning() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut store = SaveStateStore::new(NoEeprom, StoreConfig::default_test());
    store.initialize().unwrap();

    let mut prompt = BootPrompt::new(&store);
    assert_eq!(prompt.screen(), BootScreen::NoStorageWarning);
    assert_eq!(prompt.options(), &["Ok"]);
    prompt.move_left();
    prompt.move_right();
    assert_eq!(prompt.selection(), 0);

    let mut game = MemoryGameState::default();
    let level = prompt.confirm(&mut store, &mut game, &minigames()).unwrap();
    assert_eq!(level, Level::MainMenu);
}
