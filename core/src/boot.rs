//! Boot-time crash recovery prompt.
//!
//! Decides what the screen shown before the main menu offers and what
//! confirming a choice does. Drawing the screen and reading controllers
//! belong to the caller: it maps input to `move_left` / `move_right` /
//! `confirm` and renders `options()` with `selection()` highlighted.

use crate::{
    device::EepromDevice,
    error::SaveResult,
    game::{GameState, Level, MinigameRegistry},
    store::SaveStateStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootScreen {
    /// Nothing to ask: EEPROM present and the last match ended cleanly.
    Skip,
    /// The last match crashed; offer to restore it.
    RestorePrompt,
    /// No EEPROM; warn that crashes cannot be recovered.
    NoStorageWarning,
}

#[derive(Debug, Clone)]
pub struct BootPrompt {
    screen:    BootScreen,
    selection: usize,
}

impl BootPrompt {
    /// Pick the screen for an initialized store.
    pub fn new<D: EepromDevice>(store: &SaveStateStore<D>) -> Self {
        let screen = if !store.can_persist() {
            BootScreen::NoStorageWarning
        } else if store.crashed() {
            BootScreen::RestorePrompt
        } else {
            BootScreen::Skip
        };
        Self { screen, selection: 0 }
    }

    pub fn screen(&self) -> BootScreen {
        self.screen
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn options(&self) -> &'static [&'static str] {
        match self.screen {
            BootScreen::Skip             => &[],
            BootScreen::RestorePrompt    => &["Yes", "No"],
            BootScreen::NoStorageWarning => &["Ok"],
        }
    }

    /// Stick or d-pad left. Wraps past the last option.
    pub fn move_left(&mut self) {
        let count = self.options().len();
        if count > 0 {
            self.selection = (self.selection + 1) % count;
        }
    }

    /// Stick or d-pad right. Wraps past the first option.
    pub fn move_right(&mut self) {
        let count = self.options().len();
        if count > 0 {
            self.selection = (self.selection + count - 1) % count;
        }
    }

    /// Act on the current selection and switch level.
    ///
    /// Restoring loads the stored match and enters the minigame; any other
    /// choice clears the crash flag (when set) and goes to the main menu.
    pub fn confirm<D: EepromDevice>(
        &self,
        store: &mut SaveStateStore<D>,
        game: &mut dyn GameState,
        minigames: &MinigameRegistry,
    ) -> SaveResult<Level> {
        let level = if store.crashed() && self.selection == 0 {
            store.load(game, minigames)?;
            Level::Minigame
        } else {
            if store.crashed() {
                store.clear()?;
            }
            Level::MainMenu
        };
        game.change_level(level);
        Ok(level)
    }
}
