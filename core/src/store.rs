//! The crash-recovery save store.
//!
//! RULE: Only store.rs decides what reaches the EEPROM.
//! Every persist writes the whole record at offset 0; there are no
//! partial-field writes.
//!
//! Lifecycle of the crash flag:
//!   - `save(SaveMode::Full, ..)` sets it, together with the match state.
//!   - `clear()` resets it.
//!   - Anything else leaves it alone.
//! A set flag at boot therefore means the last match never reached `clear`.

use crate::{
    blacklist,
    config::StoreConfig,
    device::EepromDevice,
    error::{SaveError, SaveResult},
    game::{GameState, MinigameRegistry},
    record::{image_checksum, image_checksum_valid, SaveRecord, RECORD_SIZE},
};

// The smallest chip must hold the record.
const _: () = assert!(RECORD_SIZE <= 512);

/// What a `save` captures before writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Mark the match live and capture the full game state.
    Full,
    /// Write the record as it stands (blacklist changes only).
    ConfigOnly,
}

impl From<bool> for SaveMode {
    /// `true` is a full update.
    fn from(full_update: bool) -> Self {
        if full_update {
            SaveMode::Full
        } else {
            SaveMode::ConfigOnly
        }
    }
}

pub struct SaveStateStore<D: EepromDevice> {
    device:      D,
    config:      StoreConfig,
    record:      SaveRecord,
    can_persist: bool,
}

impl<D: EepromDevice> SaveStateStore<D> {
    /// A store over `device`. Nothing is read until `initialize`.
    pub fn new(device: D, config: StoreConfig) -> Self {
        Self {
            device,
            config,
            record: SaveRecord::default(),
            can_persist: false,
        }
    }

    /// Detect the EEPROM and load (or format) the record.
    ///
    /// Returns `Ok(false)` when no EEPROM is fitted; the store then stays
    /// disabled and every other operation is a no-op. Read failures are
    /// returned as errors and also leave the store disabled.
    pub fn initialize(&mut self) -> SaveResult<bool> {
        self.can_persist = false;

        let kind = self.device.probe();
        if !kind.is_present() {
            log::info!("No EEPROM detected, crash recovery disabled");
            return Ok(false);
        }

        let mut bytes = [0u8; RECORD_SIZE];
        self.device.read_bytes(0, &mut bytes)?;
        let stored = SaveRecord::decode(&bytes);

        let needs_format = if !stored.is_formatted() {
            log::info!("EEPROM not formatted, starting from a blank record");
            true
        } else if self.config.verify_checksum && !image_checksum_valid(&bytes) {
            log::warn!(
                "EEPROM record checksum mismatch (stored {:#04x}, computed {:#04x}), reformatting",
                stored.checksum,
                image_checksum(&bytes)
            );
            true
        } else {
            false
        };

        self.record = if needs_format {
            SaveRecord::formatted()
        } else if image_checksum_valid(&bytes) {
            // Booleans stored as bytes other than 0/1 re-encode differently.
            let mut record = stored;
            record.refresh_checksum();
            record
        } else {
            stored
        };
        self.can_persist = true;

        if needs_format && self.config.write_on_format {
            self.write_record()?;
        }

        log::info!(
            "EEPROM {:?} ready (crashed: {})",
            kind,
            self.record.crashed
        );
        Ok(true)
    }

    /// Whether the last match ended without reaching `clear`.
    pub fn crashed(&self) -> bool {
        self.can_persist && self.record.crashed
    }

    /// Persist the record. See `SaveMode` for what each mode captures.
    pub fn save(&mut self, mode: SaveMode, game: &dyn GameState) -> SaveResult<()> {
        if !self.can_persist {
            return Ok(());
        }
        if mode == SaveMode::Full {
            self.record = self.capture(game)?;
        }
        self.write_record()
    }

    /// Push the stored match back into the game and queue its minigame.
    ///
    /// Performs no storage I/O and never touches the crash flag. An unknown
    /// minigame index is reported before any field is pushed.
    pub fn load(&self, game: &mut dyn GameState, minigames: &MinigameRegistry) -> SaveResult<()> {
        if !self.can_persist {
            return Ok(());
        }

        let record = &self.record;
        let index = usize::from(record.current_game);
        let name = minigames.name(index).ok_or(SaveError::UnknownMinigame {
            index,
            count: minigames.len(),
        })?;

        game.set_player_controllers(record.player_active);
        game.set_ai_difficulty(record.ai_difficulty);
        game.set_points_to_win(record.points_to_win);
        for (player, &points) in record.points.iter().enumerate() {
            game.set_points(player, points);
        }
        game.set_next_round(record.next_playstyle);
        game.set_chooser(usize::from(record.chooser));
        game.load_next_minigame(name);

        log::info!("Restored match, resuming minigame '{name}'");
        Ok(())
    }

    /// Mark the match resolved and persist.
    pub fn clear(&mut self) -> SaveResult<()> {
        if !self.can_persist {
            return Ok(());
        }
        self.record.crashed = false;
        self.record.refresh_checksum();
        self.write_record()
    }

    /// Replace the in-memory blacklist. Not persisted until the next save.
    pub fn set_blacklist(&mut self, flags: &[bool]) -> SaveResult<()> {
        self.record.blacklist = blacklist::pack(flags)?;
        self.record.refresh_checksum();
        Ok(())
    }

    /// Fill `out` with the blacklist flag of each minigame index.
    pub fn get_blacklist(&self, out: &mut [bool]) -> SaveResult<()> {
        blacklist::unpack(self.record.blacklist, out)
    }

    /// The blacklist flags for the first `count` minigames.
    pub fn blacklist(&self, count: usize) -> SaveResult<Vec<bool>> {
        let mut flags = vec![false; count];
        self.get_blacklist(&mut flags)?;
        Ok(flags)
    }

    pub fn can_persist(&self) -> bool {
        self.can_persist
    }

    pub fn record(&self) -> &SaveRecord {
        &self.record
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn into_device(self) -> D {
        self.device
    }

    fn capture(&self, game: &dyn GameState) -> SaveResult<SaveRecord> {
        let mut record = self.record.clone();
        record.crashed = true;
        record.player_active = game.player_controllers();
        record.ai_difficulty = game.ai_difficulty();
        record.points_to_win = game.points_to_win();
        for (player, points) in record.points.iter_mut().enumerate() {
            *points = game.points(player);
        }
        record.next_playstyle = game.next_round();
        record.chooser = byte_field("chooser", game.chooser())?;
        record.current_game = byte_field("current_minigame", game.current_minigame())?;
        record.refresh_checksum();
        Ok(record)
    }

    fn write_record(&mut self) -> SaveResult<()> {
        self.device.write_bytes(0, &self.record.encode())?;
        log::debug!(
            "Wrote save record (crashed: {}, checksum: {:#04x})",
            self.record.crashed,
            self.record.checksum
        );
        Ok(())
    }
}

fn byte_field(field: &'static str, value: usize) -> SaveResult<u8> {
    u8::try_from(value).map_err(|_| SaveError::FieldOutOfRange { field, value })
}
