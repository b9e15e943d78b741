//! Crash-recovery save state for a four-player party game.
//!
//! A single fixed-size record on the cartridge EEPROM remembers the
//! match in progress. A full save marks the match live; a clean exit
//! clears the mark. Finding it still set at boot means the game
//! crashed, and the match can be restored.
//!
//! Modules:
//! - `record`:    byte layout and checksum of the persisted record
//! - `device`:    EEPROM backends (memory, image file, absent)
//! - `store`:     the save store and the crash-flag lifecycle
//! - `blacklist`: minigame exclusion bitfield
//! - `game`:      game-state interface the store captures and restores
//! - `boot`:      boot prompt decisions

pub mod blacklist;
pub mod boot;
pub mod config;
pub mod device;
pub mod error;
pub mod game;
pub mod record;
pub mod store;
pub mod types;

pub use config::StoreConfig;
pub use error::{SaveError, SaveResult};
pub use store::{SaveMode, SaveStateStore};
