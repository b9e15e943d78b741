//! The persisted save record and its byte codec.
//!
//! RULE: the on-EEPROM image is produced only by `SaveRecord::encode`
//! and read only by `SaveRecord::decode`. Field order and widths are
//! fixed; nothing depends on the in-memory layout of `SaveRecord`.
//!
//! Layout (N = MAX_PLAYERS, multi-byte fields big-endian):
//!
//! ```text
//!   0       magic "NBGJ"         4
//!   4       blacklist            4
//!   8       crashed              1
//!   9       ai difficulty        1
//!   10      points to win        1
//!   11      next playstyle       1
//!   12      player active        N
//!   12+N    points               N
//!   12+2N   chooser              1
//!   13+2N   current minigame     1
//!   14+2N   checksum             1
//! ```

use crate::types::{AiDifficulty, Playstyle, MAX_PLAYERS};
use serde::{Serialize, Serializer};

/// Tag identifying a formatted record.
pub const MAGIC: [u8; 4] = *b"NBGJ";

/// Size of the encoded record in bytes.
pub const RECORD_SIZE: usize = 15 + 2 * MAX_PLAYERS;

const OFF_BLACKLIST: usize = 4;
const OFF_CRASHED: usize = 8;
const OFF_AI_DIFFICULTY: usize = 9;
const OFF_POINTS_TO_WIN: usize = 10;
const OFF_NEXT_PLAYSTYLE: usize = 11;
const OFF_PLAYER_ACTIVE: usize = 12;
const OFF_POINTS: usize = OFF_PLAYER_ACTIVE + MAX_PLAYERS;
const OFF_CHOOSER: usize = OFF_POINTS + MAX_PLAYERS;
const OFF_CURRENT_GAME: usize = OFF_CHOOSER + 1;
const OFF_CHECKSUM: usize = OFF_CURRENT_GAME + 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SaveRecord {
    #[serde(serialize_with = "magic_as_text")]
    pub magic:          [u8; 4],
    /// Bit i set means minigame i is excluded from selection.
    pub blacklist:      u32,
    pub crashed:        bool,
    pub ai_difficulty:  AiDifficulty,
    pub points_to_win:  u8,
    pub next_playstyle: Playstyle,
    pub player_active:  [bool; MAX_PLAYERS],
    pub points:         [u8; MAX_PLAYERS],
    pub chooser:        u8,
    pub current_game:   u8,
    pub checksum:       u8,
}

impl SaveRecord {
    /// A freshly formatted record: zeroed fields, magic tag, valid checksum.
    pub fn formatted() -> Self {
        let mut record = Self {
            magic: MAGIC,
            ..Self::default()
        };
        record.refresh_checksum();
        record
    }

    pub fn is_formatted(&self) -> bool {
        self.magic == MAGIC
    }

    /// Serialize into the fixed on-storage image, stored checksum included as-is.
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[..OFF_BLACKLIST].copy_from_slice(&self.magic);
        bytes[OFF_BLACKLIST..OFF_CRASHED].copy_from_slice(&self.blacklist.to_be_bytes());
        bytes[OFF_CRASHED] = u8::from(self.crashed);
        bytes[OFF_AI_DIFFICULTY] = self.ai_difficulty;
        bytes[OFF_POINTS_TO_WIN] = self.points_to_win;
        bytes[OFF_NEXT_PLAYSTYLE] = self.next_playstyle;
        for (slot, &active) in bytes[OFF_PLAYER_ACTIVE..OFF_POINTS]
            .iter_mut()
            .zip(&self.player_active)
        {
            *slot = u8::from(active);
        }
        bytes[OFF_POINTS..OFF_CHOOSER].copy_from_slice(&self.points);
        bytes[OFF_CHOOSER] = self.chooser;
        bytes[OFF_CURRENT_GAME] = self.current_game;
        bytes[OFF_CHECKSUM] = self.checksum;
        bytes
    }

    /// Parse an on-storage image. Never fails: validity is judged separately
    /// with `is_formatted` and `image_checksum_valid` on the raw bytes.
    pub fn decode(bytes: &[u8; RECORD_SIZE]) -> Self {
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[..OFF_BLACKLIST]);
        let mut blacklist = [0u8; 4];
        blacklist.copy_from_slice(&bytes[OFF_BLACKLIST..OFF_CRASHED]);

        let mut player_active = [false; MAX_PLAYERS];
        for (active, &byte) in player_active
            .iter_mut()
            .zip(&bytes[OFF_PLAYER_ACTIVE..OFF_POINTS])
        {
            *active = byte != 0;
        }
        let mut points = [0u8; MAX_PLAYERS];
        points.copy_from_slice(&bytes[OFF_POINTS..OFF_CHOOSER]);

        Self {
            magic,
            blacklist: u32::from_be_bytes(blacklist),
            crashed: bytes[OFF_CRASHED] != 0,
            ai_difficulty: bytes[OFF_AI_DIFFICULTY],
            points_to_win: bytes[OFF_POINTS_TO_WIN],
            next_playstyle: bytes[OFF_NEXT_PLAYSTYLE],
            player_active,
            points,
            chooser: bytes[OFF_CHOOSER],
            current_game: bytes[OFF_CURRENT_GAME],
            checksum: bytes[OFF_CHECKSUM],
        }
    }

    /// Checksum over every encoded byte preceding the checksum field.
    pub fn compute_checksum(&self) -> u8 {
        checksum_of(&self.encode()[..OFF_CHECKSUM])
    }

    pub fn refresh_checksum(&mut self) {
        self.checksum = self.compute_checksum();
    }

    pub fn checksum_valid(&self) -> bool {
        self.checksum == self.compute_checksum()
    }
}

/// Additive checksum, mod 256.
pub fn checksum_of(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
}

/// Checksum of a raw image: the sum of the bytes as stored, before any
/// boolean is normalized by `decode`.
pub fn image_checksum(bytes: &[u8; RECORD_SIZE]) -> u8 {
    checksum_of(&bytes[..OFF_CHECKSUM])
}

pub fn image_checksum_valid(bytes: &[u8; RECORD_SIZE]) -> bool {
    bytes[OFF_CHECKSUM] == image_checksum(bytes)
}

fn magic_as_text<S: Serializer>(magic: &[u8; 4], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(magic))
}
