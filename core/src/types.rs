//! Shared primitive types used across the save-state crate.

/// Number of controller ports on the console.
pub const MAX_PLAYERS: usize = 4;

/// Number of minigames the 32-bit blacklist field can describe.
pub const BLACKLIST_CAPACITY: usize = u32::BITS as usize;

/// Zero-based player slot, `0..MAX_PLAYERS`.
pub type PlayerIndex = usize;

/// Index into the registered minigame table.
pub type MinigameIndex = usize;

/// AI difficulty ordinal as the game defines it.
pub type AiDifficulty = u8;

/// Ordinal of the next round's play style as the game defines it.
pub type Playstyle = u8;
