use thiserror::Error;

use crate::types::MinigameIndex;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("EEPROM access out of bounds: offset {offset} + {len} bytes exceeds capacity {capacity}")]
    OutOfBounds { offset: usize, len: usize, capacity: usize },

    #[error("Blacklist of {len} entries exceeds capacity of {capacity}")]
    BlacklistOverflow { len: usize, capacity: usize },

    #[error("Game state field '{field}' = {value} does not fit in one byte")]
    FieldOutOfRange { field: &'static str, value: usize },

    #[error("Minigame index {index} is not registered ({count} minigames)")]
    UnknownMinigame { index: MinigameIndex, count: usize },

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type SaveResult<T> = Result<T, SaveError>;
