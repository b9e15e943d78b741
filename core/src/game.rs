//! The game-side collaborators of the save store.
//!
//! RULE: the store never reads or writes game state directly.
//! Everything it captures on save and restores on load goes
//! through `GameState`. Minigame names come from `MinigameRegistry`.

use crate::types::{AiDifficulty, MinigameIndex, PlayerIndex, Playstyle, MAX_PLAYERS};
use serde::{Deserialize, Serialize};

/// Top-level screens the game can switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    MainMenu,
    Minigame,
}

/// The state-provider interface the store captures from and restores into.
pub trait GameState {
    // ── Match setup ──────────────────────────────
    /// Controller-present flag per player slot.
    fn player_controllers(&self) -> [bool; MAX_PLAYERS];
    fn set_player_controllers(&mut self, active: [bool; MAX_PLAYERS]);

    fn ai_difficulty(&self) -> AiDifficulty;
    fn set_ai_difficulty(&mut self, difficulty: AiDifficulty);

    fn points_to_win(&self) -> u8;
    fn set_points_to_win(&mut self, points: u8);

    // ── Scores ───────────────────────────────────
    fn points(&self, player: PlayerIndex) -> u8;
    fn set_points(&mut self, player: PlayerIndex, points: u8);

    // ── Round flow ───────────────────────────────
    fn next_round(&self) -> Playstyle;
    fn set_next_round(&mut self, playstyle: Playstyle);

    /// Player who picks the next minigame.
    fn chooser(&self) -> PlayerIndex;
    fn set_chooser(&mut self, player: PlayerIndex);

    /// Index of the minigame currently being played.
    fn current_minigame(&self) -> MinigameIndex;

    // ── Transitions ──────────────────────────────
    /// Queue the minigame with this internal name as the next one to run.
    fn load_next_minigame(&mut self, internal_name: &str);
    fn change_level(&mut self, level: Level);
}

/// Minigames known to the game, in registration order.
/// The position of a name is its `MinigameIndex`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinigameRegistry {
    names: Vec<String>,
}

impl MinigameRegistry {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, index: MinigameIndex) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<MinigameIndex> {
        self.names.iter().position(|n| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Plain in-memory game state. Used by tooling to preview a restore,
/// and by tests as a recording `GameState`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryGameState {
    pub player_controllers: [bool; MAX_PLAYERS],
    pub ai_difficulty:      AiDifficulty,
    pub points_to_win:      u8,
    pub points:             [u8; MAX_PLAYERS],
    pub next_round:         Playstyle,
    pub chooser:            PlayerIndex,
    pub current_minigame:   MinigameIndex,
    /// Last minigame requested through `load_next_minigame`.
    pub queued_minigame:    Option<String>,
    /// Last level requested through `change_level`.
    pub level:              Option<Level>,
}

impl GameState for MemoryGameState {
    fn player_controllers(&self) -> [bool; MAX_PLAYERS] {
        self.player_controllers
    }

    fn set_player_controllers(&mut self, active: [bool; MAX_PLAYERS]) {
        self.player_controllers = active;
    }

    fn ai_difficulty(&self) -> AiDifficulty {
        self.ai_difficulty
    }

    fn set_ai_difficulty(&mut self, difficulty: AiDifficulty) {
        self.ai_difficulty = difficulty;
    }

    fn points_to_win(&self) -> u8 {
        self.points_to_win
    }

    fn set_points_to_win(&mut self, points: u8) {
        self.points_to_win = points;
    }

    fn points(&self, player: PlayerIndex) -> u8 {
        self.points.get(player).copied().unwrap_or(0)
    }

    fn set_points(&mut self, player: PlayerIndex, points: u8) {
        if let Some(slot) = self.points.get_mut(player) {
            *slot = points;
        }
    }

    fn next_round(&self) -> Playstyle {
        self.next_round
    }

    fn set_next_round(&mut self, playstyle: Playstyle) {
        self.next_round = playstyle;
    }

    fn chooser(&self) -> PlayerIndex {
        self.chooser
    }

    fn set_chooser(&mut self, player: PlayerIndex) {
        self.chooser = player;
    }

    fn current_minigame(&self) -> MinigameIndex {
        self.current_minigame
    }

    fn load_next_minigame(&mut self, internal_name: &str) {
        self.queued_minigame = Some(internal_name.to_string());
    }

    fn change_level(&mut self, level: Level) {
        self.level = Some(level);
    }
}
