//! Game state and core simulation types
//!
//! Ants and the session bookkeeping. Cake pieces live in [`super::cake`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cake::PieceId;
use super::kanji::KanjiEntry;

/// Unique ant identifier (monotonic per session)
pub type AntId = u32;

/// Where an ant is in its heist
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AntState {
    /// Walking toward the target piece
    Approaching,
    /// Standing at the piece; `pause_start` is the sim time it arrived
    Stealing { pause_start: f64 },
    /// Carrying the piece radially off the field
    Escaping,
}

/// An ant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ant {
    pub id: AntId,
    pub pos: Vec2,
    /// Facing angle in radians (renderers orient the sprite with it)
    pub heading: f32,
    pub kanji: String,
    /// Lowercase romaji the player must type
    pub reading: String,
    pub state: AntState,
    /// Piece chosen at spawn; never reassigned
    pub target: PieceId,
    /// Units per second, fixed for the ant's lifetime
    pub speed: f32,
    /// Sim time the ant appeared
    pub spawned_at: f64,
}

impl Ant {
    pub fn new(
        id: AntId,
        pos: Vec2,
        entry: &KanjiEntry,
        target: PieceId,
        speed: f32,
        spawned_at: f64,
    ) -> Self {
        Self {
            id,
            pos,
            heading: 0.0,
            kanji: entry.kanji.to_owned(),
            reading: entry.reading.to_lowercase(),
            state: AntState::Approaching,
            target,
            speed,
            spawned_at,
        }
    }

    /// True once the ant has picked up its piece
    #[inline]
    pub fn carrying_piece(&self) -> bool {
        matches!(self.state, AntState::Escaping)
    }

    /// When the ant started stealing, if it is stealing now
    #[inline]
    pub fn pause_start(&self) -> Option<f64> {
        match self.state {
            AntState::Stealing { pause_start } => Some(pause_start),
            _ => None,
        }
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for assets / cake
    Loading,
    /// Ants are spawning and moving
    Playing,
    /// Every piece is gone
    GameOver,
}

/// Session bookkeeping
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    /// Score (reward per eliminated ant)
    pub score: u64,
    /// One-way false -> true
    pub is_game_over: bool,
    /// Cake exists and loops may run
    pub is_initialized: bool,
    /// Next ant ID
    next_ant_id: AntId,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// ID the next spawned ant will get
    pub fn peek_ant_id(&self) -> AntId {
        self.next_ant_id
    }

    /// Allocate a new ant ID
    pub fn next_ant_id(&mut self) -> AntId {
        let id = self.next_ant_id;
        self.next_ant_id += 1;
        id
    }

    pub fn phase(&self) -> GamePhase {
        if self.is_game_over {
            GamePhase::GameOver
        } else if self.is_initialized {
            GamePhase::Playing
        } else {
            GamePhase::Loading
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ant_approaches() {
        let entry = KanjiEntry::new("山", "YAMA");
        let ant = Ant::new(3, Vec2::new(300.0, 0.0), &entry, 1, 25.0, 4.5);
        assert_eq!(ant.state, AntState::Approaching);
        assert_eq!(ant.reading, "yama");
        assert!(!ant.carrying_piece());
        assert_eq!(ant.pause_start(), None);
    }

    #[test]
    fn test_ant_ids_are_monotonic() {
        let mut state = GameState::new();
        assert_eq!(state.peek_ant_id(), 0);
        assert_eq!(state.peek_ant_id(), 0);
        let ids: Vec<_> = (0..4).map(|_| state.next_ant_id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(state.peek_ant_id(), 4);
    }

    #[test]
    fn test_phase() {
        let mut state = GameState::new();
        assert_eq!(state.phase(), GamePhase::Loading);
        state.is_initialized = true;
        assert_eq!(state.phase(), GamePhase::Playing);
        state.is_game_over = true;
        assert_eq!(state.phase(), GamePhase::GameOver);
    }
}
