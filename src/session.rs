//! Game session
//!
//! Owns the cake, the live ants and the score, and exposes the three entry
//! points the host schedules: [`GameSession::tick`] every frame,
//! [`GameSession::spawn_tick`] on the spawn timer and
//! [`GameSession::resolve_guess`] on each submitted guess. All three run to
//! completion on the host's single thread.

use glam::Vec2;
use serde::Serialize;

use crate::error::{GameError, Result};
use crate::platform::AssetStatus;
use crate::settings::Settings;
use crate::sim::{
    Ant, AntId, AntSpawner, CakePiece, CakePieceRegistry, GamePhase, GameState, KanjiCatalog,
    PieceId, StepOutcome, step,
};

/// Notable things that happened, drained by the host to update its UI
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    AntSpawned { ant: AntId, target: PieceId },
    AntEliminated { ant: AntId, reading: String, score: u64 },
    PieceCarried { ant: AntId, piece: PieceId },
    PieceReturned { piece: PieceId },
    PieceStolen { piece: PieceId, remaining: usize },
    AntDropped { ant: AntId },
    GameOver { score: u64 },
}

/// Numbers a HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub remaining: usize,
    pub total: usize,
    pub ants: usize,
    pub phase: GamePhase,
}

impl Hud {
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Read-only view handed to renderers each frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub pieces: &'a [CakePiece],
    pub ants: &'a [Ant],
    pub hud: Hud,
}

/// One game from first spawn to last stolen piece
#[derive(Debug, Clone)]
pub struct GameSession {
    settings: Settings,
    state: GameState,
    registry: CakePieceRegistry,
    /// Live ants in spawn order
    ants: Vec<Ant>,
    spawner: AntSpawner,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// New session with the builtin kanji set
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self::with_catalog(settings, seed, KanjiCatalog::default())
    }

    pub fn with_catalog(settings: Settings, seed: u64, catalog: KanjiCatalog) -> Self {
        let spawner = AntSpawner::new(seed, catalog, &settings);
        Self {
            settings,
            state: GameState::new(),
            registry: CakePieceRegistry::new(),
            ants: Vec::new(),
            spawner,
            events: Vec::new(),
        }
    }

    /// Cut the cake and open the session for ticking and spawning
    pub fn initialize(&mut self) -> Result<()> {
        if self.state.is_initialized {
            return Err(GameError::AlreadyInitialized);
        }
        self.registry.initialize(
            self.settings.piece_count,
            Settings::CENTER,
            self.settings.cake_radius,
        )?;
        self.state.is_initialized = true;
        log::info!("Session ready: {} pieces", self.registry.total_count());
        Ok(())
    }

    /// React to the asset provider finishing (or failing)
    pub fn on_assets(&mut self, status: AssetStatus) -> Result<()> {
        match status {
            AssetStatus::Ready => self.initialize(),
            AssetStatus::Failed(reason) => {
                log::error!("Assets failed to load: {}", reason);
                Err(GameError::AssetLoad(reason))
            }
        }
    }

    /// Advance every ant by `dt` seconds at sim time `now`
    pub fn tick(&mut self, dt: f32, now: f64) -> StepOutcome {
        if !self.state.is_initialized || self.state.is_game_over {
            return StepOutcome::default();
        }

        let outcome = step(&mut self.ants, &mut self.registry, &self.settings, dt, now);

        for &(ant, piece) in &outcome.began_carrying {
            self.events.push(GameEvent::PieceCarried { ant, piece });
        }
        for &ant in &outcome.dropped_ant_ids {
            self.events.push(GameEvent::AntDropped { ant });
        }
        if !outcome.stolen_this_tick.is_empty() {
            let remaining = self.registry.remaining_count();
            for &piece in &outcome.stolen_this_tick {
                self.events.push(GameEvent::PieceStolen { piece, remaining });
            }
            log::info!("{} of {} pieces left", remaining, self.registry.total_count());
        }

        if self.registry.remaining_count() == 0 {
            self.end_game();
        }
        outcome
    }

    /// Spawn timer fired: add one ant if there is anything left to steal
    pub fn spawn_tick(&mut self, now: f64) -> Option<AntId> {
        if !self.state.is_initialized || self.state.is_game_over {
            return None;
        }
        let ant = self
            .spawner
            .spawn(self.state.peek_ant_id(), &self.registry, now)?;
        Some(self.admit(ant))
    }

    /// Spawn an ant at a chosen position (scripted scenarios, debugging)
    pub fn spawn_ant_at(&mut self, pos: Vec2, now: f64) -> Option<AntId> {
        if !self.state.is_initialized || self.state.is_game_over {
            return None;
        }
        let ant = self
            .spawner
            .spawn_at(self.state.peek_ant_id(), pos, &self.registry, now)?;
        Some(self.admit(ant))
    }

    /// Ids are only consumed by ants that actually join the field
    fn admit(&mut self, ant: Ant) -> AntId {
        let id = self.state.next_ant_id();
        debug_assert_eq!(id, ant.id);
        self.events.push(GameEvent::AntSpawned {
            ant: id,
            target: ant.target,
        });
        self.ants.push(ant);
        id
    }

    /// Eliminate the oldest ant whose reading matches the guess.
    ///
    /// The guess is trimmed and lowercased. Ants are eliminable in any state;
    /// a carried piece goes back on the cake unless another ant still carries
    /// it. Unmatched guesses change nothing.
    pub fn resolve_guess(&mut self, text: &str) -> Option<AntId> {
        if self.state.is_game_over {
            return None;
        }
        let guess = text.trim().to_lowercase();
        if guess.is_empty() {
            return None;
        }

        let index = self.ants.iter().position(|a| a.reading == guess)?;
        let ant = self.ants.remove(index);

        if ant.carrying_piece()
            && !self
                .ants
                .iter()
                .any(|a| a.carrying_piece() && a.target == ant.target)
            && self.registry.release(ant.target)
        {
            self.events.push(GameEvent::PieceReturned { piece: ant.target });
        }

        self.state.score = self.state.score.saturating_add(self.settings.reward);
        log::debug!(
            "Ant {} ({}) eliminated, score {}",
            ant.id,
            ant.kanji,
            self.state.score
        );
        self.events.push(GameEvent::AntEliminated {
            ant: ant.id,
            reading: ant.reading,
            score: self.state.score,
        });
        Some(ant.id)
    }

    fn end_game(&mut self) {
        if self.state.is_game_over {
            return;
        }
        self.state.is_game_over = true;
        log::info!("Game over! Final score: {}", self.state.score);
        self.events.push(GameEvent::GameOver {
            score: self.state.score,
        });
    }

    /// Take the events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn registry(&self) -> &CakePieceRegistry {
        &self.registry
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized
    }

    pub fn remaining_count(&self) -> usize {
        self.registry.remaining_count()
    }

    pub fn stolen_count(&self) -> usize {
        self.registry.stolen_count()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.state.score,
            remaining: self.registry.remaining_count(),
            total: self.registry.total_count(),
            ants: self.ants.len(),
            phase: self.state.phase(),
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            pieces: self.registry.pieces(),
            ants: &self.ants,
            hud: self.hud(),
        }
    }
}
