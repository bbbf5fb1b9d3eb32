//! Frame loop
//!
//! Runs the session at a fixed [`SIM_DT`] regardless of the host's frame
//! rate. Each frame:
//! 1. Poll assets until the session can start
//! 2. Resolve every guess submitted since the last frame
//! 3. Simulate whole substeps out of the accumulated frame time, firing the
//!    spawn timer on sim time
//! 4. Draw a snapshot

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::error::Result;
use crate::platform::{AssetProvider, Clock, InputBridge};
use crate::renderer::Renderer;
use crate::session::GameSession;

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Fires once per `period` of simulated time; the first fire is one full
/// period after start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTimer {
    period: f64,
    elapsed: f64,
}

impl SpawnTimer {
    pub fn new(period: f64) -> Self {
        Self {
            period,
            elapsed: 0.0,
        }
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    /// Advance by `dt`; true if the timer fired
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.period <= 0.0 {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.period {
            self.elapsed -= self.period;
            true
        } else {
            false
        }
    }
}

/// Owns a session and the platform pieces that feed and display it
pub struct GameLoop<C, A, I, R>
where
    C: Clock,
    A: AssetProvider,
    I: InputBridge,
    R: Renderer,
{
    session: GameSession,
    clock: C,
    assets: A,
    input: I,
    renderer: R,
    accumulator: f32,
    last_time: Option<f64>,
    /// Seconds simulated since the session started
    sim_time: f64,
    spawn_timer: SpawnTimer,
}

impl<C, A, I, R> GameLoop<C, A, I, R>
where
    C: Clock,
    A: AssetProvider,
    I: InputBridge,
    R: Renderer,
{
    pub fn new(session: GameSession, clock: C, assets: A, input: I, renderer: R) -> Self {
        let spawn_timer = SpawnTimer::new(session.settings().spawn_interval);
        Self {
            session,
            clock,
            assets,
            input,
            renderer,
            accumulator: 0.0,
            last_time: None,
            sim_time: 0.0,
            spawn_timer,
        }
    }

    /// Run one host frame.
    ///
    /// Errors only when the asset provider reports a failure; the host
    /// should stop scheduling frames and show the error.
    pub fn frame(&mut self) -> Result<LoopControl> {
        let now = self.clock.now();

        if !self.session.is_initialized() {
            match self.assets.poll_status() {
                Some(status) => self.session.on_assets(status)?,
                None => {
                    self.last_time = Some(now);
                    return Ok(LoopControl::Continue);
                }
            }
        }

        while let Some(guess) = self.input.next_guess() {
            self.session.resolve_guess(&guess);
        }

        let dt = match self.last_time {
            Some(last) => ((now - last) as f32).clamp(0.0, MAX_FRAME_DT),
            None => SIM_DT,
        };
        self.last_time = Some(now);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.sim_time += SIM_DT as f64;
            if self.spawn_timer.advance(SIM_DT as f64) {
                self.session.spawn_tick(self.sim_time);
            }
            self.session.tick(SIM_DT, self.sim_time);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        self.renderer.draw(&self.session.snapshot());

        if self.session.is_game_over() {
            Ok(LoopControl::Stop)
        } else {
            Ok(LoopControl::Continue)
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::platform::{AssetStatus, BundledAssets, GuessQueue, ManualClock};
    use crate::session::{GameEvent, Hud, Snapshot};
    use crate::settings::Settings;
    use crate::sim::{KanjiCatalog, KanjiEntry};
    use glam::Vec2;

    const YAMA_ONLY: &[KanjiEntry] = &[KanjiEntry::new("山", "yama")];

    #[derive(Default)]
    struct RecordingRenderer {
        huds: Vec<Hud>,
    }

    impl Renderer for RecordingRenderer {
        fn draw(&mut self, snapshot: &Snapshot<'_>) {
            self.huds.push(snapshot.hud);
        }
    }

    /// Reports `Ready` after `pending` polls
    struct SlowAssets {
        pending: u32,
        result: AssetStatus,
    }

    impl AssetProvider for SlowAssets {
        fn poll_status(&mut self) -> Option<AssetStatus> {
            if self.pending > 0 {
                self.pending -= 1;
                None
            } else {
                Some(self.result.clone())
            }
        }
    }

    type TestLoop<A> = GameLoop<ManualClock, A, GuessQueue, RecordingRenderer>;

    fn game_loop(settings: Settings) -> TestLoop<BundledAssets> {
        let session = GameSession::with_catalog(settings, 42, KanjiCatalog::new(YAMA_ONLY));
        GameLoop::new(
            session,
            ManualClock::new(),
            BundledAssets,
            GuessQueue::new(),
            RecordingRenderer::default(),
        )
    }

    fn advance_frame<A: AssetProvider>(game: &mut TestLoop<A>, seconds: f64) -> LoopControl {
        game.clock_mut().advance(seconds);
        game.frame().unwrap()
    }

    #[test]
    fn test_spawn_timer() {
        let mut timer = SpawnTimer::new(0.5);
        assert!(!timer.advance(0.25));
        assert!(timer.advance(0.25));
        assert!(!timer.advance(0.25));
        assert!(timer.advance(0.5));

        let mut off = SpawnTimer::new(0.0);
        assert!(!off.advance(10.0));
    }

    #[test]
    fn test_waits_for_assets() {
        let session = GameSession::new(Settings::default(), 1);
        let assets = SlowAssets {
            pending: 2,
            result: AssetStatus::Ready,
        };
        let mut game = GameLoop::new(
            session,
            ManualClock::new(),
            assets,
            GuessQueue::new(),
            RecordingRenderer::default(),
        );

        assert_eq!(advance_frame(&mut game, 0.1), LoopControl::Continue);
        assert_eq!(advance_frame(&mut game, 0.1), LoopControl::Continue);
        assert!(!game.session().is_initialized());
        assert!(game.renderer().huds.is_empty());
        assert_eq!(game.sim_time(), 0.0);

        advance_frame(&mut game, 0.05);
        assert!(game.session().is_initialized());
        assert_eq!(game.renderer().huds.len(), 1);
        assert_eq!(game.renderer().huds[0].remaining, 6);
        // Loading time is not simulated
        assert!(game.sim_time() < 0.06);
    }

    #[test]
    fn test_asset_failure_is_reported() {
        let session = GameSession::new(Settings::default(), 1);
        let assets = SlowAssets {
            pending: 0,
            result: AssetStatus::Failed("fonts".into()),
        };
        let mut game = GameLoop::new(
            session,
            ManualClock::new(),
            assets,
            GuessQueue::new(),
            RecordingRenderer::default(),
        );
        assert!(matches!(game.frame(), Err(GameError::AssetLoad(_))));
        assert!(!game.session().is_initialized());
    }

    #[test]
    fn test_substeps_and_clamping() {
        let mut game = game_loop(Settings::default());
        advance_frame(&mut game, 0.0);
        let start = game.sim_time();
        assert!((start - SIM_DT as f64).abs() < 1e-9);

        // Half a step accumulates without simulating
        advance_frame(&mut game, SIM_DT as f64 * 0.5);
        assert_eq!(game.sim_time(), start);

        // A long stall is clamped to MAX_FRAME_DT
        advance_frame(&mut game, 5.0);
        let simulated = game.sim_time() - start;
        assert!(simulated <= MAX_FRAME_DT as f64 + SIM_DT as f64);
        assert!(simulated >= MAX_FRAME_DT as f64 - SIM_DT as f64);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut game = game_loop(Settings {
            spawn_interval: 1.0,
            ..Settings::default()
        });
        let spawned = |game: &mut TestLoop<BundledAssets>| {
            game.session_mut()
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::AntSpawned { .. }))
                .count()
        };

        for _ in 0..50 {
            advance_frame(&mut game, SIM_DT as f64);
        }
        assert_eq!(spawned(&mut game), 0);

        for _ in 0..250 {
            advance_frame(&mut game, SIM_DT as f64);
        }
        // ~5 seconds simulated: one spawn per second, first after one second
        let count = spawned(&mut game);
        assert!((4..=5).contains(&count), "spawned {}", count);
    }

    #[test]
    fn test_guesses_resolved_each_frame() {
        let mut game = game_loop(Settings::default());
        advance_frame(&mut game, 0.0);
        let id = game
            .session_mut()
            .spawn_ant_at(Vec2::new(300.0, 0.0), 0.0)
            .unwrap();
        game.session_mut().drain_events();

        game.input_mut().push("kawa");
        game.input_mut().push(" Yama ");
        advance_frame(&mut game, SIM_DT as f64);

        assert!(game.input_mut().is_empty());
        assert!(game.session().ants().iter().all(|a| a.id != id));
        assert_eq!(game.session().score(), 1);
        assert_eq!(game.renderer().huds.last().map(|h| h.score), Some(1));
    }

    #[test]
    fn test_stops_at_game_over() {
        let mut game = game_loop(Settings {
            piece_count: 1,
            spawn_interval: 1.0,
            ..Settings::default()
        });

        let mut control = LoopControl::Continue;
        let mut frames = 0;
        while control == LoopControl::Continue && frames < 10_000 {
            control = advance_frame(&mut game, SIM_DT as f64);
            frames += 1;
        }

        assert_eq!(control, LoopControl::Stop);
        assert!(game.session().is_game_over());
        assert!(game.renderer().huds.last().unwrap().is_game_over());
        let events = game.session_mut().drain_events();
        assert!(matches!(events.last(), Some(GameEvent::GameOver { score: 0 })));
    }
}
