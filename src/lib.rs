//! Kanji Ants - defend the cake by typing kanji readings
//!
//! Core modules:
//! - `sim`: Deterministic simulation (cake pieces, ant state machine, spawning)
//! - `session`: Game session orchestration (score, guesses, game over)
//! - `driver`: Fixed-timestep frame loop and spawn cadence
//! - `renderer`: Snapshot drawing (Canvas2D on the web)
//! - `platform`: Input, asset and clock abstractions
//! - `settings`: Data-driven game tuning

pub mod driver;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use driver::{GameLoop, LoopControl, SpawnTimer};
pub use error::{GameError, Result};
pub use session::{GameEvent, GameSession, Hud, Snapshot};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the driver will simulate (tab switches, breakpoints)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Cake layout
    pub const DEFAULT_PIECE_COUNT: usize = 6;
    pub const CAKE_RADIUS: f32 = 100.0;

    /// Ants spawn on this ring, well outside the cake
    pub const SPAWN_RADIUS: f32 = 300.0;
    /// An escaping ant is gone once it is this far from the center
    pub const OFF_FIELD_RADIUS: f32 = 500.0;
    /// Distance below which an approaching ant is at its piece
    pub const ARRIVAL_EPSILON: f32 = 5.0;
    /// Seconds an ant spends at the piece before carrying it off
    pub const STEAL_DURATION: f64 = 1.0;

    /// Ant speed range (units/s), fixed per ant
    pub const ANT_SPEED_MIN: f32 = 20.0;
    pub const ANT_SPEED_MAX: f32 = 30.0;

    /// Seconds between spawns
    pub const SPAWN_INTERVAL: f64 = 3.0;
    /// Points per eliminated ant
    pub const ANT_REWARD: u64 = 1;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_polar_round_trip_axis() {
        let p = polar_to_cartesian(100.0, FRAC_PI_2);
        assert!(p.x.abs() < 1e-4);
        assert!((p.y - 100.0).abs() < 1e-4);

        let (r, theta) = cartesian_to_polar(p);
        assert!((r - 100.0).abs() < 1e-4);
        assert!((theta - FRAC_PI_2).abs() < 1e-4);
    }
}
