//! Game settings and tuning
//!
//! Every balance knob lives here. The web build reads an inline JSON block from
//! the page, the native build reads a file named by `KANJI_ANTS_SETTINGS`.
//! Missing fields fall back to the defaults in [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, Result};

/// Game tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Cake ===
    /// Number of pieces the cake is cut into
    pub piece_count: usize,
    /// Distance of each piece from the cake center
    pub cake_radius: f32,

    // === Ants ===
    /// Ring ants appear on
    pub spawn_radius: f32,
    /// Escaping ants vanish beyond this distance from the center
    pub off_field_radius: f32,
    /// Approaching ants closer than this to their piece start stealing
    pub arrival_epsilon: f32,
    /// Seconds spent stealing before the ant carries the piece away
    pub steal_duration: f64,
    /// Slowest ant (units/s)
    pub ant_speed_min: f32,
    /// Fastest ant (units/s)
    pub ant_speed_max: f32,

    // === Pacing / scoring ===
    /// Seconds between spawns
    pub spawn_interval: f64,
    /// Points awarded per eliminated ant
    pub reward: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            piece_count: DEFAULT_PIECE_COUNT,
            cake_radius: CAKE_RADIUS,

            spawn_radius: SPAWN_RADIUS,
            off_field_radius: OFF_FIELD_RADIUS,
            arrival_epsilon: ARRIVAL_EPSILON,
            steal_duration: STEAL_DURATION,
            ant_speed_min: ANT_SPEED_MIN,
            ant_speed_max: ANT_SPEED_MAX,

            spawn_interval: SPAWN_INTERVAL,
            reward: ANT_REWARD,
        }
    }
}

impl Settings {
    /// The play field is centered on the cake
    pub const CENTER: Vec2 = Vec2::ZERO;

    /// Parse settings JSON over the defaults and validate the result
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would make the game unplayable or break the ant
    /// state machine (ants spawning inside the arrival radius, escaping ants
    /// that can never leave the field).
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| -> Result<()> { Err(GameError::InvalidSettings(msg)) };

        if self.piece_count == 0 {
            return fail("piece_count must be at least 1".into());
        }
        if !(self.arrival_epsilon > 0.0) {
            return fail(format!("arrival_epsilon must be positive, got {}", self.arrival_epsilon));
        }
        if !(self.steal_duration >= 0.0) {
            return fail(format!("steal_duration must not be negative, got {}", self.steal_duration));
        }
        if !(self.ant_speed_min > 0.0) || self.ant_speed_min > self.ant_speed_max {
            return fail(format!(
                "ant speed range must be positive and ordered, got {}..{}",
                self.ant_speed_min, self.ant_speed_max
            ));
        }
        if !(self.spawn_interval > 0.0) {
            return fail(format!("spawn_interval must be positive, got {}", self.spawn_interval));
        }
        if self.spawn_radius <= self.cake_radius + self.arrival_epsilon {
            return fail(format!(
                "spawn_radius {} must clear the cake ({} + {})",
                self.spawn_radius, self.cake_radius, self.arrival_epsilon
            ));
        }
        if self.off_field_radius <= self.spawn_radius {
            return fail(format!(
                "off_field_radius {} must be beyond spawn_radius {}",
                self.off_field_radius, self.spawn_radius
            ));
        }
        Ok(())
    }

    /// Element holding the inline settings JSON (web only)
    #[allow(dead_code)]
    const SETTINGS_ELEMENT_ID: &'static str = "game-settings";

    /// Environment variable naming a settings file (native only)
    #[allow(dead_code)]
    const SETTINGS_ENV: &'static str = "KANJI_ANTS_SETTINGS";

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::SETTINGS_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => Self::parse_or_default(&json),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from the file named by `KANJI_ANTS_SETTINGS` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => Self::parse_or_default(&json),
            Err(e) => {
                log::warn!("Could not read settings file {}: {}", path, e);
                Self::default()
            }
        }
    }

    fn parse_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings ({}), using defaults", e);
                Self::default()
            }
        }
    }
}
