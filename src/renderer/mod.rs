//! Rendering module
//!
//! Renderers only ever see a read-only [`Snapshot`]. The browser build draws
//! with Canvas2D ([`canvas`]); headless runs log the HUD instead.

use glam::Vec2;

use crate::cartesian_to_polar;
use crate::session::{Hud, Snapshot};

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

/// Draws one frame from a snapshot
pub trait Renderer {
    fn draw(&mut self, snapshot: &Snapshot<'_>);
}

/// Maps world units (origin at the cake, +Y up) to screen pixels (+Y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Pixels per world unit
    pub scale: f32,
}

impl Viewport {
    /// Fit a circle of `world_radius` around the origin inside the screen
    pub fn fit(width: f32, height: f32, world_radius: f32) -> Self {
        let scale = if world_radius > 0.0 {
            0.5 * width.min(height) / world_radius
        } else {
            1.0
        };
        Self {
            width,
            height,
            scale,
        }
    }

    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(
            self.width * 0.5 + world.x * self.scale,
            self.height * 0.5 - world.y * self.scale,
        )
    }

    pub fn to_pixels(&self, world_len: f32) -> f32 {
        world_len * self.scale
    }
}

/// Angular extent (start, end) in world radians of the wedge drawn for a
/// piece at `piece_pos` on a cake cut into `count` pieces
pub fn piece_wedge(piece_pos: Vec2, center: Vec2, count: usize) -> (f32, f32) {
    let (_, theta) = cartesian_to_polar(piece_pos - center);
    let half = std::f32::consts::PI / count.max(1) as f32;
    (theta - half, theta + half)
}

/// One-line HUD text
pub fn hud_line(hud: &Hud) -> String {
    let mut line = format!(
        "score {} | cake {}/{} | ants {}",
        hud.score, hud.remaining, hud.total, hud.ants
    );
    if hud.is_game_over() {
        line.push_str(" | GAME OVER");
    }
    line
}

/// Headless renderer: logs the HUD whenever it changes
#[derive(Debug, Default)]
pub struct HudLogRenderer {
    last: Option<Hud>,
    frames: u64,
}

impl HudLogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_hud(&self) -> Option<Hud> {
        self.last
    }
}

impl Renderer for HudLogRenderer {
    fn draw(&mut self, snapshot: &Snapshot<'_>) {
        self.frames += 1;
        if self.last != Some(snapshot.hud) {
            log::info!("{}", hud_line(&snapshot.hud));
            self.last = Some(snapshot.hud);
        }
    }
}
