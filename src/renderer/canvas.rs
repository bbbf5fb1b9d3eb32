//! Canvas2D renderer

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Renderer, Viewport, piece_wedge};
use crate::error::{GameError, Result};
use crate::polar_to_cartesian;
use crate::session::Snapshot;
use crate::settings::Settings;
use crate::sim::{Ant, AntState, CakePiece};

const BACKGROUND: &str = "#1d2b1f";
const PLATE: &str = "#e8e2d0";
const CAKE: &str = "#f4c2c2";
const CAKE_STEALING: &str = "#d98f8f";
const ANT: &str = "#2a1a12";
const ANT_CARRYING: &str = "#6b2f1a";
const KANJI: &str = "#ffffff";
const KANJI_FONT: &str = "bold 22px 'Noto Sans JP', sans-serif";

/// Ant body radius in world units
const ANT_RADIUS: f32 = 14.0;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
    center: Vec2,
    cake_radius: f32,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement, settings: &Settings) -> Result<Self> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| GameError::AssetLoad(format!("canvas context: {:?}", e)))?
            .ok_or_else(|| GameError::AssetLoad("canvas has no 2d context".into()))?
            .dyn_into()
            .map_err(|_| GameError::AssetLoad("2d context has the wrong type".into()))?;

        // Everything up to the spawn ring stays on screen
        let viewport = Viewport::fit(
            canvas.width() as f32,
            canvas.height() as f32,
            settings.spawn_radius + ANT_RADIUS * 2.0,
        );

        Ok(Self {
            ctx,
            viewport,
            center: Settings::CENTER,
            cake_radius: settings.cake_radius,
        })
    }

    fn circle(&self, world: Vec2, radius: f32, color: &str) {
        let p = self.viewport.to_screen(world);
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx
            .arc(
                p.x as f64,
                p.y as f64,
                self.viewport.to_pixels(radius) as f64,
                0.0,
                TAU,
            )
            .ok();
        self.ctx.fill();
    }

    fn draw_piece(&self, piece: &CakePiece, count: usize) {
        if piece.is_stolen {
            return;
        }
        let (start, end) = piece_wedge(piece.pos, self.center, count);
        let c = self.viewport.to_screen(self.center);
        let color = if piece.is_stealing { CAKE_STEALING } else { CAKE };

        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx.move_to(c.x as f64, c.y as f64);
        // Screen Y is flipped, so world angles turn the other way
        self.ctx
            .arc_with_anticlockwise(
                c.x as f64,
                c.y as f64,
                self.viewport.to_pixels(self.cake_radius) as f64,
                -start as f64,
                -end as f64,
                true,
            )
            .ok();
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn draw_ant(&self, ant: &Ant) {
        let carrying = matches!(ant.state, AntState::Escaping);
        self.circle(ant.pos, ANT_RADIUS, if carrying { ANT_CARRYING } else { ANT });

        if carrying {
            // The piece rides just behind the head
            let crumb = ant.pos - polar_to_cartesian(ANT_RADIUS, ant.heading);
            self.circle(crumb, ANT_RADIUS * 0.5, CAKE);
        }

        let p = self.viewport.to_screen(ant.pos);
        self.ctx.set_fill_style_str(KANJI);
        self.ctx.fill_text(&ant.kanji, p.x as f64, p.y as f64).ok();
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, snapshot: &Snapshot<'_>) {
        let (w, h) = (self.viewport.width as f64, self.viewport.height as f64);
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        self.circle(self.center, self.cake_radius * 1.1, PLATE);
        let count = snapshot.pieces.len();
        for piece in snapshot.pieces {
            self.draw_piece(piece, count);
        }

        self.ctx.set_font(KANJI_FONT);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        for ant in snapshot.ants {
            self.draw_ant(ant);
        }
    }
}
