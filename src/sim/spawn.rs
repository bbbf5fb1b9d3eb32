//! Ant spawning
//!
//! Ants appear on a ring around the cake, wear a random kanji and head for the
//! nearest piece that has not been stolen yet.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::cake::{CakePieceRegistry, PieceId};
use super::kanji::KanjiCatalog;
use super::state::{Ant, AntId};
use crate::polar_to_cartesian;
use crate::settings::Settings;

/// Creates ants with seeded randomness
#[derive(Debug, Clone)]
pub struct AntSpawner {
    rng: Pcg32,
    catalog: KanjiCatalog,
    center: Vec2,
    spawn_radius: f32,
    speed_min: f32,
    speed_max: f32,
}

impl AntSpawner {
    pub fn new(seed: u64, catalog: KanjiCatalog, settings: &Settings) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            catalog,
            center: Settings::CENTER,
            spawn_radius: settings.spawn_radius,
            speed_min: settings.ant_speed_min,
            speed_max: settings.ant_speed_max,
        }
    }

    /// Spawn an ant at a uniformly random angle on the spawn ring.
    ///
    /// Returns `None` when every piece is already stolen.
    pub fn spawn(&mut self, id: AntId, registry: &CakePieceRegistry, now: f64) -> Option<Ant> {
        registry.available_pieces().next()?;

        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
        let pos = self.center + polar_to_cartesian(self.spawn_radius, angle);
        self.spawn_at(id, pos, registry, now)
    }

    /// Spawn an ant at a given position (targets, kanji and speed as usual)
    pub fn spawn_at(
        &mut self,
        id: AntId,
        pos: Vec2,
        registry: &CakePieceRegistry,
        now: f64,
    ) -> Option<Ant> {
        let target = nearest_available(registry, pos)?;
        let entry = self.catalog.pick(&mut self.rng);
        let speed = if self.speed_max > self.speed_min {
            self.rng.random_range(self.speed_min..=self.speed_max)
        } else {
            self.speed_min
        };

        let mut ant = Ant::new(id, pos, entry, target, speed, now);
        if let Some(piece) = registry.get(target) {
            ant.heading = super::collision::heading_toward(pos, piece.pos, 0.0);
        }

        log::debug!(
            "Ant {} ({} / {}) spawned at ({:.0}, {:.0}) -> piece {} at {:.1} u/s",
            ant.id,
            ant.kanji,
            ant.reading,
            pos.x,
            pos.y,
            target,
            speed
        );
        Some(ant)
    }
}

/// Available piece closest to `from`; ties go to the lowest id
pub fn nearest_available(registry: &CakePieceRegistry, from: Vec2) -> Option<PieceId> {
    registry
        .available_pieces()
        .min_by(|a, b| {
            let da = a.pos.distance_squared(from);
            let db = b.pos.distance_squared(from);
            da.total_cmp(&db).then(a.id.cmp(&b.id))
        })
        .map(|p| p.id)
}
