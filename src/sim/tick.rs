//! Ant state machine tick
//!
//! Advances every ant by one timestep:
//!
//! ```text
//! Approaching --(dist < arrival_epsilon)--> Stealing
//! Stealing    --(now - pause_start > steal_duration)--> Escaping
//! Escaping    --(dist from center > off_field_radius)--> removed, piece stolen
//! ```
//!
//! Every ant first moves and decides its fate against the cake as it was at
//! the start of the tick. Only then are piece flags changed and finished ants
//! compacted out, so no ant sees another ant's effect mid-sweep and the
//! result does not depend on iteration order.

use super::cake::{CakePieceRegistry, PieceId};
use super::collision::{escape_direction, has_arrived, heading_toward, is_off_field, step_toward};
use super::state::{Ant, AntId, AntState};
use crate::settings::Settings;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutcome {
    /// Pieces that became stolen this tick (each at most once per session)
    pub stolen_this_tick: Vec<PieceId>,
    /// Every ant removed this tick (escaped or dropped)
    pub removed_ant_ids: Vec<AntId>,
    /// Ants that picked up their piece this tick
    pub began_carrying: Vec<(AntId, PieceId)>,
    /// Ants removed because their target was no longer valid
    pub dropped_ant_ids: Vec<AntId>,
}

impl StepOutcome {
    pub fn is_empty(&self) -> bool {
        self.stolen_this_tick.is_empty()
            && self.removed_ant_ids.is_empty()
            && self.began_carrying.is_empty()
    }
}

/// Per-ant decision made in the first pass
#[derive(Debug, Clone, Copy, PartialEq)]
enum AntFate {
    Continue,
    BeganCarrying(PieceId),
    Escaped(PieceId),
    Dropped,
}

/// Advance all ants by `dt` seconds; `now` is the current sim time.
pub fn step(
    ants: &mut Vec<Ant>,
    registry: &mut CakePieceRegistry,
    settings: &Settings,
    dt: f32,
    now: f64,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    // Pass 1: movement and transitions against the start-of-tick cake
    let mut fates: Vec<AntFate> = ants
        .iter_mut()
        .map(|ant| advance_ant(ant, registry, settings, dt, now))
        .collect();

    // Pass 2: apply escapes; a piece that leaves the field this tick is
    // never picked up this tick
    for (ant, fate) in ants.iter().zip(&fates) {
        if let AntFate::Escaped(piece) = *fate {
            if registry.mark_stolen(piece) {
                log::info!("Ant {} escaped with piece {}", ant.id, piece);
                outcome.stolen_this_tick.push(piece);
            }
        }
    }

    // Any non-carrier whose piece just left the field loses its target now
    // rather than next tick
    if !outcome.stolen_this_tick.is_empty() {
        for (ant, fate) in ants.iter().zip(fates.iter_mut()) {
            let lost = match *fate {
                AntFate::Continue => {
                    !ant.carrying_piece() && outcome.stolen_this_tick.contains(&ant.target)
                }
                AntFate::BeganCarrying(piece) => outcome.stolen_this_tick.contains(&piece),
                AntFate::Escaped(_) | AntFate::Dropped => false,
            };
            if lost {
                *fate = AntFate::Dropped;
            }
        }
    }

    // Pass 3: apply pickups that survived
    for (ant, fate) in ants.iter().zip(&fates) {
        if let AntFate::BeganCarrying(piece) = *fate {
            registry.mark_stealing(piece);
            outcome.began_carrying.push((ant.id, piece));
        }
    }

    // Pass 4: collect removals
    for (ant, fate) in ants.iter().zip(&fates) {
        match fate {
            AntFate::Escaped(_) => outcome.removed_ant_ids.push(ant.id),
            AntFate::Dropped => {
                log::warn!(
                    "Ant {} dropped: target piece {} is no longer available",
                    ant.id,
                    ant.target
                );
                outcome.dropped_ant_ids.push(ant.id);
                outcome.removed_ant_ids.push(ant.id);
            }
            AntFate::Continue | AntFate::BeganCarrying(_) => {}
        }
    }

    if !outcome.removed_ant_ids.is_empty() {
        let mut fates = fates.iter();
        ants.retain(|_| {
            matches!(
                fates.next(),
                Some(AntFate::Continue | AntFate::BeganCarrying(_))
            )
        });
    }

    outcome
}

fn advance_ant(
    ant: &mut Ant,
    registry: &CakePieceRegistry,
    settings: &Settings,
    dt: f32,
    now: f64,
) -> AntFate {
    match ant.state {
        AntState::Approaching => {
            let Some(piece) = registry.get_available(ant.target) else {
                return AntFate::Dropped;
            };

            // Chase the piece's current position, not where it was at spawn
            let target = piece.pos;
            ant.pos = step_toward(ant.pos, target, ant.speed * dt);
            ant.heading = heading_toward(ant.pos, target, ant.heading);

            if has_arrived(ant.pos, target, settings.arrival_epsilon) {
                ant.state = AntState::Stealing { pause_start: now };
            }
            AntFate::Continue
        }

        AntState::Stealing { pause_start } => {
            if registry.get_available(ant.target).is_none() {
                return AntFate::Dropped;
            }
            if now - pause_start > settings.steal_duration {
                ant.state = AntState::Escaping;
                return AntFate::BeganCarrying(ant.target);
            }
            AntFate::Continue
        }

        AntState::Escaping => {
            let dir = escape_direction(ant.pos, Settings::CENTER);
            ant.pos += dir * ant.speed * dt;
            ant.heading = dir.y.atan2(dir.x);

            if is_off_field(ant.pos, Settings::CENTER, settings.off_field_radius) {
                AntFate::Escaped(ant.target)
            } else {
                AntFate::Continue
            }
        }
    }
}
