//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time is injected (`dt` and `now`), never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (ants in spawn order, pieces by id)
//! - No rendering or platform dependencies

pub mod cake;
pub mod collision;
pub mod kanji;
pub mod spawn;
pub mod state;
pub mod tick;

pub use cake::{CakePiece, CakePieceRegistry, PieceId};
pub use kanji::{BUILTIN_KANJI, KanjiCatalog, KanjiEntry};
pub use spawn::{AntSpawner, nearest_available};
pub use state::{Ant, AntId, AntState, GamePhase, GameState};
pub use tick::{StepOutcome, step};
