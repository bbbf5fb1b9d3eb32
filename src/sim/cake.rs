//! Cake piece registry
//!
//! Owns the cake pieces and their steal flags. Pieces are created once, with
//! ids `0..count`, and are never removed: a stolen piece stays in the list with
//! `is_stolen` set so ids stay stable for the whole session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::polar_to_cartesian;

/// Stable cake piece identifier (index into the registry)
pub type PieceId = u32;

/// A single slice of cake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CakePiece {
    pub id: PieceId,
    pub pos: Vec2,
    /// An ant is carrying it away (hidden from the cake)
    pub is_stealing: bool,
    /// Carried off the field; terminal
    pub is_stolen: bool,
}

impl CakePiece {
    /// Still part of the game (targetable, counted as remaining)
    #[inline]
    pub fn is_available(&self) -> bool {
        !self.is_stolen
    }

    /// Sitting on the cake (available and not being carried)
    #[inline]
    pub fn on_cake(&self) -> bool {
        !self.is_stolen && !self.is_stealing
    }
}

/// Collection of cake pieces
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CakePieceRegistry {
    pieces: Vec<CakePiece>,
}

impl CakePieceRegistry {
    pub fn new() -> Self {
        Self { pieces: Vec::new() }
    }

    /// Cut the cake into `count` pieces spaced evenly around `center` at
    /// `radius`, piece `i` sitting at angle `i / count * 2π`.
    pub fn initialize(&mut self, count: usize, center: Vec2, radius: f32) -> Result<()> {
        if count == 0 {
            return Err(GameError::InvalidPieceCount(count));
        }

        self.pieces = (0..count)
            .map(|i| {
                let angle = i as f32 / count as f32 * std::f32::consts::TAU;
                CakePiece {
                    id: i as PieceId,
                    pos: center + polar_to_cartesian(radius, angle),
                    is_stealing: false,
                    is_stolen: false,
                }
            })
            .collect();

        log::info!("Cake cut into {} pieces", count);
        Ok(())
    }

    /// All pieces, ordered by id
    pub fn pieces(&self) -> &[CakePiece] {
        &self.pieces
    }

    pub fn get(&self, id: PieceId) -> Option<&CakePiece> {
        self.pieces.get(id as usize)
    }

    /// Piece that an ant may still target: known and not stolen
    pub fn get_available(&self, id: PieceId) -> Option<&CakePiece> {
        self.get(id).filter(|p| p.is_available())
    }

    /// Pieces not yet stolen, in id order
    pub fn available_pieces(&self) -> impl Iterator<Item = &CakePiece> {
        self.pieces.iter().filter(|p| p.is_available())
    }

    pub fn total_count(&self) -> usize {
        self.pieces.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.available_pieces().count()
    }

    pub fn stolen_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_stolen).count()
    }

    /// Flag a piece as being carried off. Returns true if the flag changed.
    pub fn mark_stealing(&mut self, id: PieceId) -> bool {
        match self.pieces.get_mut(id as usize) {
            Some(piece) if !piece.is_stealing => {
                piece.is_stealing = true;
                true
            }
            Some(_) => false,
            None => {
                log::warn!("mark_stealing: unknown piece {}", id);
                false
            }
        }
    }

    /// Flag a piece as gone for good. Returns true only for the call that
    /// actually stole it, so each piece is reported stolen at most once.
    pub fn mark_stolen(&mut self, id: PieceId) -> bool {
        match self.pieces.get_mut(id as usize) {
            Some(piece) if !piece.is_stolen => {
                piece.is_stealing = true;
                piece.is_stolen = true;
                true
            }
            Some(_) => false,
            None => {
                log::warn!("mark_stolen: unknown piece {}", id);
                false
            }
        }
    }

    /// Put a carried piece back on the cake (its carrier was eliminated).
    /// Stolen pieces stay stolen.
    pub fn release(&mut self, id: PieceId) -> bool {
        match self.pieces.get_mut(id as usize) {
            Some(piece) if piece.is_stealing && !piece.is_stolen => {
                piece.is_stealing = false;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(count: usize) -> CakePieceRegistry {
        let mut registry = CakePieceRegistry::new();
        registry.initialize(count, Vec2::ZERO, 100.0).unwrap();
        registry
    }

    #[test]
    fn test_initialize_layout() {
        let registry = registry(4);
        assert_eq!(registry.total_count(), 4);

        let expected = [
            Vec2::new(100.0, 0.0),
            Vec2::new(0.0, 100.0),
            Vec2::new(-100.0, 0.0),
            Vec2::new(0.0, -100.0),
        ];
        for (piece, want) in registry.pieces().iter().zip(expected) {
            assert!(piece.pos.distance(want) < 1e-3, "{:?} vs {:?}", piece.pos, want);
            assert!(piece.on_cake());
        }
        let ids: Vec<_> = registry.pieces().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_single_piece_position() {
        let registry = registry(1);
        assert!(registry.get(0).unwrap().pos.distance(Vec2::new(100.0, 0.0)) < 1e-4);
    }

    #[test]
    fn test_zero_count_rejected() {
        let mut registry = CakePieceRegistry::new();
        assert!(matches!(
            registry.initialize(0, Vec2::ZERO, 100.0),
            Err(GameError::InvalidPieceCount(0))
        ));
        assert_eq!(registry.total_count(), 0);
    }

    #[test]
    fn test_flags_are_idempotent() {
        let mut registry = registry(6);

        assert!(registry.mark_stealing(2));
        assert!(!registry.mark_stealing(2));
        assert_eq!(registry.remaining_count(), 6);
        assert!(registry.get_available(2).is_some());

        assert!(registry.mark_stolen(2));
        assert!(!registry.mark_stolen(2));
        assert_eq!(registry.remaining_count(), 5);
        assert_eq!(registry.stolen_count(), 1);
        assert!(registry.get_available(2).is_none());
    }

    #[test]
    fn test_stolen_implies_stealing() {
        let mut registry = registry(3);
        registry.mark_stolen(1);
        let piece = registry.get(1).unwrap();
        assert!(piece.is_stolen && piece.is_stealing);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut registry = registry(2);
        assert!(!registry.mark_stealing(99));
        assert!(!registry.mark_stolen(99));
        assert!(!registry.release(99));
        assert!(registry.get(99).is_none());
        assert_eq!(registry.remaining_count(), 2);
    }

    #[test]
    fn test_release() {
        let mut registry = registry(2);
        assert!(!registry.release(0));

        registry.mark_stealing(0);
        assert!(registry.release(0));
        assert!(registry.get(0).unwrap().on_cake());

        registry.mark_stolen(1);
        assert!(!registry.release(1));
        assert!(registry.get(1).unwrap().is_stolen);
    }

    #[test]
    fn test_conservation() {
        let mut registry = registry(6);
        for id in [0, 3, 5, 3] {
            registry.mark_stolen(id);
            assert_eq!(registry.remaining_count() + registry.stolen_count(), 6);
        }
        let available: Vec<_> = registry.available_pieces().map(|p| p.id).collect();
        assert_eq!(available, vec![1, 2, 4]);
    }
}
