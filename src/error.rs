//! Error types for the game core.
//!
//! Only setup can fail. Everything that happens once the loops run (missed
//! guesses, spawns with nothing left to steal, ants with a dead target) is part
//! of normal play and never surfaces as an error.

/// Errors raised while configuring or starting a session.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The cake must have at least one piece.
    #[error("invalid cake piece count: {0}")]
    InvalidPieceCount(usize),

    /// `initialize` was called on a session that already has its cake.
    #[error("session is already initialized")]
    AlreadyInitialized,

    /// The asset provider could not load what the game needs to start.
    #[error("asset loading failed: {0}")]
    AssetLoad(String),

    /// Settings parsed but describe an unplayable field.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Settings JSON could not be parsed.
    #[error("settings parse error: {0}")]
    SettingsParse(#[from] serde_json::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, GameError>;
