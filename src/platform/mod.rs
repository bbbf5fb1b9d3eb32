//! Platform abstraction layer
//!
//! The game core never touches the browser directly. The host hands it:
//! - a monotonic [`Clock`]
//! - an [`AssetProvider`] that reports when the game may start
//! - an [`InputBridge`] delivering submitted guesses
//!
//! Browser implementations live in [`web`] (wasm32 only).

use std::collections::VecDeque;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Outcome of loading the assets a session needs before it can start
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    Ready,
    Failed(String),
}

/// Asynchronous asset loading, polled once per frame until it settles
pub trait AssetProvider {
    /// `None` while still loading
    fn poll_status(&mut self) -> Option<AssetStatus>;
}

/// Assets compiled into the binary: ready immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledAssets;

impl AssetProvider for BundledAssets {
    fn poll_status(&mut self) -> Option<AssetStatus> {
        Some(AssetStatus::Ready)
    }
}

/// Source of player guesses, one string per submission
pub trait InputBridge {
    fn next_guess(&mut self) -> Option<String>;
}

/// FIFO of submitted guesses
#[derive(Debug, Clone, Default)]
pub struct GuessQueue {
    pending: VecDeque<String>,
}

impl GuessQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>) {
        self.pending.push_back(text.into());
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl InputBridge for GuessQueue {
    fn next_guess(&mut self) -> Option<String> {
        self.pending.pop_front()
    }
}

/// Monotonic time source, in seconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Clock advanced by hand (headless runs, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward; negative steps are ignored
    pub fn advance(&mut self, seconds: f64) {
        if seconds > 0.0 {
            self.now += seconds;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now
    }
}
