//! Level unlock progress
//!
//! The engine never reads or writes durable storage. The host loads this value,
//! passes it to `Game::start_level`, and applies `LevelUnlockNeeded` events back
//! to its own store.

use serde::{Deserialize, Serialize};

/// Highest level the player may start (level 1 is always open)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockProgress {
    unlocked_through: u32,
}

impl Default for UnlockProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl UnlockProgress {
    /// Fresh progress: only level 1 is open
    pub fn new() -> Self {
        Self { unlocked_through: 1 }
    }

    /// Progress with every level up to and including `level_id` open
    pub fn through(level_id: u32) -> Self {
        Self {
            unlocked_through: level_id.max(1),
        }
    }

    pub fn unlocked_through(&self) -> u32 {
        self.unlocked_through
    }

    pub fn is_unlocked(&self, level_id: u32) -> bool {
        level_id >= 1 && level_id <= self.unlocked_through
    }

    /// Apply an unlock notification. Returns true if progress advanced.
    pub fn record_unlock(&mut self, level_id: u32) -> bool {
        if level_id <= self.unlocked_through {
            return false;
        }
        self.unlocked_through = level_id;
        log::info!("Unlocked levels through {}", level_id);
        true
    }
}
