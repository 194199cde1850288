//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-driven ticks only (no wall-clock reads)
//! - Seeded RNG only
//! - Stable iteration order (live items kept oldest first)
//! - No rendering, audio or storage dependencies

pub mod catalog;
pub mod collision;
pub mod combo;
pub mod level;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use catalog::{Catalog, ItemKind};
pub use collision::{Capture, first_overlap};
pub use combo::{ComboBonus, ComboTracker};
pub use level::{LevelDefinition, LevelTable};
pub use spawn::{SpawnScheduler, enforce_live_cap};
pub use state::{
    Actor, Direction, FallingItem, GameEvent, RunSnapshot, RunState, TickKind, actor_size,
};
pub use tick::{RestartTarget, Run, RunConfig};
