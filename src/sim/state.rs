//! Run state and core simulation types
//!
//! Everything a single run owns lives here. Nothing is shared between runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::ItemKind;
use super::combo::ComboBonus;
use crate::consts::*;
use crate::settings::PlayArea;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Created, waiting for the start command
    Idle,
    /// Active gameplay (ticks and commands are applied)
    Running,
    /// Gated: ticks and moves are discarded
    Paused,
    /// Target weight reached
    Completed,
    /// Time ran out below the target
    Failed,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed | RunState::Failed)
    }
}

/// The two host timer signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickKind {
    /// Coarse tick (one second of game time)
    Time,
    /// Fine tick (item motion and collision)
    Motion,
}

/// Directional movement command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in play-area coordinates (y grows downward)
    pub fn delta(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// A falling food item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallingItem {
    pub id: u32,
    pub kind: ItemKind,
    pub lane: u8,
    /// Box center
    pub pos: Vec2,
}

impl FallingItem {
    pub fn size(&self) -> Vec2 {
        Vec2::splat(ITEM_SIZE)
    }
}

/// The player-controlled eater
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Box center
    pub pos: Vec2,
    pub weight: u32,
}

impl Actor {
    /// Fresh actor centered in the play area
    pub fn centered(area: &PlayArea) -> Self {
        Self {
            pos: Vec2::new(area.width / 2.0, area.height / 2.0),
            weight: INITIAL_WEIGHT,
        }
    }

    /// Box side for the current weight against a level target
    pub fn size(&self, target_weight: u32) -> f32 {
        actor_size(self.weight, target_weight)
    }

    /// Step in a direction, clamped to the play area on that axis only
    pub fn step(&mut self, direction: Direction, distance: f32, area: &PlayArea) {
        let moved = self.pos + direction.delta() * distance;
        match direction {
            Direction::Left | Direction::Right => {
                self.pos.x = crate::clamp_axis(moved.x, area.min_actor_x(), area.max_actor_x());
            }
            Direction::Up | Direction::Down => {
                self.pos.y = crate::clamp_axis(moved.y, area.min_actor_y(), area.max_actor_y());
            }
        }
    }
}

/// Map weight to actor box side, linear between initial and target weight
pub fn actor_size(weight: u32, target_weight: u32) -> f32 {
    let span = target_weight.saturating_sub(INITIAL_WEIGHT);
    if span == 0 {
        return ACTOR_MAX_SIZE;
    }
    let progress = (weight as f32 - INITIAL_WEIGHT as f32) / span as f32;
    (ACTOR_BASE_SIZE + progress * (ACTOR_MAX_SIZE - ACTOR_BASE_SIZE))
        .clamp(ACTOR_BASE_SIZE, ACTOR_MAX_SIZE)
}

/// Things that happened during a tick or command, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started { level_id: u32 },
    Paused,
    Resumed,
    WaveSpawned { count: usize },
    /// Oldest items dropped to respect the live cap
    ItemsEvicted { count: usize },
    /// Items that fell off the bottom
    ItemsExpired { count: usize },
    ItemCaptured {
        item_id: u32,
        kind: ItemKind,
        weight_gain: u32,
        weight: u32,
    },
    Combo(ComboBonus),
    /// Target reached, waiting out the grace delay
    CompletionPending { ticks: u32 },
    LevelCompleted { level_id: u32, weight: u32 },
    LevelFailed { level_id: u32, weight: u32 },
    /// Host should persist `level_id` as unlocked
    LevelUnlockNeeded { level_id: u32 },
}

/// Read-only view for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSnapshot {
    pub level_id: u32,
    pub state: RunState,
    pub weight: u32,
    pub target_weight: u32,
    pub time_remaining: u32,
    pub combo_streak: u32,
    pub live_items: Vec<FallingItem>,
    pub actor_position: Vec2,
    pub actor_size: f32,
    pub completion_pending: bool,
}
