//! Feast Fall - A lane-based falling-food catcher
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, captures, run state)
//! - `engine`: Ordered input queue and the validated `Game` factory
//! - `progress`: Level unlock progress (owned and persisted by the host)
//! - `settings`: Data-driven engine tuning
//! - `error`: Configuration and engine errors

pub mod engine;
pub mod error;
pub mod progress;
pub mod settings;
pub mod sim;

pub use engine::{Engine, EngineInput, EventQueue, Game, InputSender};
pub use error::{ConfigError, EngineError};
pub use progress::UnlockProgress;
pub use settings::{ExpiryPolicy, PlayArea, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play area dimensions (origin top-left, y grows downward)
    pub const PLAY_AREA_WIDTH: f32 = 480.0;
    pub const PLAY_AREA_HEIGHT: f32 = 800.0;
    /// Actor center never gets closer than this to any play-area edge
    pub const ACTOR_MARGIN: f32 = 40.0;

    /// Number of parallel lanes items fall along
    pub const LANE_COUNT: u8 = 3;

    /// Falling items are fixed-size square boxes
    pub const ITEM_SIZE: f32 = 50.0;
    /// Vertical distance an item travels per motion tick
    pub const ITEM_SPEED: f32 = 20.0;
    /// How far past the bottom edge an item may fall before it is dropped
    pub const OFF_AREA_MARGIN: f32 = 50.0;

    /// Chance of a wave on each time tick
    pub const SPAWN_PROBABILITY: f64 = 1.0 / 3.0;
    /// Live item cap; the oldest items are evicted beyond this
    pub const MAX_LIVE_ITEMS: usize = 25;

    /// Actor defaults
    pub const INITIAL_WEIGHT: u32 = 300;
    pub const ACTOR_BASE_SIZE: f32 = 80.0;
    pub const ACTOR_MAX_SIZE: f32 = 200.0;
    /// Distance moved per directional command
    pub const MOVE_STEP: f32 = 40.0;

    /// Bonus weight per combo streak step
    pub const COMBO_BONUS_PER_STREAK: u32 = 10;

    /// Motion ticks between reaching the target and the Completed transition
    pub const COMPLETION_DELAY_TICKS: u32 = 5;

    /// Nominal host timer rates
    pub const TIME_TICK_HZ: u32 = 1;
    pub const MOTION_TICK_HZ: u32 = 10;
}

/// Check overlap of two axis-aligned boxes given by center and full extents.
///
/// Boxes that only touch along an edge do not overlap.
#[inline]
pub fn boxes_overlap(a_center: Vec2, a_size: Vec2, b_center: Vec2, b_size: Vec2) -> bool {
    let delta = (a_center - b_center).abs();
    let reach = (a_size + b_size) * 0.5;
    delta.x < reach.x && delta.y < reach.y
}

/// Clamp a scalar into `[min, max]`, collapsing to the midpoint if the range is inverted
#[inline]
pub fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        return (min + max) * 0.5;
    }
    value.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxes_overlap() {
        let size = Vec2::splat(50.0);
        assert!(boxes_overlap(Vec2::ZERO, size, Vec2::new(49.0, 0.0), size));
        // Touching edges do not count
        assert!(!boxes_overlap(Vec2::ZERO, size, Vec2::new(50.0, 0.0), size));
        assert!(!boxes_overlap(Vec2::ZERO, size, Vec2::new(10.0, 60.0), size));
    }

    #[test]
    fn test_boxes_overlap_mixed_sizes() {
        let actor = Vec2::splat(100.0);
        let item = Vec2::splat(50.0);
        assert!(boxes_overlap(Vec2::ZERO, actor, Vec2::new(74.0, 74.0), item));
        assert!(!boxes_overlap(Vec2::ZERO, actor, Vec2::new(75.0, 0.0), item));
    }

    #[test]
    fn test_clamp_axis() {
        assert_eq!(clamp_axis(500.0, 40.0, 440.0), 440.0);
        assert_eq!(clamp_axis(-3.0, 40.0, 440.0), 40.0);
        assert_eq!(clamp_axis(100.0, 40.0, 440.0), 100.0);
        assert_eq!(clamp_axis(5.0, 60.0, 40.0), 50.0);
    }
}
