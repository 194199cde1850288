//! Engine tuning settings
//!
//! Loaded once by the host (JSON) and validated before any run starts.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// How the motion pass drops items that fell off the play area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExpiryPolicy {
    /// Drop every expired item in one pass
    #[default]
    RemoveAll,
    /// Drop only the first expired item per tick (replay parity with older builds)
    FirstOnly,
}

impl ExpiryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryPolicy::RemoveAll => "RemoveAll",
            ExpiryPolicy::FirstOnly => "FirstOnly",
        }
    }
}

/// Play area geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
    /// Minimum distance between the actor center and any edge
    pub actor_margin: f32,
    /// Distance below the bottom edge at which items expire
    pub off_area_margin: f32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            width: PLAY_AREA_WIDTH,
            height: PLAY_AREA_HEIGHT,
            actor_margin: ACTOR_MARGIN,
            off_area_margin: OFF_AREA_MARGIN,
        }
    }
}

impl PlayArea {
    /// Horizontal center of a lane
    pub fn lane_center_x(&self, lane: u8, lane_count: u8) -> f32 {
        let lane_width = self.width / lane_count.max(1) as f32;
        (lane as f32 + 0.5) * lane_width
    }

    /// Y coordinate past which an item is considered gone
    pub fn expiry_y(&self) -> f32 {
        self.height + self.off_area_margin
    }

    pub fn min_actor_x(&self) -> f32 {
        self.actor_margin
    }

    pub fn max_actor_x(&self) -> f32 {
        self.width - self.actor_margin
    }

    pub fn min_actor_y(&self) -> f32 {
        self.actor_margin
    }

    pub fn max_actor_y(&self) -> f32 {
        self.height - self.actor_margin
    }
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Lanes & spawning ===
    pub lane_count: u8,
    /// Chance of a wave per time tick (0.0 - 1.0)
    pub spawn_probability: f64,
    /// Live item cap (oldest evicted first)
    pub max_live_items: usize,

    // === Motion ===
    /// Item fall distance per motion tick
    pub item_speed: f32,
    pub expiry_policy: ExpiryPolicy,

    // === Actor ===
    /// Distance moved per directional command
    pub move_step: f32,

    // === Run flow ===
    /// Motion ticks to wait after reaching the target (0 = complete immediately)
    pub completion_delay_ticks: u32,

    pub play_area: PlayArea,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lane_count: LANE_COUNT,
            spawn_probability: SPAWN_PROBABILITY,
            max_live_items: MAX_LIVE_ITEMS,

            item_speed: ITEM_SPEED,
            expiry_policy: ExpiryPolicy::RemoveAll,

            move_step: MOVE_STEP,

            completion_delay_ticks: COMPLETION_DELAY_TICKS,

            play_area: PlayArea::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings: {} lanes, cap {}, expiry {}",
            settings.lane_count,
            settings.max_live_items,
            settings.expiry_policy.as_str()
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lane_count == 0 {
            return Err(ConfigError::InvalidSettings("lane_count must be at least 1".into()));
        }
        if self.max_live_items == 0 {
            return Err(ConfigError::InvalidSettings(
                "max_live_items must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(ConfigError::InvalidSettings(format!(
                "spawn_probability {} outside [0, 1]",
                self.spawn_probability
            )));
        }
        if self.item_speed.is_nan() || self.item_speed <= 0.0 {
            return Err(ConfigError::InvalidSettings(format!(
                "item_speed {} must be positive",
                self.item_speed
            )));
        }
        if self.move_step.is_nan() || self.move_step <= 0.0 {
            return Err(ConfigError::InvalidSettings(format!(
                "move_step {} must be positive",
                self.move_step
            )));
        }
        let area = &self.play_area;
        if area.actor_margin < 0.0
            || area.min_actor_x() > area.max_actor_x()
            || area.min_actor_y() > area.max_actor_y()
        {
            return Err(ConfigError::InvalidSettings(format!(
                "play area {}x{} too small for actor margin {}",
                area.width, area.height, area.actor_margin
            )));
        }
        Ok(())
    }
}
