//! Level definitions
//!
//! Ids run 1..N with no gaps so "next level" is always `id + 1`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One level: how long the player has and how heavy they must get
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub id: u32,
    pub duration_seconds: u32,
    pub target_weight: u32,
}

impl LevelDefinition {
    pub const fn new(id: u32, duration_seconds: u32, target_weight: u32) -> Self {
        Self {
            id,
            duration_seconds,
            target_weight,
        }
    }
}

/// Built-in level progression
const STANDARD_LEVELS: [LevelDefinition; 5] = [
    LevelDefinition::new(1, 60, 1500),
    LevelDefinition::new(2, 60, 2000),
    LevelDefinition::new(3, 55, 2500),
    LevelDefinition::new(4, 50, 3000),
    LevelDefinition::new(5, 45, 4000),
];

/// Ordered, immutable level table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelTable {
    levels: Vec<LevelDefinition>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl LevelTable {
    pub fn standard() -> Self {
        Self {
            levels: STANDARD_LEVELS.to_vec(),
        }
    }

    /// Build a table without validating it (see `validate`)
    pub fn new(levels: Vec<LevelDefinition>) -> Self {
        Self { levels }
    }

    /// Parse `[{ "id": 1, "duration_seconds": 60, "target_weight": 1500 }, ...]`
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let levels: Vec<LevelDefinition> = serde_json::from_str(json)?;
        Ok(Self::new(levels))
    }

    /// Check every definition against the actor's starting weight
    pub fn validate(&self, initial_weight: u32) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::EmptyLevelTable);
        }
        for (expected, level) in (1u32..).zip(&self.levels) {
            if level.id != expected {
                return Err(ConfigError::LevelIdOutOfSequence {
                    expected,
                    found: level.id,
                });
            }
            if level.duration_seconds == 0 {
                return Err(ConfigError::ZeroDuration { level: level.id });
            }
            if level.target_weight <= initial_weight {
                return Err(ConfigError::TargetNotAboveInitial {
                    level: level.id,
                    target: level.target_weight,
                    initial: initial_weight,
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, level_id: u32) -> Option<&LevelDefinition> {
        let index = level_id.checked_sub(1)? as usize;
        self.levels.get(index)
    }

    /// The level after `level_id`, if any
    pub fn next(&self, level_id: u32) -> Option<&LevelDefinition> {
        self.get(level_id.checked_add(1)?)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.levels.iter()
    }
}
