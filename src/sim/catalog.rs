//! Item kinds and the catalog spawns draw from

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Food item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Bone,
    Chicken,
    Meat,
    Beef,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Bone,
        ItemKind::Chicken,
        ItemKind::Meat,
        ItemKind::Beef,
    ];

    /// Weight gained when captured
    pub const fn weight_value(&self) -> u32 {
        match self {
            ItemKind::Bone => 20,
            ItemKind::Chicken => 60,
            ItemKind::Meat => 100,
            ItemKind::Beef => 200,
        }
    }

    /// Sprite key for the renderer (no gameplay meaning)
    pub const fn visual_tag(&self) -> &'static str {
        match self {
            ItemKind::Bone => "bone",
            ItemKind::Chicken => "chicken",
            ItemKind::Meat => "meat",
            ItemKind::Beef => "beef",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bone" => Some(ItemKind::Bone),
            "chicken" => Some(ItemKind::Chicken),
            "meat" => Some(ItemKind::Meat),
            "beef" => Some(ItemKind::Beef),
            _ => None,
        }
    }
}

/// Non-empty set of kinds, drawn from uniformly
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    kinds: Vec<ItemKind>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// Every item kind
    pub fn standard() -> Self {
        Self {
            kinds: ItemKind::ALL.to_vec(),
        }
    }

    pub fn new(kinds: Vec<ItemKind>) -> Result<Self, ConfigError> {
        if kinds.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(Self { kinds })
    }

    /// Parse a JSON list of kind names, e.g. `["bone", "beef"]`
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let names: Vec<String> = serde_json::from_str(json)?;
        let kinds = names
            .iter()
            .map(|name| {
                ItemKind::from_str(name).ok_or_else(|| ConfigError::UnknownItemKind(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(kinds)
    }

    pub fn kinds(&self) -> &[ItemKind] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Draw a kind uniformly at random
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> ItemKind {
        self.kinds[rng.random_range(0..self.kinds.len())]
    }
}
