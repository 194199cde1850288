//! Same-kind capture chaining

use serde::{Deserialize, Serialize};

use super::catalog::ItemKind;
use crate::consts::COMBO_BONUS_PER_STREAK;

/// Bonus awarded for extending a streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboBonus {
    pub bonus: u32,
    pub streak: u32,
}

/// Tracks consecutive captures of the same kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComboTracker {
    last_kind: Option<ItemKind>,
    streak: u32,
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker already mid-chain (useful for replays and tests)
    pub fn with_streak(last_kind: ItemKind, streak: u32) -> Self {
        Self {
            last_kind: Some(last_kind),
            streak,
        }
    }

    pub fn last_kind(&self) -> Option<ItemKind> {
        self.last_kind
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Record a capture. A repeat of the previous kind extends the streak and
    /// earns `streak * 10`; any other kind resets the streak to zero.
    pub fn record(&mut self, kind: ItemKind) -> Option<ComboBonus> {
        let bonus = if self.last_kind == Some(kind) {
            self.streak += 1;
            Some(ComboBonus {
                bonus: self.streak * COMBO_BONUS_PER_STREAK,
                streak: self.streak,
            })
        } else {
            self.streak = 0;
            None
        };
        self.last_kind = Some(kind);
        bonus
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_capture_starts_chain_without_bonus() {
        let mut combo = ComboTracker::new();
        assert_eq!(combo.record(ItemKind::Meat), None);
        assert_eq!(combo.streak(), 0);
        assert_eq!(combo.last_kind(), Some(ItemKind::Meat));
    }

    #[test]
    fn test_repeats_grow_bonus() {
        let mut combo = ComboTracker::new();
        combo.record(ItemKind::Bone);
        assert_eq!(
            combo.record(ItemKind::Bone),
            Some(ComboBonus { bonus: 10, streak: 1 })
        );
        assert_eq!(
            combo.record(ItemKind::Bone),
            Some(ComboBonus { bonus: 20, streak: 2 })
        );
    }

    #[test]
    fn test_different_kind_resets() {
        let mut combo = ComboTracker::with_streak(ItemKind::Beef, 4);
        assert_eq!(combo.record(ItemKind::Chicken), None);
        assert_eq!(combo.streak(), 0);
        assert_eq!(combo.last_kind(), Some(ItemKind::Chicken));

        combo.reset();
        assert_eq!(combo, ComboTracker::new());
    }

    #[test]
    fn test_beef_streak_two_to_three() {
        let mut combo = ComboTracker::with_streak(ItemKind::Beef, 2);
        let bonus = combo.record(ItemKind::Beef).unwrap();
        assert_eq!(bonus, ComboBonus { bonus: 30, streak: 3 });
    }
}
