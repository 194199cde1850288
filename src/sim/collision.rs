//! Capture detection and response
//!
//! The actor's box is tested against live items in their current order. The
//! first overlap is eaten and the scan stops, so at most one capture happens per
//! call.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::combo::{ComboBonus, ComboTracker};
use super::state::{Actor, FallingItem};
use crate::boxes_overlap;

/// Result of a successful capture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capture {
    /// The consumed item (already removed from the live set)
    pub item: FallingItem,
    /// Base weight plus any combo bonus
    pub weight_gain: u32,
    pub combo: Option<ComboBonus>,
}

/// Index of the first item overlapping an actor box of side `actor_size`
pub fn first_overlap(actor_pos: Vec2, actor_size: f32, items: &[FallingItem]) -> Option<usize> {
    let actor_box = Vec2::splat(actor_size);
    items
        .iter()
        .position(|item| boxes_overlap(actor_pos, actor_box, item.pos, item.size()))
}

/// Test the actor against all items and apply at most one capture.
///
/// On capture the item is removed, the combo tracker is updated and the weight
/// gain (base value plus `streak * 10` on a repeat kind) is added to the actor.
pub fn resolve(
    actor: &mut Actor,
    actor_size: f32,
    items: &mut Vec<FallingItem>,
    combo: &mut ComboTracker,
) -> Option<Capture> {
    let index = first_overlap(actor.pos, actor_size, items)?;
    let item = items.remove(index);

    let bonus = combo.record(item.kind);
    let weight_gain = item.kind.weight_value() + bonus.map_or(0, |b| b.bonus);
    actor.weight = actor.weight.saturating_add(weight_gain);

    Some(Capture {
        item,
        weight_gain,
        combo: bonus,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::PlayArea;
    use crate::sim::catalog::ItemKind;

    fn item_at(id: u32, kind: ItemKind, pos: Vec2) -> FallingItem {
        FallingItem {
            id,
            kind,
            lane: 0,
            pos,
        }
    }

    #[test]
    fn test_capture_overlapping_item() {
        let mut actor = Actor::centered(&PlayArea::default());
        let mut items = vec![item_at(1, ItemKind::Meat, actor.pos + Vec2::new(30.0, -40.0))];
        let mut combo = ComboTracker::new();

        let capture = resolve(&mut actor, ACTOR_BASE_SIZE, &mut items, &mut combo).unwrap();
        assert_eq!(capture.item.id, 1);
        assert_eq!(capture.weight_gain, 100);
        assert_eq!(capture.combo, None);
        assert_eq!(actor.weight, INITIAL_WEIGHT + 100);
        assert!(items.is_empty());
    }

    #[test]
    fn test_miss_leaves_everything_alone() {
        let mut actor = Actor::centered(&PlayArea::default());
        // Base actor half-size 40 + item half-size 25 = 65 reach
        let mut items = vec![item_at(1, ItemKind::Beef, actor.pos + Vec2::new(65.0, 0.0))];
        let mut combo = ComboTracker::new();

        assert!(resolve(&mut actor, ACTOR_BASE_SIZE, &mut items, &mut combo).is_none());
        assert_eq!(actor.weight, INITIAL_WEIGHT);
        assert_eq!(items.len(), 1);
        assert_eq!(combo.last_kind(), None);
    }

    #[test]
    fn test_bigger_actor_reaches_further() {
        let mut actor = Actor::centered(&PlayArea::default());
        let mut items = vec![item_at(1, ItemKind::Bone, actor.pos + Vec2::new(100.0, 0.0))];
        let mut combo = ComboTracker::new();

        assert!(resolve(&mut actor, ACTOR_BASE_SIZE, &mut items, &mut combo).is_none());
        assert!(resolve(&mut actor, ACTOR_MAX_SIZE, &mut items, &mut combo).is_some());
    }

    #[test]
    fn test_only_first_overlap_consumed() {
        let mut actor = Actor::centered(&PlayArea::default());
        let mut items = vec![
            item_at(1, ItemKind::Bone, Vec2::new(10.0, 10.0)),
            item_at(2, ItemKind::Chicken, actor.pos),
            item_at(3, ItemKind::Beef, actor.pos),
        ];
        let mut combo = ComboTracker::new();

        let capture = resolve(&mut actor, ACTOR_BASE_SIZE, &mut items, &mut combo).unwrap();
        assert_eq!(capture.item.id, 2);
        let ids: Vec<u32> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_beef_combo_gain() {
        let mut actor = Actor::centered(&PlayArea::default());
        let mut items = vec![item_at(7, ItemKind::Beef, actor.pos)];
        let mut combo = ComboTracker::with_streak(ItemKind::Beef, 2);

        let capture = resolve(&mut actor, ACTOR_BASE_SIZE, &mut items, &mut combo).unwrap();
        assert_eq!(capture.weight_gain, 230);
        assert_eq!(capture.combo, Some(ComboBonus { bonus: 30, streak: 3 }));
        assert_eq!(combo.streak(), 3);
        assert_eq!(actor.weight, INITIAL_WEIGHT + 230);
    }
}
