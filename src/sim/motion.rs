//! Item motion
//!
//! Constant-velocity fall, no acceleration.

use super::state::FallingItem;
use crate::settings::{ExpiryPolicy, PlayArea};

/// Advance every live item by `speed` and drop the ones past the bottom.
///
/// Returns the number of items removed.
pub fn on_motion_tick(
    items: &mut Vec<FallingItem>,
    speed: f32,
    area: &PlayArea,
    policy: ExpiryPolicy,
) -> usize {
    for item in items.iter_mut() {
        item.pos.y += speed;
    }

    let limit = area.expiry_y();
    match policy {
        ExpiryPolicy::RemoveAll => {
            let before = items.len();
            items.retain(|item| item.pos.y <= limit);
            before - items.len()
        }
        ExpiryPolicy::FirstOnly => match items.iter().position(|item| item.pos.y > limit) {
            Some(index) => {
                items.remove(index);
                1
            }
            None => 0,
        },
    }
}
