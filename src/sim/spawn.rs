//! Wave spawning
//!
//! A wave is all-or-nothing: either every lane gets one item or none does.

use glam::Vec2;
use rand::Rng;

use super::catalog::Catalog;
use super::state::FallingItem;
use crate::settings::PlayArea;

/// Decides once per time tick whether to emit a wave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnScheduler {
    lane_count: u8,
    probability: f64,
}

impl SpawnScheduler {
    /// A non-finite probability never spawns
    pub fn new(lane_count: u8, probability: f64) -> Self {
        let probability = if probability.is_finite() {
            probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            lane_count,
            probability,
        }
    }

    pub fn lane_count(&self) -> u8 {
        self.lane_count
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Roll for a wave. Returns an empty vec when no wave spawns.
    ///
    /// `next_id` hands out run-unique item ids.
    pub fn on_time_tick<R, F>(
        &self,
        rng: &mut R,
        catalog: &Catalog,
        area: &PlayArea,
        mut next_id: F,
    ) -> Vec<FallingItem>
    where
        R: Rng + ?Sized,
        F: FnMut() -> u32,
    {
        if !rng.random_bool(self.probability) {
            return Vec::new();
        }

        (0..self.lane_count)
            .map(|lane| FallingItem {
                id: next_id(),
                kind: catalog.pick(rng),
                lane,
                pos: Vec2::new(area.lane_center_x(lane, self.lane_count), 0.0),
            })
            .collect()
    }
}

/// Drop the oldest items beyond `cap`. Returns how many were evicted.
pub fn enforce_live_cap(items: &mut Vec<FallingItem>, cap: usize) -> usize {
    let excess = items.len().saturating_sub(cap);
    if excess > 0 {
        items.drain(..excess);
    }
    excess
}
