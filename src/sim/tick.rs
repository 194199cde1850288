//! Run state machine
//!
//! Owns one run's actor, live items and combo state, and advances them on the
//! two host signals. Time ticks drive the countdown and spawning; motion ticks
//! drive falling and captures. Nothing moves, spawns or gains weight unless the
//! run is `Running`.

use std::sync::Arc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catalog::Catalog;
use super::collision;
use super::combo::ComboTracker;
use super::level::{LevelDefinition, LevelTable};
use super::motion;
use super::spawn::{SpawnScheduler, enforce_live_cap};
use super::state::{Actor, Direction, FallingItem, GameEvent, RunSnapshot, RunState, TickKind};
use crate::consts::INITIAL_WEIGHT;
use crate::error::{ConfigError, EngineError};
use crate::progress::UnlockProgress;
use crate::settings::Settings;

/// Validated configuration shared by every run of a game
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub levels: LevelTable,
    pub catalog: Catalog,
    pub settings: Settings,
}

impl RunConfig {
    pub fn new(
        levels: LevelTable,
        catalog: Catalog,
        settings: Settings,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        levels.validate(INITIAL_WEIGHT)?;
        if catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(Self {
            levels,
            catalog,
            settings,
        })
    }
}

/// Which level a restart goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestartTarget {
    Current,
    /// Only valid after a completion
    Next,
}

/// A single run of one level
#[derive(Debug, Clone)]
pub struct Run {
    config: Arc<RunConfig>,
    level: LevelDefinition,
    progress: UnlockProgress,
    seed: u64,
    rng: Pcg32,
    scheduler: SpawnScheduler,
    state: RunState,
    actor: Actor,
    items: Vec<FallingItem>,
    combo: ComboTracker,
    time_remaining: u32,
    /// Motion ticks left before the Completed transition
    pending_completion: Option<u32>,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl Run {
    /// Create an idle run for `level_id`.
    ///
    /// Fails if the level is not in the table or not yet unlocked.
    pub fn new(
        config: Arc<RunConfig>,
        level_id: u32,
        progress: UnlockProgress,
        seed: u64,
    ) -> Result<Self, EngineError> {
        let level = *config
            .levels
            .get(level_id)
            .ok_or(EngineError::InvalidLevel(level_id))?;
        if !progress.is_unlocked(level_id) {
            return Err(EngineError::LevelLocked(level_id));
        }

        let settings = &config.settings;
        let scheduler = SpawnScheduler::new(settings.lane_count, settings.spawn_probability);
        let actor = Actor::centered(&settings.play_area);

        Ok(Self {
            level,
            progress,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            scheduler,
            state: RunState::Idle,
            actor,
            items: Vec::new(),
            combo: ComboTracker::new(),
            time_remaining: level.duration_seconds,
            pending_completion: None,
            events: Vec::new(),
            next_id: 1,
            config,
        })
    }

    /// Idle -> Running. Resets all per-run state.
    pub fn start(&mut self) -> bool {
        if self.state != RunState::Idle {
            log::trace!("Ignoring start in {:?}", self.state);
            return false;
        }

        self.time_remaining = self.level.duration_seconds;
        self.actor = Actor::centered(&self.config.settings.play_area);
        self.items.clear();
        self.combo.reset();
        self.pending_completion = None;
        self.next_id = 1;
        self.state = RunState::Running;

        log::info!(
            "Level {} started: {}s to reach {} (seed {})",
            self.level.id,
            self.level.duration_seconds,
            self.level.target_weight,
            self.seed
        );
        self.events.push(GameEvent::Started {
            level_id: self.level.id,
        });
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state != RunState::Running {
            log::trace!("Ignoring pause in {:?}", self.state);
            return false;
        }
        self.state = RunState::Paused;
        log::info!("Paused with {}s left", self.time_remaining);
        self.events.push(GameEvent::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != RunState::Paused {
            log::trace!("Ignoring resume in {:?}", self.state);
            return false;
        }
        self.state = RunState::Running;
        log::info!("Resumed");
        self.events.push(GameEvent::Resumed);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            _ => false,
        }
    }

    /// Move the actor one step, then check for a capture at the new position.
    ///
    /// Ignored unless the run is actively playing.
    pub fn move_actor(&mut self, direction: Direction) -> bool {
        if !self.is_playing() {
            log::trace!("Ignoring move {:?} in {:?}", direction, self.state);
            return false;
        }
        let settings = &self.config.settings;
        self.actor.step(direction, settings.move_step, &settings.play_area);
        self.check_capture();
        true
    }

    /// Apply one host timer signal. Discarded unless Running.
    pub fn tick(&mut self, kind: TickKind) {
        if self.state != RunState::Running {
            return;
        }
        match kind {
            TickKind::Time => self.time_tick(),
            TickKind::Motion => self.motion_tick(),
        }
    }

    /// Completed/Failed -> Running on the current or following level.
    ///
    /// Returns `Ok(false)` when the run is not in a state that can restart.
    pub fn restart(&mut self, target: RestartTarget) -> Result<bool, EngineError> {
        if !self.state.is_terminal() {
            log::trace!("Ignoring restart in {:?}", self.state);
            return Ok(false);
        }

        let level = match target {
            RestartTarget::Current => self.level,
            RestartTarget::Next => {
                if self.state != RunState::Completed {
                    log::trace!("Ignoring next-level restart after failure");
                    return Ok(false);
                }
                let next_id = self.level.id.saturating_add(1);
                let next = *self
                    .config
                    .levels
                    .next(self.level.id)
                    .ok_or(EngineError::InvalidLevel(next_id))?;
                if !self.progress.is_unlocked(next.id) {
                    return Err(EngineError::LevelLocked(next.id));
                }
                next
            }
        };

        self.level = level;
        self.state = RunState::Idle;
        Ok(self.start())
    }

    fn time_tick(&mut self) {
        // Clock stops once the target is reached
        if self.pending_completion.is_some() {
            return;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining > 0 {
            self.spawn_wave();
        } else if self.actor.weight >= self.level.target_weight {
            self.complete();
        } else {
            self.fail();
        }
    }

    fn motion_tick(&mut self) {
        if let Some(ticks) = self.pending_completion {
            if ticks <= 1 {
                self.complete();
            } else {
                self.pending_completion = Some(ticks - 1);
            }
            return;
        }

        let settings = &self.config.settings;
        let expired = motion::on_motion_tick(
            &mut self.items,
            settings.item_speed,
            &settings.play_area,
            settings.expiry_policy,
        );
        if expired > 0 {
            self.events.push(GameEvent::ItemsExpired { count: expired });
        }

        self.check_capture();
    }

    fn spawn_wave(&mut self) {
        let config = &self.config;
        let next_id = &mut self.next_id;
        let wave = self.scheduler.on_time_tick(
            &mut self.rng,
            &config.catalog,
            &config.settings.play_area,
            || {
                let id = *next_id;
                *next_id += 1;
                id
            },
        );
        if wave.is_empty() {
            return;
        }

        let count = wave.len();
        self.items.extend(wave);
        self.events.push(GameEvent::WaveSpawned { count });

        let evicted = enforce_live_cap(&mut self.items, config.settings.max_live_items);
        if evicted > 0 {
            log::debug!("Evicted {} oldest items", evicted);
            self.events.push(GameEvent::ItemsEvicted { count: evicted });
        }
        log::debug!("Wave of {} spawned, {} live", count, self.items.len());
    }

    fn check_capture(&mut self) {
        let size = self.actor.size(self.level.target_weight);
        let Some(capture) =
            collision::resolve(&mut self.actor, size, &mut self.items, &mut self.combo)
        else {
            return;
        };

        log::debug!(
            "Captured {:?} #{} for +{} (weight {})",
            capture.item.kind,
            capture.item.id,
            capture.weight_gain,
            self.actor.weight
        );
        self.events.push(GameEvent::ItemCaptured {
            item_id: capture.item.id,
            kind: capture.item.kind,
            weight_gain: capture.weight_gain,
            weight: self.actor.weight,
        });
        if let Some(bonus) = capture.combo {
            log::debug!("Combo x{} (+{})", bonus.streak, bonus.bonus);
            self.events.push(GameEvent::Combo(bonus));
        }

        if self.actor.weight >= self.level.target_weight {
            self.begin_completion();
        }
    }

    fn begin_completion(&mut self) {
        let delay = self.config.settings.completion_delay_ticks;
        if delay == 0 {
            self.complete();
            return;
        }
        log::debug!("Target reached, completing in {} motion ticks", delay);
        self.pending_completion = Some(delay);
        self.events.push(GameEvent::CompletionPending { ticks: delay });
    }

    fn complete(&mut self) {
        self.pending_completion = None;
        self.state = RunState::Completed;
        log::info!(
            "Level {} completed at weight {} with {}s left",
            self.level.id,
            self.actor.weight,
            self.time_remaining
        );
        self.events.push(GameEvent::LevelCompleted {
            level_id: self.level.id,
            weight: self.actor.weight,
        });

        let next_id = self.config.levels.next(self.level.id).map(|next| next.id);
        if let Some(next_id) = next_id
            && self.progress.record_unlock(next_id)
        {
            self.events.push(GameEvent::LevelUnlockNeeded { level_id: next_id });
        }
    }

    fn fail(&mut self) {
        self.state = RunState::Failed;
        log::info!(
            "Level {} failed at weight {}/{}",
            self.level.id,
            self.actor.weight,
            self.level.target_weight
        );
        self.events.push(GameEvent::LevelFailed {
            level_id: self.level.id,
            weight: self.actor.weight,
        });
    }

    /// Running and not waiting out the completion delay
    fn is_playing(&self) -> bool {
        self.state == RunState::Running && self.pending_completion.is_none()
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            level_id: self.level.id,
            state: self.state,
            weight: self.actor.weight,
            target_weight: self.level.target_weight,
            time_remaining: self.time_remaining,
            combo_streak: self.combo.streak(),
            live_items: self.items.clone(),
            actor_position: self.actor.pos,
            actor_size: self.actor.size(self.level.target_weight),
            completion_pending: self.pending_completion.is_some(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn weight(&self) -> u32 {
        self.actor.weight
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn items(&self) -> &[FallingItem] {
        &self.items
    }

    pub fn combo(&self) -> &ComboTracker {
        &self.combo
    }

    pub fn progress(&self) -> UnlockProgress {
        self.progress
    }

    pub fn is_completion_pending(&self) -> bool {
        self.pending_completion.is_some()
    }
}
