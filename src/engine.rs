//! Host-facing engine
//!
//! Two periodic timers and the control surface all feed one ordered channel.
//! `Engine::pump` is the only consumer, so every mutation of run state happens
//! on a single thread, one input at a time.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, EngineError};
use crate::progress::UnlockProgress;
use crate::settings::Settings;
use crate::sim::{
    Catalog, Direction, GameEvent, LevelTable, RestartTarget, Run, RunConfig, RunSnapshot,
    TickKind,
};

/// Everything a host can push into the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineInput {
    Tick(TickKind),
    Move(Direction),
    Pause,
    Resume,
    TogglePause,
    Restart(RestartTarget),
}

/// Cloneable producer handle (timers, UI thread)
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<EngineInput>,
}

impl InputSender {
    /// Queue an input. Returns false if the engine is gone.
    pub fn send(&self, input: EngineInput) -> bool {
        self.tx.send(input).is_ok()
    }
}

/// Single ordered input queue
#[derive(Debug)]
pub struct EventQueue {
    tx: Sender<EngineInput>,
    rx: Receiver<EngineInput>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> InputSender {
        InputSender {
            tx: self.tx.clone(),
        }
    }

    /// Next queued input, if any (never blocks)
    pub fn try_next(&self) -> Option<EngineInput> {
        self.rx.try_recv().ok()
    }
}

/// Validated configuration and run factory
#[derive(Debug, Clone)]
pub struct Game {
    config: Arc<RunConfig>,
}

impl Game {
    /// Validate configuration. This is the only place configuration errors arise.
    pub fn new(
        levels: LevelTable,
        catalog: Catalog,
        settings: Settings,
    ) -> Result<Self, ConfigError> {
        let config = RunConfig::new(levels, catalog, settings)?;
        log::info!(
            "Game configured: {} levels, {} item kinds, {} lanes",
            config.levels.len(),
            config.catalog.len(),
            config.settings.lane_count
        );
        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// Built-in levels, full catalog, default settings
    pub fn standard() -> Result<Self, ConfigError> {
        Self::new(LevelTable::standard(), Catalog::standard(), Settings::default())
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Create and start a run. `progress` is the host's current unlock state.
    pub fn start_level(
        &self,
        level_id: u32,
        progress: UnlockProgress,
        seed: u64,
    ) -> Result<Run, EngineError> {
        let mut run = Run::new(Arc::clone(&self.config), level_id, progress, seed)?;
        run.start();
        Ok(run)
    }
}

/// One run plus the queue that feeds it
#[derive(Debug)]
pub struct Engine {
    run: Run,
    queue: EventQueue,
}

impl Engine {
    pub fn new(run: Run) -> Self {
        Self {
            run,
            queue: EventQueue::new(),
        }
    }

    pub fn sender(&self) -> InputSender {
        self.queue.sender()
    }

    /// Apply every queued input in arrival order. Returns how many were applied.
    ///
    /// Stops at the first restart error; later inputs stay queued.
    pub fn pump(&mut self) -> Result<usize, EngineError> {
        let mut applied = 0;
        while let Some(input) = self.queue.try_next() {
            self.apply(input)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Apply one input directly
    pub fn apply(&mut self, input: EngineInput) -> Result<(), EngineError> {
        match input {
            EngineInput::Tick(kind) => self.run.tick(kind),
            EngineInput::Move(direction) => {
                self.run.move_actor(direction);
            }
            EngineInput::Pause => {
                self.run.pause();
            }
            EngineInput::Resume => {
                self.run.resume();
            }
            EngineInput::TogglePause => {
                self.run.toggle_pause();
            }
            EngineInput::Restart(target) => {
                self.run.restart(target)?;
            }
        }
        Ok(())
    }

    pub fn run(&self) -> &Run {
        &self.run
    }

    pub fn snapshot(&self) -> RunSnapshot {
        self.run.snapshot()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.run.drain_events()
    }
}
