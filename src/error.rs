//! Error taxonomy
//!
//! Configuration problems are fatal at load time and never surface mid-run.
//! Commands sent in the wrong run state are ignored rather than reported.

use thiserror::Error;

/// Load-time configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("level table is empty")]
    EmptyLevelTable,
    #[error("level ids must run 1..N in order: expected {expected}, found {found}")]
    LevelIdOutOfSequence { expected: u32, found: u32 },
    #[error("level {level} has zero duration")]
    ZeroDuration { level: u32 },
    #[error("level {level} target weight {target} must exceed initial weight {initial}")]
    TargetNotAboveInitial { level: u32, target: u32, initial: u32 },
    #[error("item catalog is empty")]
    EmptyCatalog,
    #[error("unknown item kind: {0}")]
    UnknownItemKind(String),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors surfaced to the caller of engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid level: {0}")]
    InvalidLevel(u32),
    #[error("level {0} is locked")]
    LevelLocked(u32),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
