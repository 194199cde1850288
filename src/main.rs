//! Feast Fall headless host
//!
//! Drives a run through the engine queue the way a real front end would: one
//! time tick per ten motion ticks, with a simple autopilot issuing moves.
//!
//! Usage: `feast-fall [level] [seed] [settings.json]`

use feast_fall::consts::MOTION_TICK_HZ;
use feast_fall::sim::{Catalog, Direction, GameEvent, LevelTable, RunSnapshot, TickKind};
use feast_fall::{Engine, EngineInput, Game, InputSender, Settings, UnlockProgress};

fn main() {
    env_logger::init();
    log::info!("Feast Fall (headless) starting...");

    if let Err(err) = run() {
        log::error!("{}", err);
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let level_id: u32 = match args.next() {
        Some(arg) => arg.parse()?,
        None => 1,
    };
    let seed: u64 = match args.next() {
        Some(arg) => arg.parse()?,
        None => 0x5EED,
    };
    let settings = match args.next() {
        Some(path) => Settings::from_json(&std::fs::read_to_string(path)?)?,
        None => Settings::default(),
    };

    let game = Game::new(LevelTable::standard(), Catalog::standard(), settings)?;
    // Demo host has no store: every level is playable
    let mut progress = UnlockProgress::through(game.config().levels.len() as u32);

    let mut engine = Engine::new(game.start_level(level_id, progress, seed)?);
    let sender = engine.sender();

    while !engine.run().state().is_terminal() {
        for _ in 0..MOTION_TICK_HZ {
            sender.send(EngineInput::Tick(TickKind::Motion));
            steer(&sender, &engine.snapshot());
            engine.pump()?;
        }
        sender.send(EngineInput::Tick(TickKind::Time));
        engine.pump()?;

        for event in engine.drain_events() {
            report(&event, &mut progress);
        }
    }

    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}

/// Head for the closest live item, one axis at a time
fn steer(sender: &InputSender, snapshot: &RunSnapshot) {
    let actor = snapshot.actor_position;
    let Some(target) = snapshot
        .live_items
        .iter()
        .filter(|item| item.pos.y <= actor.y + snapshot.actor_size)
        .min_by(|a, b| {
            a.pos
                .distance_squared(actor)
                .partial_cmp(&b.pos.distance_squared(actor))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    else {
        return;
    };

    let delta = target.pos - actor;
    let direction = if delta.x.abs() > snapshot.actor_size / 4.0 {
        if delta.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if delta.y < 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };
    sender.send(EngineInput::Move(direction));
}

fn report(event: &GameEvent, progress: &mut UnlockProgress) {
    match event {
        GameEvent::Combo(bonus) => log::info!("Combo x{} (+{})", bonus.streak, bonus.bonus),
        GameEvent::LevelCompleted { level_id, weight } => {
            log::info!("Level {} complete at weight {}", level_id, weight);
        }
        GameEvent::LevelFailed { level_id, weight } => {
            log::info!("Level {} failed at weight {}", level_id, weight);
        }
        GameEvent::LevelUnlockNeeded { level_id } => {
            progress.record_unlock(*level_id);
        }
        other => log::debug!("{:?}", other),
    }
}
