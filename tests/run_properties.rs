//! Property tests over random host input streams

use feast_fall::consts::MAX_LIVE_ITEMS;
use feast_fall::sim::{Catalog, Direction, LevelTable, RunState, TickKind};
use feast_fall::{Engine, EngineInput, Game, Settings, UnlockProgress};
use proptest::prelude::*;
use std::collections::HashSet;

fn input_strategy() -> impl Strategy<Value = EngineInput> {
    prop_oneof![
        6 => Just(EngineInput::Tick(TickKind::Motion)),
        2 => Just(EngineInput::Tick(TickKind::Time)),
        1 => Just(EngineInput::Move(Direction::Left)),
        1 => Just(EngineInput::Move(Direction::Right)),
        1 => Just(EngineInput::Move(Direction::Up)),
        1 => Just(EngineInput::Move(Direction::Down)),
        1 => Just(EngineInput::TogglePause),
    ]
}

fn engine(seed: u64, level_id: u32, spawn_probability: f64) -> Engine {
    let settings = Settings {
        spawn_probability,
        ..Settings::default()
    };
    let game = Game::new(LevelTable::standard(), Catalog::standard(), settings).unwrap();
    Engine::new(game.start_level(level_id, UnlockProgress::through(5), seed).unwrap())
}

proptest! {
    #[test]
    fn weight_never_decreases(
        seed in any::<u64>(),
        level_id in 1u32..=5,
        inputs in prop::collection::vec(input_strategy(), 0..600),
    ) {
        let mut engine = engine(seed, level_id, 1.0 / 3.0);
        let mut last = engine.snapshot().weight;
        for input in inputs {
            engine.apply(input).unwrap();
            let weight = engine.snapshot().weight;
            prop_assert!(weight >= last, "weight dropped {} -> {}", last, weight);
            last = weight;
        }
    }

    #[test]
    fn live_items_stay_under_cap(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 0..600),
    ) {
        let mut engine = engine(seed, 1, 1.0);
        for input in inputs {
            engine.apply(input).unwrap();
            prop_assert!(engine.snapshot().live_items.len() <= MAX_LIVE_ITEMS);
        }
    }

    #[test]
    fn item_ids_unique_within_run(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 0..400),
    ) {
        let mut engine = engine(seed, 1, 0.8);
        let mut live: HashSet<u32> = HashSet::new();
        let mut gone: HashSet<u32> = HashSet::new();
        let mut max_id = 0;
        for input in inputs {
            engine.apply(input).unwrap();
            let ids: Vec<u32> = engine.snapshot().live_items.iter().map(|i| i.id).collect();
            let current: HashSet<u32> = ids.iter().copied().collect();
            prop_assert_eq!(current.len(), ids.len(), "duplicate live id in {:?}", ids);

            let mut fresh: Vec<u32> = current.difference(&live).copied().collect();
            fresh.sort_unstable();
            for id in fresh {
                prop_assert!(!gone.contains(&id), "id {} came back after leaving", id);
                prop_assert!(id > max_id, "new id {} not above {}", id, max_id);
                max_id = id;
            }
            gone.extend(live.difference(&current).copied());
            live = current;
        }
    }

    #[test]
    fn second_pause_changes_nothing(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 0..200),
    ) {
        let mut engine = engine(seed, 2, 1.0 / 3.0);
        for input in inputs {
            engine.apply(input).unwrap();
        }
        engine.apply(EngineInput::Pause).unwrap();
        let once = engine.snapshot();
        engine.apply(EngineInput::Pause).unwrap();
        prop_assert_eq!(engine.snapshot(), once);
    }

    #[test]
    fn paused_runs_ignore_ticks(
        seed in any::<u64>(),
        ticks in prop::collection::vec(input_strategy(), 0..200),
    ) {
        let mut engine = engine(seed, 1, 1.0);
        engine.apply(EngineInput::Tick(TickKind::Time)).unwrap();
        engine.apply(EngineInput::Pause).unwrap();
        let frozen = engine.snapshot();
        prop_assume!(frozen.state == RunState::Paused);
        for input in ticks {
            if matches!(input, EngineInput::TogglePause) {
                continue;
            }
            engine.apply(input).unwrap();
        }
        prop_assert_eq!(engine.snapshot(), frozen);
    }
}

#[test]
fn queued_host_loop_reaches_terminal_state() {
    let mut engine = engine(99, 1, 1.0 / 3.0);
    let sender = engine.sender();
    for _ in 0..60 {
        for _ in 0..10 {
            sender.send(EngineInput::Tick(TickKind::Motion));
        }
        sender.send(EngineInput::Tick(TickKind::Time));
    }
    engine.pump().unwrap();
    // Sixty time ticks always end a 60s level (plus a few motion ticks of grace)
    for _ in 0..10 {
        sender.send(EngineInput::Tick(TickKind::Motion));
    }
    engine.pump().unwrap();
    assert!(engine.run().state().is_terminal());
}
