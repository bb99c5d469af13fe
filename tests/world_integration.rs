//! Integration tests for the moment transition
//!
//! These tests drive whole worlds through `World::tick`:
//! - the single-actor curse scenario
//! - hierarchy growth on the first tick only
//! - spawn rates of 0 and 1
//! - history sinks wired through the chronicle

use adventuria::core::config::{AiWeights, WorldConfig};
use adventuria::core::types::{ActorId, Attribute};
use adventuria::entity::ActorTemplate;
use adventuria::world::events::{EventLevel, HistoryLog};
use adventuria::world::{World, WorldEvent};

fn config(seed: u64) -> WorldConfig {
    WorldConfig {
        seed: Some(seed),
        ..WorldConfig::default()
    }
}

fn idle_ai() -> AiWeights {
    AiWeights {
        nothing: 1,
        speak: 0,
        pray: 0,
    }
}

#[test]
fn test_single_actor_curse_scenario() {
    let mut world = World::new(&WorldConfig {
        monster_spawn_rate: 0.0,
        punishment_base_chance: 0.0,
        ai_weights: idle_ai(),
        ..config(1)
    })
    .unwrap();
    let a = world.add_actor(ActorTemplate::named("a").with_blessing(0));

    let events = world.tick().unwrap();

    assert_eq!(world.age_in_moments, 1);
    assert_eq!(world.population_count(), 1);
    assert_eq!(world.get_actor(a).unwrap().blessing, -1);
    assert!(events.contains(&WorldEvent::AttributeModified {
        actor: a,
        name: "a".into(),
        attribute: Attribute::Blessing,
        delta: -1,
        new_value: -1,
    }));
    assert!(!events
        .iter()
        .any(|e| matches!(e, WorldEvent::ActorDied { .. })));
}

#[test]
fn test_cursed_actor_is_punished_next() {
    // With certain punishment, the curse drives "a" to -1, which makes it
    // eligible in the same moment.
    let mut world = World::new(&WorldConfig {
        monster_spawn_rate: 0.0,
        punishment_base_chance: 1.0,
        ai_weights: idle_ai(),
        ..config(2)
    })
    .unwrap();
    world.add_actor(ActorTemplate::named("a"));

    let events = world.tick().unwrap();

    assert!(world.population.is_empty());
    assert_eq!(world.age_in_moments, 1);
    let order: Vec<&WorldEvent> = events
        .iter()
        .filter(|e| matches!(e, WorldEvent::ActorPunished { .. } | WorldEvent::ActorDied { .. }))
        .collect();
    assert!(matches!(order[0], WorldEvent::ActorPunished { blessing: -1, .. }));
    assert!(matches!(order[1], WorldEvent::ActorDied { actor: ActorId(1), .. }));
}

#[test]
fn test_age_counts_every_tick() {
    let mut world = World::new(&WorldConfig {
        initial_population: 8,
        ..config(3)
    })
    .unwrap();
    for expected in 1..=200 {
        world.tick().unwrap();
        assert_eq!(world.age_in_moments, expected);
    }
}

#[test]
fn test_fresh_world_hierarchy() {
    let mut world = World::seeded(4);
    assert_eq!(world.level_counts().total(), 0);

    world.tick().unwrap();
    let first = world.level_counts();
    assert_eq!(first.total(), 5);
    assert_eq!(world.multiverses[0].universes[0].galaxies[0].star_systems[0].planets.len(), 1);

    for _ in 0..10 {
        world.tick().unwrap();
    }
    assert_eq!(world.level_counts(), first);
}

#[test]
fn test_spawn_rate_one_grows_population() {
    let mut world = World::new(&WorldConfig {
        monster_spawn_rate: 1.0,
        punishment_base_chance: 0.0,
        ..config(5)
    })
    .unwrap();

    for expected in 1..=20 {
        let before = world.population_count();
        world.tick().unwrap();
        assert_eq!(world.population_count(), before + 1);
        assert_eq!(world.population_count(), expected);
    }
    assert_eq!(world.stats.spawned, 20);
}

#[test]
fn test_population_never_goes_negative_over_long_run() {
    let mut world = World::new(&WorldConfig {
        initial_population: 20,
        ..config(6)
    })
    .unwrap();

    for _ in 0..500 {
        let before = world.population_count();
        let events = world.tick().unwrap();
        let deaths = events
            .iter()
            .filter(|e| matches!(e, WorldEvent::ActorDied { .. }))
            .count();
        let spawns = events
            .iter()
            .filter(|e| matches!(e, WorldEvent::ActorSpawned { .. }))
            .count();
        assert!(deaths <= before);
        assert_eq!(world.population_count(), before - deaths + spawns);
    }
    assert_eq!(
        world.stats.spawned - world.stats.died,
        world.population_count() as u64
    );
}

#[test]
fn test_history_records_narrative_only() {
    let history = HistoryLog::new();
    let mut world = World::new(&WorldConfig {
        initial_population: 3,
        ..config(7)
    })
    .unwrap();
    world.add_sink(Box::new(history.clone()));

    world.tick().unwrap();

    let entries = history.entries();
    assert!(!entries.is_empty());
    assert!(entries.iter().all(|e| e.level == EventLevel::Info));
    let messages = history.messages();
    assert_eq!(messages[0], "*****  Progressing world by one moment...  *****");
    assert!(messages.contains(&"Instantiating a new multiverse.".to_string()));
    assert!(messages.contains(&"Instantiating a new planet.".to_string()));
    assert_eq!(messages.last().map(String::as_str), Some("World is <1>"));
}

#[test]
fn test_general_log_sees_audit_records() {
    let general = HistoryLog::with_min_level(EventLevel::Debug);
    let mut world = World::new(&WorldConfig {
        monster_spawn_rate: 0.0,
        punishment_base_chance: 0.0,
        ai_weights: idle_ai(),
        ..config(8)
    })
    .unwrap();
    world.add_sink(Box::new(general.clone()));
    world.add_actor(ActorTemplate::named("kit"));

    world.tick().unwrap();

    let messages = general.messages();
    assert!(messages.contains(&"[ kit ]  blessing: -1 (-1)".to_string()));
    assert!(messages.contains(&"Checking for monster spawn (<0>/1 chance)...".to_string()));
}
