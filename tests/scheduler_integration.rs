//! Integration tests for the scheduler
//!
//! Real (unpaused) time with short intervals; assertions only rely on
//! ordering, never on exact tick counts within a time window.

use std::time::Duration;

use adventuria::core::config::WorldConfig;
use adventuria::simulation::scheduler::{share, Scheduler};
use adventuria::world::events::HistoryLog;
use adventuria::world::World;

fn busy_world(seed: u64) -> World {
    World::new(&WorldConfig {
        seed: Some(seed),
        initial_population: 10,
        ..WorldConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_ticks_match_age() {
    let world = share(busy_world(1));
    let report = Scheduler::new(Duration::from_millis(2))
        .with_max_ticks(25)
        .start(world.clone())
        .join()
        .await
        .unwrap();

    assert_eq!(report.ticks_run, 25);
    assert_eq!(world.lock().await.age_in_moments, 25);
}

#[tokio::test]
async fn test_stop_prevents_further_ticks() {
    let world = share(busy_world(2));
    let handle = Scheduler::new(Duration::from_millis(5)).start(world.clone());

    tokio::time::sleep(Duration::from_millis(40)).await;
    let report = handle.stop().await.unwrap();
    let age_at_stop = world.lock().await.age_in_moments;

    assert_eq!(age_at_stop, report.ticks_run);
    assert!(report.error.is_none());

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(world.lock().await.age_in_moments, age_at_stop);
}

#[tokio::test]
async fn test_outside_access_between_ticks_is_serialized() {
    let world = share(busy_world(3));
    let handle = Scheduler::new(Duration::from_millis(1))
        .with_max_ticks(50)
        .start(world.clone());

    // Every observation sees a whole number of completed moments
    let mut last_age = 0;
    while !handle.is_finished() {
        {
            let guard = world.lock().await;
            assert!(guard.age_in_moments >= last_age);
            assert_eq!(
                guard.stats.spawned - guard.stats.died,
                guard.population_count() as u64
            );
            last_age = guard.age_in_moments;
        }
        tokio::task::yield_now().await;
    }

    let report = handle.join().await.unwrap();
    assert_eq!(report.ticks_run, 50);
}

#[tokio::test]
async fn test_scheduled_world_writes_history() {
    let history = HistoryLog::new();
    let mut world = busy_world(4);
    world.add_sink(Box::new(history.clone()));
    let world = share(world);

    Scheduler::new(Duration::from_millis(1))
        .with_max_ticks(3)
        .start(world)
        .join()
        .await
        .unwrap();

    let ends: Vec<String> = history
        .messages()
        .into_iter()
        .filter(|m| m.starts_with("World is <"))
        .collect();
    assert_eq!(ends, vec!["World is <1>", "World is <2>", "World is <3>"]);
}
