//! World snapshots and run summaries

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::Moment;
use crate::entity::actor::ActorSummary;
use crate::world::location::LevelCounts;
use crate::world::World;

/// Serializable view of the world at one moment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub name: String,
    pub age_in_moments: Moment,
    pub population: Vec<ActorSummary>,
    pub locations: LevelCounts,
}

impl From<&World> for WorldSnapshot {
    fn from(world: &World) -> Self {
        Self {
            name: world.name.clone(),
            age_in_moments: world.age_in_moments,
            population: world.population.iter().map(ActorSummary::from).collect(),
            locations: world.level_counts(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub moments_run: u64,
    pub run_time_ms: u64,
    pub actors_spawned: u64,
    pub actors_died: u64,
    pub final_population: usize,
    pub most_blessed: Option<String>,
    pub least_blessed: Option<String>,
}

/// Everything worth keeping from a finished run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub final_world: WorldSnapshot,
    pub statistics: RunStats,
}

impl RunSummary {
    pub fn new(world: &World, moments_run: u64, elapsed: Duration) -> Self {
        let most_blessed = world
            .population
            .iter()
            .max_by_key(|a| a.blessing)
            .map(|a| a.name.clone());
        let least_blessed = world
            .population
            .iter()
            .min_by_key(|a| a.blessing)
            .map(|a| a.name.clone());

        Self {
            final_world: world.snapshot(),
            statistics: RunStats {
                moments_run,
                run_time_ms: elapsed.as_millis() as u64,
                actors_spawned: world.stats.spawned,
                actors_died: world.stats.died,
                final_population: world.population.len(),
                most_blessed,
                least_blessed,
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} is {} moments old after {} moments in {}ms\n{} spawned, {} died, {} remain",
            self.final_world.name,
            self.final_world.age_in_moments,
            self.statistics.moments_run,
            self.statistics.run_time_ms,
            self.statistics.actors_spawned,
            self.statistics.actors_died,
            self.statistics.final_population,
        )
    }
}
