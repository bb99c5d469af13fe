//! World - the simulation state container
//!
//! Owns the population, the location hierarchy, the random policy and the
//! chronicle. The moment transition itself lives in `simulation::tick`.

pub mod events;
pub mod location;
pub mod output;

use crate::core::config::{LeastBlessedRule, WorldConfig};
use crate::core::error::{Result, WorldError};
use crate::core::types::{ActorId, Moment};
use crate::entity::actor::{Actor, ActorTemplate};
use crate::entity::naming::random_actor_template;
use crate::simulation::random::RandomPolicy;

pub use events::{Chronicle, EventLevel, EventSink, HistoryLog, WorldEvent};
pub use location::{LevelCounts, Location, LocationKind, Multiverse};
pub use output::{RunSummary, WorldSnapshot};

/// Running totals since the world was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorldStats {
    pub spawned: u64,
    pub died: u64,
}

#[derive(Debug)]
pub struct World {
    pub name: String,
    pub age_in_moments: Moment,
    /// Creation order. Leaving this list is death.
    pub population: Vec<Actor>,
    pub monster_spawn_rate: f64,
    pub punishment_base_chance: f64,
    pub least_blessed_rule: LeastBlessedRule,
    pub multiverses: Vec<Multiverse>,
    pub random: RandomPolicy,
    pub chronicle: Chronicle,
    pub stats: WorldStats,
    next_actor_id: u32,
}

impl World {
    /// Build a world from a config, seeding its initial population
    pub fn new(config: &WorldConfig) -> Result<Self> {
        config.validate()?;
        let random = RandomPolicy::from_config(config)?;

        let mut world = Self {
            name: config.world_name.clone(),
            age_in_moments: 0,
            population: Vec::new(),
            monster_spawn_rate: config.monster_spawn_rate,
            punishment_base_chance: config.punishment_base_chance,
            least_blessed_rule: config.least_blessed_rule,
            multiverses: Vec::new(),
            random,
            chronicle: Chronicle::new(),
            stats: WorldStats::default(),
            next_actor_id: 1,
        };
        world.seed_population(config.initial_population);
        Ok(world)
    }

    /// Default config with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        let config = WorldConfig {
            seed: Some(seed),
            ..WorldConfig::default()
        };
        Self::new(&config).expect("default config is valid")
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.chronicle.add_sink(sink);
    }

    fn next_actor_id(&mut self) -> ActorId {
        let id = ActorId(self.next_actor_id);
        self.next_actor_id += 1;
        id
    }

    /// Append an actor built from `template`
    pub fn add_actor(&mut self, template: ActorTemplate) -> ActorId {
        let id = self.next_actor_id();
        self.population.push(Actor::new(id, template));
        id
    }

    /// Create a randomly named actor and append it to the population
    pub fn create_random_actor(&mut self) -> ActorId {
        let template = random_actor_template(&mut self.random);
        let name = template.name.clone();
        let id = self.add_actor(template);
        self.stats.spawned += 1;
        self.chronicle.record(WorldEvent::ActorSpawned { actor: id, name });
        id
    }

    pub fn seed_population(&mut self, count: usize) {
        for _ in 0..count {
            self.create_random_actor();
        }
    }

    /// Remove an actor from the population, ending its life
    pub fn kill(&mut self, id: ActorId) -> Result<Actor> {
        let idx = self.index_of(id).ok_or(WorldError::NotInPopulation(id))?;
        let actor = self.population.remove(idx);
        self.stats.died += 1;
        self.chronicle.record(WorldEvent::ActorDied {
            actor: actor.id,
            name: actor.name.clone(),
        });
        Ok(actor)
    }

    pub fn index_of(&self, id: ActorId) -> Option<usize> {
        self.population.iter().position(|a| a.id == id)
    }

    pub fn get_actor(&self, id: ActorId) -> Option<&Actor> {
        self.population.iter().find(|a| a.id == id)
    }

    pub fn population_count(&self) -> usize {
        self.population.len()
    }

    pub fn resident_names(&self) -> Vec<&str> {
        self.population.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn blessings(&self) -> Vec<i64> {
        self.population.iter().map(|a| a.blessing).collect()
    }

    /// Create the first multiverse if there is none
    pub fn ensure_multiverse(&mut self) {
        location::ensure_child(&mut self.multiverses, &mut self.chronicle);
    }

    pub fn level_counts(&self) -> LevelCounts {
        LevelCounts::of(&self.multiverses)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_is_empty() {
        let world = World::seeded(1);
        assert_eq!(world.age_in_moments, 0);
        assert!(world.population.is_empty());
        assert!(world.multiverses.is_empty());
        assert_eq!(world.name, "adventuria");
    }

    #[test]
    fn test_initial_population_seeded() {
        let config = WorldConfig {
            seed: Some(3),
            initial_population: 4,
            ..WorldConfig::default()
        };
        let world = World::new(&config).unwrap();
        assert_eq!(world.population_count(), 4);
        let ids: Vec<ActorId> = world.population.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![ActorId(1), ActorId(2), ActorId(3), ActorId(4)]);
        assert_eq!(world.stats.spawned, 4);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WorldConfig {
            monster_spawn_rate: 2.0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            World::new(&config),
            Err(WorldError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_oversized_weights_rejected_without_panic() {
        let mut config = WorldConfig::default();
        config.ai_weights.nothing = u32::MAX;
        config.ai_weights.pray = u32::MAX;
        assert!(matches!(
            World::new(&config),
            Err(WorldError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_kill_removes_in_order() {
        let mut world = World::seeded(1);
        let a = world.add_actor(ActorTemplate::named("a"));
        let b = world.add_actor(ActorTemplate::named("b"));
        let c = world.add_actor(ActorTemplate::named("c"));

        let dead = world.kill(b).unwrap();

        assert_eq!(dead.name, "b");
        assert_eq!(world.resident_names(), vec!["a", "c"]);
        assert!(world.get_actor(a).is_some());
        assert!(world.get_actor(c).is_some());
        assert_eq!(world.stats.died, 1);
    }

    #[test]
    fn test_kill_twice_is_an_error() {
        let mut world = World::seeded(1);
        let a = world.add_actor(ActorTemplate::named("a"));
        world.kill(a).unwrap();
        assert!(matches!(
            world.kill(a),
            Err(WorldError::NotInPopulation(id)) if id == a
        ));
        assert_eq!(world.stats.died, 1);
    }

    #[test]
    fn test_ensure_multiverse_is_lazy() {
        let mut world = World::seeded(1);
        world.ensure_multiverse();
        world.ensure_multiverse();
        assert_eq!(world.multiverses.len(), 1);
        assert!(world.multiverses[0].universes.is_empty());
    }
}
