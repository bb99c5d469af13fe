//! Punishment of the least blessed
//!
//! Each moment the world may kill its least blessed actor. Every kill halves
//! the chance of another one, so a moment's purge stops quickly and can never
//! remove more actors than exist.

use crate::core::config::LeastBlessedRule;
use crate::core::error::Result;
use crate::entity::actor::{Actor, ActorSummary};
use crate::world::{World, WorldEvent};

/// Indices of the actors eligible for punishment, in population order.
///
/// Under `Threshold(t)` the running threshold starts at `t` and only ever
/// goes down, so an actor above `t` is never a candidate even when it holds
/// the population minimum.
pub fn find_least_blessed(population: &[Actor], rule: LeastBlessedRule) -> Vec<usize> {
    let mut lowest = match rule {
        LeastBlessedRule::Threshold(threshold) => threshold,
        LeastBlessedRule::TrueMinimum => match population.iter().map(|a| a.blessing).min() {
            Some(min) => min,
            None => return Vec::new(),
        },
    };

    let mut candidates = Vec::new();
    for (idx, actor) in population.iter().enumerate() {
        if actor.blessing < lowest {
            candidates.clear();
            candidates.push(idx);
            lowest = actor.blessing;
        } else if actor.blessing == lowest {
            candidates.push(idx);
        }
    }
    candidates
}

/// Roll `chance`; on success kill one least blessed actor and try again at
/// half the chance. Stops on a failed roll, an empty population or an empty
/// candidate set. Returns the punished actors in order of death.
pub fn punish_least_blessed(world: &mut World, chance: f64) -> Result<Vec<ActorSummary>> {
    let mut punished = Vec::new();
    let mut chance = chance;

    while !world.population.is_empty() && world.random.roll_probability(chance) {
        let candidates = find_least_blessed(&world.population, world.least_blessed_rule);
        let idx = match world.random.choose_uniform(&candidates) {
            Ok(&idx) => idx,
            Err(_) => break,
        };

        let actor = &world.population[idx];
        let id = actor.id;
        world.chronicle.record(WorldEvent::ActorPunished {
            actor: id,
            name: actor.name.clone(),
            blessing: actor.blessing,
        });

        let dead = world.kill(id)?;
        punished.push(ActorSummary::from(&dead));
        chance /= 2.0;
    }

    Ok(punished)
}
