//! Moment transition - advances the world by one tick
//!
//! Order within a moment:
//! hierarchy -> actor actions -> curse -> punishment -> spawn -> age
//!
//! A step that fails ends the moment early. Effects of the steps that already
//! ran stay in place, and the age is not advanced.

use crate::core::error::Result;
use crate::core::types::Attribute;
use crate::simulation::punishment::punish_least_blessed;
use crate::world::location::Location;
use crate::world::{World, WorldEvent};

/// Run one moment and return the events it produced
pub fn run_moment(world: &mut World) -> Result<Vec<WorldEvent>> {
    world.chronicle.begin_moment();
    world.chronicle.record(WorldEvent::MomentStarted {
        moment: world.age_in_moments,
    });

    hierarchy_step(world);
    action_step(world);
    curse_step(world)?;
    let chance = world.punishment_base_chance;
    punish_least_blessed(world, chance)?;
    spawn_step(world);
    age_step(world);

    Ok(world.chronicle.take_recent())
}

fn hierarchy_step(world: &mut World) {
    world.ensure_multiverse();
    for multiverse in &mut world.multiverses {
        multiverse.tick(&mut world.chronicle);
    }
}

/// Every actor alive at the start of the step takes its moment. Actions never
/// add or remove actors, so the population is walked in place.
fn action_step(world: &mut World) {
    for actor in world.population.iter_mut() {
        actor.take_moment(&mut world.random, &mut world.chronicle);
    }
}

/// One pick is announced, a second independent pick loses a blessing
fn curse_step(world: &mut World) -> Result<()> {
    if world.population.is_empty() {
        return Ok(());
    }

    let announced = world.random.choose_index(world.population.len())?;
    let actor = &world.population[announced];
    world.chronicle.record(WorldEvent::CurseAnnounced {
        actor: actor.id,
        name: actor.name.clone(),
    });

    let cursed = world.random.choose_index(world.population.len())?;
    world.population[cursed].modify(Attribute::Blessing, -1, &mut world.chronicle);
    Ok(())
}

fn spawn_step(world: &mut World) {
    let rate = world.monster_spawn_rate;
    world.chronicle.record(WorldEvent::SpawnCheck { rate });
    if world.random.roll_probability(rate) {
        world.create_random_actor();
    }
}

fn age_step(world: &mut World) {
    world.chronicle.record(WorldEvent::PopulationCounted {
        count: world.population.len(),
    });
    world.age_in_moments += 1;
    world.chronicle.record(WorldEvent::MomentEnded {
        age: world.age_in_moments,
    });
}

impl World {
    /// Advance the world by one moment
    pub fn tick(&mut self) -> Result<Vec<WorldEvent>> {
        run_moment(self)
    }
}
