//! Random actor generation

use crate::entity::actor::{ActorTemplate, DEFAULT_VITALITY};
use crate::simulation::random::RandomPolicy;

/// A name of random length made of independently drawn letters
pub fn random_name(random: &mut RandomPolicy) -> String {
    let length = random.draw_name_length();
    let name: String = (0..length).map(|_| random.draw_letter()).collect();
    tracing::debug!("Generated <{}> character name: <{}>", length, name);
    name
}

pub fn random_description() -> Option<String> {
    None
}

pub fn random_vitality() -> i64 {
    DEFAULT_VITALITY
}

pub fn random_species() -> Option<String> {
    None
}

/// Template for a freshly spawned actor
pub fn random_actor_template(random: &mut RandomPolicy) -> ActorTemplate {
    ActorTemplate::named(random_name(random))
        .with_description(random_description())
        .with_vitality(random_vitality())
        .with_species(random_species())
}
