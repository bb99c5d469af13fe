//! Actors - the inhabitants of the world
//!
//! An actor owns its attributes and decides its own moment through its AI.
//! It never removes itself: death is `World::kill`, which takes the actor out
//! of the population.

use serde::{Deserialize, Serialize};

use crate::core::types::{ActorId, AiAction, Attribute};
use crate::entity::ai::{Ai, BASE_AI};
use crate::simulation::random::RandomPolicy;
use crate::world::events::{Chronicle, WorldEvent};

pub const DEFAULT_VITALITY: i64 = 1;
pub const DEFAULT_DIALOGUE: &str = "hello!";
pub const DEFAULT_BLESSING: i64 = 0;

/// Everything needed to create an actor except its id
#[derive(Debug, Clone)]
pub struct ActorTemplate {
    pub name: String,
    pub description: Option<String>,
    pub species: Option<String>,
    pub dialogue: Option<String>,
    pub vitality: i64,
    pub blessing: i64,
    pub ai: &'static dyn Ai,
}

impl ActorTemplate {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_blessing(mut self, blessing: i64) -> Self {
        self.blessing = blessing;
        self
    }

    pub fn with_vitality(mut self, vitality: i64) -> Self {
        self.vitality = vitality;
        self
    }

    pub fn with_dialogue(mut self, dialogue: Option<String>) -> Self {
        self.dialogue = dialogue;
        self
    }

    pub fn with_species(mut self, species: Option<String>) -> Self {
        self.species = species;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_ai(mut self, ai: &'static dyn Ai) -> Self {
        self.ai = ai;
        self
    }
}

impl Default for ActorTemplate {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            species: None,
            dialogue: Some(DEFAULT_DIALOGUE.to_string()),
            vitality: DEFAULT_VITALITY,
            blessing: DEFAULT_BLESSING,
            ai: &BASE_AI,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub description: Option<String>,
    pub species: Option<String>,
    pub dialogue: Option<String>,
    /// Always at least 1; doubles as the hp maximum
    pub vitality: i64,
    pub hp_current: i64,
    pub blessing: i64,
    ai: &'static dyn Ai,
}

impl Actor {
    /// Create an actor at full health. Vitality is clamped to at least 1.
    pub fn new(id: ActorId, template: ActorTemplate) -> Self {
        let vitality = template.vitality.max(1);
        Self {
            id,
            name: template.name,
            description: template.description,
            species: template.species,
            dialogue: template.dialogue,
            vitality,
            hp_current: vitality,
            blessing: template.blessing,
            ai: template.ai,
        }
    }

    pub fn hp_maximum(&self) -> i64 {
        self.vitality
    }

    pub fn get(&self, attribute: Attribute) -> i64 {
        match attribute {
            Attribute::Blessing => self.blessing,
            Attribute::Vitality => self.vitality,
            Attribute::HpCurrent => self.hp_current,
        }
    }

    /// Spend this actor's moment on whatever its AI picks
    pub fn take_moment(&mut self, random: &mut RandomPolicy, chronicle: &mut Chronicle) -> AiAction {
        let choice = self.ai.make_choice(random);
        match choice {
            AiAction::Speak => self.speak(chronicle),
            AiAction::Pray => {
                self.pray(random, chronicle);
            }
            AiAction::Nothing => {}
        }
        choice
    }

    /// Add `delta` to an attribute, record the change and return the new value.
    /// Vitality never drops below 1.
    pub fn modify(&mut self, attribute: Attribute, delta: i64, chronicle: &mut Chronicle) -> i64 {
        let new_value = match attribute {
            Attribute::Blessing => {
                self.blessing = self.blessing.saturating_add(delta);
                self.blessing
            }
            Attribute::Vitality => {
                self.vitality = self.vitality.saturating_add(delta).max(1);
                self.vitality
            }
            Attribute::HpCurrent => {
                self.hp_current = self.hp_current.saturating_add(delta);
                self.hp_current
            }
        };

        chronicle.record(WorldEvent::AttributeModified {
            actor: self.id,
            name: self.name.clone(),
            attribute,
            delta,
            new_value,
        });
        new_value
    }

    pub fn speak(&self, chronicle: &mut Chronicle) {
        chronicle.record(WorldEvent::ActorSpoke {
            actor: self.id,
            name: self.name.clone(),
            dialogue: self.dialogue.clone(),
        });
    }

    /// Ask for favor; returns the blessing delta received
    pub fn pray(&mut self, random: &mut RandomPolicy, chronicle: &mut Chronicle) -> i64 {
        chronicle.record(WorldEvent::ActorPrayed {
            actor: self.id,
            name: self.name.clone(),
        });
        let delta = random.draw_blessing_delta();
        self.modify(Attribute::Blessing, delta, chronicle);
        delta
    }

    pub fn summary(&self) -> ActorSummary {
        ActorSummary::from(self)
    }
}

/// Serializable view of an actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSummary {
    pub id: ActorId,
    pub name: String,
    pub description: Option<String>,
    pub species: Option<String>,
    pub dialogue: Option<String>,
    pub vitality: i64,
    pub hp_current: i64,
    pub hp_maximum: i64,
    pub blessing: i64,
}

impl From<&Actor> for ActorSummary {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id,
            name: actor.name.clone(),
            description: actor.description.clone(),
            species: actor.species.clone(),
            dialogue: actor.dialogue.clone(),
            vitality: actor.vitality,
            hp_current: actor.hp_current,
            hp_maximum: actor.hp_maximum(),
            blessing: actor.blessing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct AlwaysSpeak;

    impl Ai for AlwaysSpeak {
        fn make_choice(&self, _random: &mut RandomPolicy) -> AiAction {
            AiAction::Speak
        }
    }

    static ALWAYS_SPEAK: AlwaysSpeak = AlwaysSpeak;

    #[derive(Debug)]
    struct AlwaysPray;

    impl Ai for AlwaysPray {
        fn make_choice(&self, _random: &mut RandomPolicy) -> AiAction {
            AiAction::Pray
        }
    }

    static ALWAYS_PRAY: AlwaysPray = AlwaysPray;

    #[test]
    fn test_defaults() {
        let actor = Actor::new(ActorId(1), ActorTemplate::named("zed"));
        assert_eq!(actor.vitality, 1);
        assert_eq!(actor.hp_maximum(), 1);
        assert_eq!(actor.hp_current, 1);
        assert_eq!(actor.blessing, 0);
        assert_eq!(actor.dialogue.as_deref(), Some("hello!"));
        assert!(actor.species.is_none());
        assert!(actor.description.is_none());
    }

    #[test]
    fn test_hp_maximum_tracks_vitality() {
        let mut chronicle = Chronicle::new();
        let mut actor = Actor::new(ActorId(1), ActorTemplate::named("zed").with_vitality(4));
        assert_eq!(actor.hp_current, 4);
        actor.modify(Attribute::Vitality, 3, &mut chronicle);
        assert_eq!(actor.hp_maximum(), 7);
        assert_eq!(actor.hp_current, 4);
    }

    #[test]
    fn test_vitality_clamped() {
        let actor = Actor::new(ActorId(1), ActorTemplate::named("zed").with_vitality(0));
        assert_eq!(actor.vitality, 1);
    }

    #[test]
    fn test_vitality_modify_stays_positive() {
        let mut chronicle = Chronicle::new();
        let mut actor = Actor::new(ActorId(1), ActorTemplate::named("zed").with_vitality(2));

        let value = actor.modify(Attribute::Vitality, -5, &mut chronicle);

        assert_eq!(value, 1);
        assert_eq!(actor.vitality, 1);
        assert_eq!(actor.hp_maximum(), 1);
        assert!(matches!(
            chronicle.recent(),
            [WorldEvent::AttributeModified { delta: -5, new_value: 1, .. }]
        ));
    }

    #[test]
    fn test_modify_records_audit() {
        let mut chronicle = Chronicle::new();
        let mut actor = Actor::new(ActorId(3), ActorTemplate::named("kim").with_blessing(2));

        let value = actor.modify(Attribute::Blessing, -5, &mut chronicle);

        assert_eq!(value, -3);
        assert_eq!(actor.get(Attribute::Blessing), -3);
        assert_eq!(
            chronicle.recent(),
            &[WorldEvent::AttributeModified {
                actor: ActorId(3),
                name: "kim".into(),
                attribute: Attribute::Blessing,
                delta: -5,
                new_value: -3,
            }]
        );
    }

    #[test]
    fn test_speak_changes_nothing() {
        let mut chronicle = Chronicle::new();
        let mut random = RandomPolicy::seeded(1);
        let mut actor = Actor::new(ActorId(1), ActorTemplate::named("ada").with_ai(&ALWAYS_SPEAK));

        let action = actor.take_moment(&mut random, &mut chronicle);

        assert_eq!(action, AiAction::Speak);
        assert_eq!(actor.blessing, 0);
        assert!(matches!(
            chronicle.recent(),
            [WorldEvent::ActorSpoke { dialogue: Some(line), .. }] if line == "hello!"
        ));
    }

    #[test]
    fn test_pray_applies_drawn_delta() {
        let mut chronicle = Chronicle::new();
        let mut random = RandomPolicy::seeded(17);
        let mut expected = RandomPolicy::seeded(17);
        let mut actor = Actor::new(ActorId(1), ActorTemplate::named("ada").with_ai(&ALWAYS_PRAY));

        let mut total = 0;
        for _ in 0..25 {
            actor.take_moment(&mut random, &mut chronicle);
            total += expected.draw_blessing_delta();
        }

        assert_eq!(actor.blessing, total);
    }

    #[test]
    fn test_summary_matches_actor() {
        let actor = Actor::new(ActorId(9), ActorTemplate::named("q").with_blessing(-2));
        let summary = actor.summary();
        assert_eq!(summary.id, ActorId(9));
        assert_eq!(summary.blessing, -2);
        assert_eq!(summary.hp_maximum, 1);
    }
}
