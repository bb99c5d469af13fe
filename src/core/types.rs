//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for actors, assigned in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl ActorId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// World age counter (simulation time unit)
pub type Moment = u64;

/// Numeric actor attributes that can be changed through `Actor::modify`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Blessing,
    Vitality,
    HpCurrent,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Blessing => "blessing",
            Attribute::Vitality => "vitality",
            Attribute::HpCurrent => "hp_current",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an actor's AI decided to do with its moment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiAction {
    Nothing,
    Speak,
    Pray,
}
