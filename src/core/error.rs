use thiserror::Error;

use crate::core::types::ActorId;

#[derive(Error, Debug)]
pub enum WorldError {
    #[error("Uniform choice attempted on an empty collection")]
    EmptyCollection,

    #[error("Actor not in population: {0:?}")]
    NotInPopulation(ActorId),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Scheduler task failed: {0}")]
    Scheduler(String),
}

pub type Result<T> = std::result::Result<T, WorldError>;
