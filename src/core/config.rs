//! World configuration with documented defaults
//!
//! Every tunable of the simulation lives here and is handed to `World::new`.
//! Nothing is read from process-wide state; two worlds built from two
//! configs never share settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WorldError};

/// The 26 lowercase letters names are drawn from by default
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Relative weights of the three AI choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiWeights {
    pub nothing: u32,
    pub speak: u32,
    pub pray: u32,
}

impl Default for AiWeights {
    fn default() -> Self {
        Self {
            nothing: 10,
            speak: 1,
            pray: 10,
        }
    }
}

/// One entry of the prayer reward table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlessingWeight {
    pub delta: i64,
    pub weight: u32,
}

impl BlessingWeight {
    pub const fn new(delta: i64, weight: u32) -> Self {
        Self { delta, weight }
    }
}

/// Default prayer rewards: mostly nothing, often +1, sometimes -1, rarely +10
pub fn default_blessing_weights() -> Vec<BlessingWeight> {
    vec![
        BlessingWeight::new(0, 24),
        BlessingWeight::new(1, 12),
        BlessingWeight::new(-1, 6),
        BlessingWeight::new(10, 1),
    ]
}

/// How the punishment step picks its candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeastBlessedRule {
    /// Only actors at or below the threshold are eligible; the lowest of
    /// them win. With the default of -1 an actor at blessing 0 or above is
    /// never punished, even when it holds the population minimum.
    Threshold(i64),
    /// The actors holding the population's actual minimum, whatever its sign.
    TrueMinimum,
}

impl Default for LeastBlessedRule {
    fn default() -> Self {
        LeastBlessedRule::Threshold(-1)
    }
}

/// Configuration for a world and the scheduler driving it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Name recorded in history and snapshots
    pub world_name: String,

    /// Letters actor names are built from
    pub alphabet: String,

    /// Longest name the generator will produce (shortest is always 1)
    pub max_name_length: usize,

    /// Probability in [0, 1] that a new actor is appended each moment
    pub monster_spawn_rate: f64,

    /// Wall-clock seconds between scheduled ticks
    pub tick_interval_seconds: f64,

    /// Probability in [0, 1] that the first punishment fires each moment.
    ///
    /// Every successful punishment halves the chance for the next one.
    pub punishment_base_chance: f64,

    /// Candidate rule for the punishment step
    pub least_blessed_rule: LeastBlessedRule,

    /// Weights of the AI action table
    pub ai_weights: AiWeights,

    /// Weights of the prayer reward table
    pub blessing_weights: Vec<BlessingWeight>,

    /// Actors created before the first moment
    pub initial_population: usize,

    /// RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_name: "adventuria".to_string(),
            alphabet: DEFAULT_ALPHABET.to_string(),
            max_name_length: 10,
            monster_spawn_rate: 0.5,
            tick_interval_seconds: 1.0,
            punishment_base_chance: 0.8,
            least_blessed_rule: LeastBlessedRule::default(),
            ai_weights: AiWeights::default(),
            blessing_weights: default_blessing_weights(),
            initial_population: 0,
            seed: None,
        }
    }
}

impl WorldConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML document over the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: WorldConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.monster_spawn_rate) {
            return Err(WorldError::InvalidConfiguration(format!(
                "monster_spawn_rate ({}) must be within [0, 1]",
                self.monster_spawn_rate
            )));
        }

        if !(0.0..=1.0).contains(&self.punishment_base_chance) {
            return Err(WorldError::InvalidConfiguration(format!(
                "punishment_base_chance ({}) must be within [0, 1]",
                self.punishment_base_chance
            )));
        }

        if self.alphabet.is_empty() {
            return Err(WorldError::InvalidConfiguration(
                "alphabet must contain at least one letter".into(),
            ));
        }

        if self.max_name_length == 0 {
            return Err(WorldError::InvalidConfiguration(
                "max_name_length must be at least 1".into(),
            ));
        }

        // Also rejects NaN
        if !(self.tick_interval_seconds > 0.0) || !self.tick_interval_seconds.is_finite() {
            return Err(WorldError::InvalidConfiguration(format!(
                "tick_interval_seconds ({}) must be a positive number",
                self.tick_interval_seconds
            )));
        }

        let ai_total = self.ai_weights.nothing as u64
            + self.ai_weights.speak as u64
            + self.ai_weights.pray as u64;
        if ai_total == 0 {
            return Err(WorldError::InvalidConfiguration(
                "ai_weights must not all be zero".into(),
            ));
        }
        if ai_total > u32::MAX as u64 {
            return Err(WorldError::InvalidConfiguration(format!(
                "ai_weights total ({}) exceeds {}",
                ai_total,
                u32::MAX
            )));
        }

        let blessing_total: u64 = self.blessing_weights.iter().map(|w| w.weight as u64).sum();
        if blessing_total == 0 {
            return Err(WorldError::InvalidConfiguration(
                "blessing_weights must have a positive total weight".into(),
            ));
        }
        if blessing_total > u32::MAX as u64 {
            return Err(WorldError::InvalidConfiguration(format!(
                "blessing_weights total ({}) exceeds {}",
                blessing_total,
                u32::MAX
            )));
        }

        Ok(())
    }
}
