//! Random policy - every draw the simulation makes goes through here
//!
//! Draws are parameterized by explicit weight tables so no caller builds its
//! own probability list. The generator is a seeded `ChaCha8Rng`, so a world
//! built from the same seed and config replays the same history.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::{AiWeights, BlessingWeight, WorldConfig};
use crate::core::error::{Result, WorldError};
use crate::core::types::AiAction;

/// A discrete distribution over values of `T`
#[derive(Debug, Clone)]
pub struct WeightTable<T> {
    values: Vec<T>,
    weights: Vec<u32>,
    index: WeightedIndex<u32>,
}

impl<T: Clone> WeightTable<T> {
    /// Build a table from `(value, relative weight)` pairs.
    ///
    /// Zero weights are allowed for individual entries, but the total must
    /// be positive and fit in a `u32`.
    pub fn new(entries: impl IntoIterator<Item = (T, u32)>) -> Result<Self> {
        let (values, weights): (Vec<T>, Vec<u32>) = entries.into_iter().unzip();
        let total: u64 = weights.iter().map(|&w| w as u64).sum();
        if total > u32::MAX as u64 {
            return Err(WorldError::InvalidConfiguration(format!(
                "weight table total ({}) exceeds {}",
                total,
                u32::MAX
            )));
        }
        let index = WeightedIndex::new(&weights).map_err(|e| {
            WorldError::InvalidConfiguration(format!("bad weight table: {}", e))
        })?;
        Ok(Self {
            values,
            weights,
            index,
        })
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> T {
        self.values[self.index.sample(rng)].clone()
    }

    pub fn total_weight(&self) -> u64 {
        self.weights.iter().map(|&w| w as u64).sum()
    }

    /// Probability of drawing the entry at `idx`
    pub fn probability(&self, idx: usize) -> f64 {
        self.weights[idx] as f64 / self.total_weight() as f64
    }

    pub fn entries(&self) -> impl Iterator<Item = (&T, u32)> {
        self.values.iter().zip(self.weights.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl WeightTable<AiAction> {
    pub fn from_ai_weights(weights: &AiWeights) -> Result<Self> {
        Self::new([
            (AiAction::Nothing, weights.nothing),
            (AiAction::Speak, weights.speak),
            (AiAction::Pray, weights.pray),
        ])
    }
}

impl WeightTable<i64> {
    pub fn from_blessing_weights(weights: &[BlessingWeight]) -> Result<Self> {
        Self::new(weights.iter().map(|w| (w.delta, w.weight)))
    }

    /// Expected value of a draw
    pub fn mean(&self) -> f64 {
        let total = self.total_weight() as f64;
        self.entries()
            .map(|(&delta, weight)| delta as f64 * weight as f64)
            .sum::<f64>()
            / total
    }
}

/// Owner of the world's random state
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: ChaCha8Rng,
    alphabet: Vec<char>,
    max_name_length: usize,
    ai_table: WeightTable<AiAction>,
    blessing_table: WeightTable<i64>,
}

impl RandomPolicy {
    /// Build the policy from a validated config.
    ///
    /// A config without a seed draws one from the OS.
    pub fn from_config(config: &WorldConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::from_parts(
            ChaCha8Rng::seed_from_u64(seed),
            config.alphabet.chars().collect(),
            config.max_name_length,
            WeightTable::from_ai_weights(&config.ai_weights)?,
            WeightTable::from_blessing_weights(&config.blessing_weights)?,
        )
    }

    /// Default tables with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        let config = WorldConfig {
            seed: Some(seed),
            ..WorldConfig::default()
        };
        Self::from_config(&config).expect("default weight tables are valid")
    }

    pub fn from_parts(
        rng: ChaCha8Rng,
        alphabet: Vec<char>,
        max_name_length: usize,
        ai_table: WeightTable<AiAction>,
        blessing_table: WeightTable<i64>,
    ) -> Result<Self> {
        if alphabet.is_empty() {
            return Err(WorldError::InvalidConfiguration(
                "alphabet must contain at least one letter".into(),
            ));
        }
        if max_name_length == 0 {
            return Err(WorldError::InvalidConfiguration(
                "max_name_length must be at least 1".into(),
            ));
        }
        Ok(Self {
            rng,
            alphabet,
            max_name_length,
            ai_table,
            blessing_table,
        })
    }

    /// Uniform name length in `[1, max_name_length]`
    pub fn draw_name_length(&mut self) -> usize {
        self.rng.gen_range(1..=self.max_name_length)
    }

    /// Uniform letter from the alphabet
    pub fn draw_letter(&mut self) -> char {
        self.alphabet[self.rng.gen_range(0..self.alphabet.len())]
    }

    pub fn draw_ai_action(&mut self) -> AiAction {
        self.ai_table.sample(&mut self.rng)
    }

    pub fn draw_blessing_delta(&mut self) -> i64 {
        self.blessing_table.sample(&mut self.rng)
    }

    /// True with probability `p`. Values at or below 0 never pass, values
    /// at or above 1 always do.
    pub fn roll_probability(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    pub fn choose_uniform<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T> {
        items.choose(&mut self.rng).ok_or(WorldError::EmptyCollection)
    }

    /// Uniform index into a collection of `len` items
    pub fn choose_index(&mut self, len: usize) -> Result<usize> {
        if len == 0 {
            return Err(WorldError::EmptyCollection);
        }
        Ok(self.rng.gen_range(0..len))
    }

    pub fn blessing_table(&self) -> &WeightTable<i64> {
        &self.blessing_table
    }
}
