//! Actor decision making
//!
//! AIs are stateless policies shared by reference between actors. All of an
//! AI's randomness comes from the world's `RandomPolicy`.

use std::fmt::Debug;

use crate::core::types::AiAction;
use crate::simulation::random::RandomPolicy;

pub trait Ai: Debug + Send + Sync {
    fn make_choice(&self, random: &mut RandomPolicy) -> AiAction;
}

/// Default AI: one weighted draw from the policy's action table
#[derive(Debug, Default, Clone, Copy)]
pub struct BaseAi;

impl Ai for BaseAi {
    fn make_choice(&self, random: &mut RandomPolicy) -> AiAction {
        random.draw_ai_action()
    }
}

/// Shared instance handed to every default actor
pub static BASE_AI: BaseAi = BaseAi;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_ai_follows_policy() {
        let mut a = RandomPolicy::seeded(99);
        let mut b = RandomPolicy::seeded(99);
        for _ in 0..50 {
            assert_eq!(BASE_AI.make_choice(&mut a), b.draw_ai_action());
        }
    }
}
