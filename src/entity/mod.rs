pub mod actor;
pub mod ai;
pub mod naming;

pub use actor::{Actor, ActorSummary, ActorTemplate};
pub use ai::{Ai, BaseAi, BASE_AI};
