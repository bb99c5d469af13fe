//! Simulation systems - randomness, the moment transition, punishment and
//! the scheduler that drives it all.

pub mod punishment;
pub mod random;
pub mod scheduler;
pub mod tick;

pub use punishment::{find_least_blessed, punish_least_blessed};
pub use random::{RandomPolicy, WeightTable};
pub use scheduler::{Scheduler, SchedulerHandle, SchedulerReport, SharedWorld, StopSignal};
pub use tick::run_moment;
