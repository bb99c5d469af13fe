//! Fixed-cadence driver for the world
//!
//! The scheduler owns one tokio task that ticks the world on an interval.
//! The world sits behind an async mutex and a tick runs entirely while the
//! lock is held, so ticks never overlap, even with other tasks touching the
//! world between them. Stopping prevents further ticks; a tick already in
//! progress finishes first.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::core::error::{Result, WorldError};
use crate::world::World;

pub type SharedWorld = Arc<Mutex<World>>;

pub fn share(world: World) -> SharedWorld {
    Arc::new(Mutex::new(world))
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    tick_interval: Duration,
    max_ticks: Option<u64>,
}

impl Scheduler {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            max_ticks: None,
        }
    }

    pub fn from_seconds(seconds: f64) -> Result<Self> {
        if !(seconds > 0.0) || !seconds.is_finite() {
            return Err(WorldError::InvalidConfiguration(format!(
                "tick interval ({}) must be a positive number of seconds",
                seconds
            )));
        }
        Ok(Self::new(Duration::from_secs_f64(seconds)))
    }

    /// Stop on its own after `max_ticks` completed ticks
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Spawn the tick loop. Must be called from within a tokio runtime.
    pub fn start(self, world: SharedWorld) -> SchedulerHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        tracing::info!(
            "Scheduler starting ({:.3}s per moment)",
            self.tick_interval.as_secs_f64()
        );
        let task = tokio::spawn(self.run(world, stop_rx));
        SchedulerHandle {
            stop: StopSignal(Arc::new(stop_tx)),
            task,
        }
    }

    async fn run(self, world: SharedWorld, mut stop_rx: watch::Receiver<bool>) -> SchedulerReport {
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut report = SchedulerReport::default();

        loop {
            if self.max_ticks.is_some_and(|max| report.ticks_run >= max) {
                tracing::info!("Scheduler reached {} ticks", report.ticks_run);
                break;
            }

            tokio::select! {
                biased;
                changed = stop_rx.changed() => {
                    // A dropped sender also counts as a stop
                    if changed.is_err() || *stop_rx.borrow() {
                        break;
                    }
                    continue;
                }
                _ = interval.tick() => {}
            }

            if *stop_rx.borrow() {
                break;
            }

            let mut world = world.lock().await;
            tracing::debug!("Doing core loop iteration...");
            match world.tick() {
                Ok(_) => {
                    report.ticks_run += 1;
                    tracing::debug!("World residents: {:?}", world.resident_names());
                }
                Err(e) => {
                    tracing::error!("Moment {} failed: {}", world.age_in_moments, e);
                    report.error = Some(e);
                    break;
                }
            }
        }

        tracing::info!("Scheduler stopped after {} ticks", report.ticks_run);
        report
    }
}

/// Cloneable stop button for a running scheduler
#[derive(Debug, Clone)]
pub struct StopSignal(Arc<watch::Sender<bool>>);

impl StopSignal {
    pub fn stop(&self) {
        self.0.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.0.borrow()
    }
}

#[derive(Debug, Default)]
pub struct SchedulerReport {
    pub ticks_run: u64,
    /// The error that ended the run, if any
    pub error: Option<WorldError>,
}

#[derive(Debug)]
pub struct SchedulerHandle {
    stop: StopSignal,
    task: JoinHandle<SchedulerReport>,
}

impl SchedulerHandle {
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Ask the loop to stop and wait for the in-flight tick, if any
    pub async fn stop(self) -> Result<SchedulerReport> {
        self.stop.stop();
        self.join().await
    }

    /// Wait for the loop to end on its own (tick limit, error or stop signal)
    pub async fn join(self) -> Result<SchedulerReport> {
        let SchedulerHandle { stop, task } = self;
        let report = task
            .await
            .map_err(|e| WorldError::Scheduler(e.to_string()))?;
        drop(stop);
        Ok(report)
    }
}
