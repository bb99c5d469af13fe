//! World events, event sinks and the history record
//!
//! Everything that happens during a moment is described by a `WorldEvent`.
//! The `Chronicle` renders each event once and hands the message to every
//! configured `EventSink`. Sinks are fire-and-forget: `emit` cannot fail, and
//! a sink that hits an I/O error reports it through `tracing` and carries on.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{ActorId, Attribute, Moment};
use crate::world::location::LocationKind;

/// Severity of an emitted message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventLevel {
    Debug,
    Info,
}

/// Destination for rendered world events
pub trait EventSink: Send {
    fn emit(&mut self, level: EventLevel, message: &str);
}

/// Something that happened in the world
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    MomentStarted {
        moment: Moment,
    },
    LocationCreated {
        kind: LocationKind,
        name: String,
    },
    ActorSpoke {
        actor: ActorId,
        name: String,
        dialogue: Option<String>,
    },
    ActorPrayed {
        actor: ActorId,
        name: String,
    },
    AttributeModified {
        actor: ActorId,
        name: String,
        attribute: Attribute,
        delta: i64,
        new_value: i64,
    },
    /// The first curse pick. It is announced but nothing is applied to it;
    /// the blessing loss lands on a second, independent pick.
    CurseAnnounced {
        actor: ActorId,
        name: String,
    },
    ActorPunished {
        actor: ActorId,
        name: String,
        blessing: i64,
    },
    ActorDied {
        actor: ActorId,
        name: String,
    },
    SpawnCheck {
        rate: f64,
    },
    ActorSpawned {
        actor: ActorId,
        name: String,
    },
    PopulationCounted {
        count: usize,
    },
    MomentEnded {
        age: Moment,
    },
}

impl WorldEvent {
    pub fn level(&self) -> EventLevel {
        match self {
            WorldEvent::ActorPrayed { .. }
            | WorldEvent::AttributeModified { .. }
            | WorldEvent::SpawnCheck { .. } => EventLevel::Debug,
            _ => EventLevel::Info,
        }
    }
}

impl fmt::Display for WorldEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldEvent::MomentStarted { .. } => {
                write!(f, "*****  Progressing world by one moment...  *****")
            }
            WorldEvent::LocationCreated { kind, .. } => {
                write!(f, "Instantiating a new {}.", kind)
            }
            WorldEvent::ActorSpoke { name, dialogue, .. } => match dialogue {
                Some(line) => write!(f, "[{}]: \"{}\"", name, line),
                None => write!(f, "[{}]: ...", name),
            },
            WorldEvent::ActorPrayed { name, .. } => write!(f, "[{}]: prays for favor", name),
            WorldEvent::AttributeModified {
                name,
                attribute,
                delta,
                new_value,
                ..
            } => write!(f, "[ {} ]  {}: {:+} ({})", name, attribute, delta, new_value),
            WorldEvent::CurseAnnounced { name, .. } => {
                write!(f, "Randomly cursing <{}>", name)
            }
            WorldEvent::ActorPunished { name, .. } => {
                write!(f, "Punishing {} for having a low blessing!", name)
            }
            WorldEvent::ActorDied { name, .. } => write!(f, "{} has died!", name),
            WorldEvent::SpawnCheck { rate } => {
                write!(f, "Checking for monster spawn (<{}>/1 chance)...", rate)
            }
            WorldEvent::ActorSpawned { name, .. } => write!(f, "New actor created!: <{}>", name),
            WorldEvent::PopulationCounted { count } => {
                write!(f, "World population count is {}", count)
            }
            WorldEvent::MomentEnded { age } => write!(f, "World is <{}>", age),
        }
    }
}

/// General log sink: forwards every message to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, level: EventLevel, message: &str) {
        match level {
            EventLevel::Debug => tracing::debug!("{}", message),
            EventLevel::Info => tracing::info!("{}", message),
        }
    }
}

/// One line of world history
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub level: EventLevel,
    pub message: String,
}

/// In-memory world history.
///
/// Cloning yields another handle to the same record, so a caller can keep one
/// handle while the world's chronicle owns the other.
#[derive(Clone, Debug)]
pub struct HistoryLog {
    entries: Arc<Mutex<Vec<HistoryEntry>>>,
    min_level: EventLevel,
}

impl HistoryLog {
    /// A history that keeps narrative (info-level) messages only
    pub fn new() -> Self {
        Self::with_min_level(EventLevel::Info)
    }

    pub fn with_min_level(min_level: EventLevel) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            min_level,
        }
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for HistoryLog {
    fn emit(&mut self, level: EventLevel, message: &str) {
        if level < self.min_level {
            return;
        }
        match self.entries.lock() {
            Ok(mut entries) => entries.push(HistoryEntry {
                level,
                message: message.to_string(),
            }),
            Err(_) => tracing::warn!("history log poisoned, dropping: {}", message),
        }
    }
}

/// Appends narrative messages to a history file, one per line
#[derive(Debug)]
pub struct HistoryFile {
    writer: LineWriter<File>,
    min_level: EventLevel,
}

impl HistoryFile {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: LineWriter::new(file),
            min_level: EventLevel::Info,
        })
    }
}

impl EventSink for HistoryFile {
    fn emit(&mut self, level: EventLevel, message: &str) {
        if level < self.min_level {
            return;
        }
        if let Err(e) = writeln!(self.writer, "{}", message) {
            tracing::warn!("failed to write history line: {}", e);
        }
    }
}

/// Fans world events out to every sink and remembers the current moment's
/// events for the caller of `World::tick`.
#[derive(Default)]
pub struct Chronicle {
    sinks: Vec<Box<dyn EventSink>>,
    recent: Vec<WorldEvent>,
}

impl Chronicle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn record(&mut self, event: WorldEvent) {
        if !self.sinks.is_empty() {
            let level = event.level();
            let message = event.to_string();
            for sink in &mut self.sinks {
                sink.emit(level, &message);
            }
        }
        self.recent.push(event);
    }

    /// Forget events left over from before this moment
    pub fn begin_moment(&mut self) {
        self.recent.clear();
    }

    /// Take the events recorded since the last `begin_moment`
    pub fn take_recent(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.recent)
    }

    pub fn recent(&self) -> &[WorldEvent] {
        &self.recent
    }
}

impl fmt::Debug for Chronicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chronicle")
            .field("sinks", &self.sinks.len())
            .field("recent", &self.recent.len())
            .finish()
    }
}
