//! Location hierarchy - multiverse, universe, galaxy, star system, planet
//!
//! A pure containment tree. Each level owns its own children and, when
//! ticked with no children, creates exactly one default child before passing
//! the tick down. Existing children are never removed or replaced, so the
//! tree grows once on the first tick and then stays put.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::world::events::{Chronicle, WorldEvent};

/// The five levels of the hierarchy, outermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    Multiverse,
    Universe,
    Galaxy,
    StarSystem,
    Planet,
}

impl LocationKind {
    /// Name given to a freshly created location of this kind
    pub fn default_name(&self) -> &'static str {
        match self {
            LocationKind::Multiverse => "multiverse",
            LocationKind::Universe => "universe",
            LocationKind::Galaxy => "galaxy",
            LocationKind::StarSystem => "star system",
            LocationKind::Planet => "planet",
        }
    }

    pub fn child_kind(&self) -> Option<LocationKind> {
        match self {
            LocationKind::Multiverse => Some(LocationKind::Universe),
            LocationKind::Universe => Some(LocationKind::Galaxy),
            LocationKind::Galaxy => Some(LocationKind::StarSystem),
            LocationKind::StarSystem => Some(LocationKind::Planet),
            LocationKind::Planet => None,
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_name())
    }
}

/// Shared contract of every hierarchy level
pub trait Location {
    fn kind(&self) -> LocationKind;

    fn name(&self) -> &str;

    /// Expand if childless, then tick every child
    fn tick(&mut self, chronicle: &mut Chronicle);

    /// This node plus everything below it
    fn node_count(&self) -> usize;
}

/// Append one default child when `children` is empty
pub(crate) fn ensure_child<T: Location + Default>(children: &mut Vec<T>, chronicle: &mut Chronicle) {
    if children.is_empty() {
        let child = T::default();
        chronicle.record(WorldEvent::LocationCreated {
            kind: child.kind(),
            name: child.name().to_string(),
        });
        children.push(child);
    }
}

fn tick_all<T: Location>(children: &mut [T], chronicle: &mut Chronicle) {
    for child in children {
        child.tick(chronicle);
    }
}

fn count_all<T: Location>(children: &[T]) -> usize {
    children.iter().map(|c| c.node_count()).sum()
}

/// Base location in which all other locations exist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Multiverse {
    pub name: String,
    pub universes: Vec<Universe>,
}

impl Default for Multiverse {
    fn default() -> Self {
        Self {
            name: LocationKind::Multiverse.default_name().to_string(),
            universes: Vec::new(),
        }
    }
}

impl Location for Multiverse {
    fn kind(&self) -> LocationKind {
        LocationKind::Multiverse
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tick(&mut self, chronicle: &mut Chronicle) {
        ensure_child(&mut self.universes, chronicle);
        tick_all(&mut self.universes, chronicle);
    }

    fn node_count(&self) -> usize {
        1 + count_all(&self.universes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    pub name: String,
    pub galaxies: Vec<Galaxy>,
}

impl Default for Universe {
    fn default() -> Self {
        Self {
            name: LocationKind::Universe.default_name().to_string(),
            galaxies: Vec::new(),
        }
    }
}

impl Location for Universe {
    fn kind(&self) -> LocationKind {
        LocationKind::Universe
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tick(&mut self, chronicle: &mut Chronicle) {
        ensure_child(&mut self.galaxies, chronicle);
        tick_all(&mut self.galaxies, chronicle);
    }

    fn node_count(&self) -> usize {
        1 + count_all(&self.galaxies)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Galaxy {
    pub name: String,
    pub star_systems: Vec<StarSystem>,
}

impl Default for Galaxy {
    fn default() -> Self {
        Self {
            name: LocationKind::Galaxy.default_name().to_string(),
            star_systems: Vec::new(),
        }
    }
}

impl Location for Galaxy {
    fn kind(&self) -> LocationKind {
        LocationKind::Galaxy
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tick(&mut self, chronicle: &mut Chronicle) {
        ensure_child(&mut self.star_systems, chronicle);
        tick_all(&mut self.star_systems, chronicle);
    }

    fn node_count(&self) -> usize {
        1 + count_all(&self.star_systems)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub name: String,
    pub planets: Vec<Planet>,
}

impl Default for StarSystem {
    fn default() -> Self {
        Self {
            name: LocationKind::StarSystem.default_name().to_string(),
            planets: Vec::new(),
        }
    }
}

impl Location for StarSystem {
    fn kind(&self) -> LocationKind {
        LocationKind::StarSystem
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tick(&mut self, chronicle: &mut Chronicle) {
        ensure_child(&mut self.planets, chronicle);
        tick_all(&mut self.planets, chronicle);
    }

    fn node_count(&self) -> usize {
        1 + count_all(&self.planets)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
}

impl Default for Planet {
    fn default() -> Self {
        Self {
            name: LocationKind::Planet.default_name().to_string(),
        }
    }
}

impl Location for Planet {
    fn kind(&self) -> LocationKind {
        LocationKind::Planet
    }

    fn name(&self) -> &str {
        &self.name
    }

    // Leaf
    fn tick(&mut self, _chronicle: &mut Chronicle) {}

    fn node_count(&self) -> usize {
        1
    }
}

/// Number of nodes at each level of a forest of multiverses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    pub multiverses: usize,
    pub universes: usize,
    pub galaxies: usize,
    pub star_systems: usize,
    pub planets: usize,
}

impl LevelCounts {
    pub fn of(multiverses: &[Multiverse]) -> Self {
        let mut counts = LevelCounts {
            multiverses: multiverses.len(),
            ..Default::default()
        };
        for universe in multiverses.iter().flat_map(|m| &m.universes) {
            counts.universes += 1;
            for galaxy in &universe.galaxies {
                counts.galaxies += 1;
                for system in &galaxy.star_systems {
                    counts.star_systems += 1;
                    counts.planets += system.planets.len();
                }
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.multiverses + self.universes + self.galaxies + self.star_systems + self.planets
    }
}
