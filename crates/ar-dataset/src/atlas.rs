//! In-memory atlas: entries, their boundaries, and the id → name roster.

use std::sync::Arc;

use ar_core::{EntityId, Vertex};

/// One polygon of an entity together with the period string it is keyed by.
#[derive(Clone, Debug, PartialEq)]
pub struct Boundary {
    /// Raw period text as written in the dataset, e.g. `"1-166, T"`.
    pub period:   String,
    pub vertices: Vec<Vertex>,
}

impl Boundary {
    pub fn new(period: impl Into<String>, vertices: Vec<Vertex>) -> Self {
        Self { period: period.into(), vertices }
    }
}

/// One atlas entity.
///
/// `boundaries` keeps the order the periods appear in the source document,
/// which fixes sample order downstream.
#[derive(Clone, Debug, PartialEq)]
pub struct AtlasEntry {
    pub id:         EntityId,
    pub name:       String,
    pub boundaries: Vec<Boundary>,
}

impl AtlasEntry {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), boundaries: Vec::new() }
    }

    /// Builder-style boundary append.
    pub fn with_boundary(mut self, period: impl Into<String>, vertices: Vec<Vertex>) -> Self {
        self.boundaries.push(Boundary::new(period, vertices));
        self
    }
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// The full atlas, read once per run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub entries: Vec<AtlasEntry>,
}

impl Dataset {
    pub fn new(entries: Vec<AtlasEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the id → name roster in entry order.
    ///
    /// A repeated id keeps its first position and takes the later name.
    pub fn roster(&self) -> Roster {
        let mut roster = Roster::default();
        for entry in &self.entries {
            if roster.insert(entry.id, &entry.name) {
                tracing::warn!(id = %entry.id, name = %entry.name, "duplicate atlas id, keeping first position");
            }
        }
        roster
    }
}

#[cfg(feature = "fx-hash")]
type PositionMap = rustc_hash::FxHashMap<EntityId, usize>;
#[cfg(not(feature = "fx-hash"))]
type PositionMap = std::collections::HashMap<EntityId, usize>;

// ── Roster ────────────────────────────────────────────────────────────────────

/// Ordered id → name mapping.
///
/// Iteration order is insertion order; the ranker relies on it to break ties.
/// Names are shared (`Arc<str>`) so every ranked record can carry one
/// without copying the string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    entries:  Vec<(EntityId, Arc<str>)>,
    position: PositionMap,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or rename.  Returns `true` if `id` was already present.
    pub fn insert(&mut self, id: EntityId, name: &str) -> bool {
        match self.position.get(&id) {
            Some(&pos) => {
                self.entries[pos].1 = Arc::from(name);
                true
            }
            None => {
                self.position.insert(id, self.entries.len());
                self.entries.push((id, Arc::from(name)));
                false
            }
        }
    }

    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.position.get(&id).map(|&pos| &*self.entries[pos].1)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.position.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &str)> + '_ {
        self.entries.iter().map(|(id, name)| (*id, &**name))
    }

    /// Entries with their shared names, in insertion order.
    pub fn entries(&self) -> &[(EntityId, Arc<str>)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(EntityId, S)> for Roster {
    fn from_iter<I: IntoIterator<Item = (EntityId, S)>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for (id, name) in iter {
            roster.insert(id, name.as_ref());
        }
        roster
    }
}
