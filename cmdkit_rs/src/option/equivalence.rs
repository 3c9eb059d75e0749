//! Undirected equivalence relation between option definitions.
//!
//! Kept as an adjacency map owned by whoever declares the options, so option
//! values never point at each other.

use std::collections::{BTreeMap, BTreeSet};

use super::OptionDef;

/// Symmetric "satisfies the same requirement" relation.
#[derive(Debug, Clone, Default)]
pub struct Equivalences {
    edges: BTreeMap<OptionDef, BTreeSet<OptionDef>>,
}

impl Equivalences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `a` and `b` equivalent, in both directions.
    ///
    /// Returns false when the pair was already known (or `a == b`), in which
    /// case nothing changes.
    pub fn add(&mut self, a: &OptionDef, b: &OptionDef) -> bool {
        if a == b {
            return false;
        }
        let forward = self.edges.entry(a.clone()).or_default().insert(b.clone());
        let backward = self.edges.entry(b.clone()).or_default().insert(a.clone());
        debug_assert_eq!(forward, backward, "equivalence edges out of sync");
        forward
    }

    pub fn are_equivalent(&self, a: &OptionDef, b: &OptionDef) -> bool {
        self.edges.get(a).is_some_and(|set| set.contains(b))
    }

    /// Direct equivalents of `def`, sorted.
    pub fn of(&self, def: &OptionDef) -> impl Iterator<Item = &OptionDef> {
        self.edges.get(def).into_iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
