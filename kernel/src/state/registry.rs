//! `StateRegistry`: hash-consed states.
//!
//! Each distinct atom set is stored once and named by a dense [`StateId`].
//! Because [`AtomSet`] is canonical, equal content always maps to the same
//! id, and visited checks reduce to integer comparisons.

use std::collections::HashMap;

use crate::formalism::atom_set::AtomSet;
use crate::formalism::ids::StateId;
use crate::proof::hash::{canonical_hash, ContentHash};
use crate::proof::hash_domain::HashDomain;

/// Append-only arena of distinct states.
#[derive(Debug, Clone, Default)]
pub struct StateRegistry {
    states: Vec<AtomSet>,
    index: HashMap<AtomSet, StateId>,
}

impl StateRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `atoms`, registering it if unseen. The flag is `true` when a
    /// new state was created.
    pub fn get_or_create(&mut self, atoms: AtomSet) -> (StateId, bool) {
        if let Some(&id) = self.index.get(&atoms) {
            return (id, false);
        }
        let id = StateId::from_index(self.states.len());
        self.states.push(atoms.clone());
        self.index.insert(atoms, id);
        (id, true)
    }

    /// Lookup without registering.
    #[must_use]
    pub fn find(&self, atoms: &AtomSet) -> Option<StateId> {
        self.index.get(atoms).copied()
    }

    /// Atoms of `id`. Panics on a foreign id.
    #[must_use]
    pub fn state(&self, id: StateId) -> &AtomSet {
        &self.states[id.index()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Content hash of a state: its atom ids ascending, as little-endian
    /// `u32`s, under [`HashDomain::StateFingerprint`].
    ///
    /// Stable across runs that intern atoms in the same order.
    #[must_use]
    pub fn fingerprint(&self, id: StateId) -> ContentHash {
        let bytes: Vec<u8> = self
            .state(id)
            .iter()
            .flat_map(|a| a.raw().to_le_bytes())
            .collect();
        canonical_hash(HashDomain::StateFingerprint, &bytes)
    }
}
