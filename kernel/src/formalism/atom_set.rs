//! `AtomSet`: canonical bitset over ground atom ids.
//!
//! # Canonical form
//!
//! Bit `i` of word `i / 64` is set iff `GroundAtomId(i)` is in the set.
//! Trailing all-zero words are always trimmed, so two sets holding the same
//! atoms have identical word vectors and therefore equal `Hash`/`Eq`. The
//! state registry relies on this to intern states by content.

use crate::formalism::ids::GroundAtomId;

const WORD_BITS: usize = 64;

/// A set of ground atoms, stored as a trimmed bitset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AtomSet {
    words: Vec<u64>,
}

impl AtomSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any collection of atoms (duplicates collapse).
    pub fn from_atoms(atoms: impl IntoIterator<Item = GroundAtomId>) -> Self {
        let mut set = Self::new();
        for atom in atoms {
            set.insert(atom);
        }
        set
    }

    /// Returns `true` if the atom was not present.
    pub fn insert(&mut self, atom: GroundAtomId) -> bool {
        let (word, mask) = Self::locate(atom);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        let was_absent = self.words[word] & mask == 0;
        self.words[word] |= mask;
        was_absent
    }

    /// Returns `true` if the atom was present.
    pub fn remove(&mut self, atom: GroundAtomId) -> bool {
        let (word, mask) = Self::locate(atom);
        let Some(slot) = self.words.get_mut(word) else {
            return false;
        };
        let was_present = *slot & mask != 0;
        *slot &= !mask;
        self.trim();
        was_present
    }

    #[must_use]
    pub fn contains(&self, atom: GroundAtomId) -> bool {
        let (word, mask) = Self::locate(atom);
        self.words.get(word).is_some_and(|w| w & mask != 0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Atoms in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = GroundAtomId> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &bits)| {
            let mut remaining = bits;
            std::iter::from_fn(move || {
                if remaining == 0 {
                    return None;
                }
                let bit = remaining.trailing_zeros() as usize;
                remaining &= remaining - 1;
                Some(GroundAtomId::from_index(w * WORD_BITS + bit))
            })
        })
    }

    /// Whether every atom of `self` is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.words.iter().enumerate().all(|(i, &w)| {
            let o = other.words.get(i).copied().unwrap_or(0);
            w & !o == 0
        })
    }

    /// In-place union.
    pub fn union_with(&mut self, other: &Self) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (w, o) in self.words.iter_mut().zip(&other.words) {
            *w |= o;
        }
    }

    /// In-place difference.
    pub fn difference_with(&mut self, other: &Self) {
        for (w, o) in self.words.iter_mut().zip(&other.words) {
            *w &= !o;
        }
        self.trim();
    }

    fn locate(atom: GroundAtomId) -> (usize, u64) {
        let i = atom.index();
        (i / WORD_BITS, 1u64 << (i % WORD_BITS))
    }

    fn trim(&mut self) {
        while self.words.last() == Some(&0) {
            self.words.pop();
        }
    }
}

impl FromIterator<GroundAtomId> for AtomSet {
    fn from_iter<I: IntoIterator<Item = GroundAtomId>>(iter: I) -> Self {
        Self::from_atoms(iter)
    }
}
