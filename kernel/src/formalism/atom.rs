//! Atoms, literals, and the ground atom interner.
//!
//! A lifted atom applies a predicate to [`Term`]s (constants or schema
//! parameters); a ground atom applies it to objects only. Ground atoms are
//! hash-consed by [`GroundAtomTable`]: structurally equal atoms always get
//! the same [`GroundAtomId`], and ids are allocated in first-seen order.

use std::collections::HashMap;

use crate::formalism::ids::{GroundAtomId, ObjectId, PredicateId};

/// An argument of a lifted atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    /// A constant object.
    Object(ObjectId),
    /// The schema parameter at this position of the parameter list.
    Parameter(usize),
}

/// A predicate applied to terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiftedAtom {
    pub predicate: PredicateId,
    pub terms: Vec<Term>,
}

impl LiftedAtom {
    #[must_use]
    pub fn new(predicate: PredicateId, terms: Vec<Term>) -> Self {
        Self { predicate, terms }
    }

    /// Parameter indices mentioned by this atom, in term order (may repeat).
    pub fn parameters(&self) -> impl Iterator<Item = usize> + '_ {
        self.terms.iter().filter_map(|t| match t {
            Term::Parameter(p) => Some(*p),
            Term::Object(_) => None,
        })
    }

    /// Substitute `binding` for parameters.
    ///
    /// `binding` must cover every parameter index the atom mentions; schema
    /// construction guarantees this for atoms owned by a schema.
    #[must_use]
    pub fn ground_objects(&self, binding: &[ObjectId]) -> Vec<ObjectId> {
        self.terms
            .iter()
            .map(|t| match *t {
                Term::Object(o) => o,
                Term::Parameter(p) => binding[p],
            })
            .collect()
    }
}

/// A predicate applied to objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroundAtom {
    pub predicate: PredicateId,
    pub objects: Vec<ObjectId>,
}

/// An atom with polarity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal<A> {
    pub atom: A,
    pub negated: bool,
}

impl<A> Literal<A> {
    #[must_use]
    pub fn positive(atom: A) -> Self {
        Self {
            atom,
            negated: false,
        }
    }

    #[must_use]
    pub fn negative(atom: A) -> Self {
        Self {
            atom,
            negated: true,
        }
    }
}

/// Literal over a lifted atom (schema preconditions and effects).
pub type LiftedLiteral = Literal<LiftedAtom>;

/// Literal over an interned ground atom (goals, ground conditions).
pub type GroundLiteral = Literal<GroundAtomId>;

/// Hash-consing interner for ground atoms.
///
/// Append-only: ids are never reused or remapped. Cloning the table and
/// extending the clone keeps every existing id valid in the clone.
#[derive(Debug, Clone, Default)]
pub struct GroundAtomTable {
    atoms: Vec<GroundAtom>,
    index: HashMap<GroundAtom, GroundAtomId>,
}

impl GroundAtomTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `predicate(objects...)`, returning the existing id if present.
    pub fn get_or_create(&mut self, predicate: PredicateId, objects: Vec<ObjectId>) -> GroundAtomId {
        let atom = GroundAtom { predicate, objects };
        if let Some(&id) = self.index.get(&atom) {
            return id;
        }
        let id = GroundAtomId::from_index(self.atoms.len());
        self.atoms.push(atom.clone());
        self.index.insert(atom, id);
        id
    }

    /// Look up without interning. `None` means the atom was never created,
    /// so it cannot hold in any state built from this table.
    #[must_use]
    pub fn get(&self, predicate: PredicateId, objects: &[ObjectId]) -> Option<GroundAtomId> {
        let key = GroundAtom {
            predicate,
            objects: objects.to_vec(),
        };
        self.index.get(&key).copied()
    }

    /// The atom behind `id`. Panics on a foreign id.
    #[must_use]
    pub fn atom(&self, id: GroundAtomId) -> &GroundAtom {
        &self.atoms[id.index()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// All atoms in id order.
    pub fn iter(&self) -> impl Iterator<Item = (GroundAtomId, &GroundAtom)> {
        self.atoms
            .iter()
            .enumerate()
            .map(|(i, a)| (GroundAtomId::from_index(i), a))
    }
}
