//! Interned symbols: types, objects, predicates.

use crate::formalism::ids::{ObjectId, PredicateId, TypeId};

/// An object type. Types form a forest rooted at `object`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub id: TypeId,
    pub name: String,
    /// Supertype (`None` only for the root `object` type).
    pub parent: Option<TypeId>,
}

/// A domain constant or problem object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub id: ObjectId,
    pub name: String,
    /// Declared (most specific) type.
    pub type_id: TypeId,
}

/// A named relation with fixed arity.
///
/// `parameter_types[i]` constrains the object at position `i` of every atom
/// over this predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub id: PredicateId,
    pub name: String,
    pub parameter_types: Vec<TypeId>,
}

impl Predicate {
    /// Number of argument positions.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}
