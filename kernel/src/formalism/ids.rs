//! Interned handle types.
//!
//! Every interned entity (type, object, predicate, ground atom, schema,
//! ground action, state) is identified by a dense `u32` index into the arena that
//! owns it. Handles are only meaningful against the `PddlFactories` /
//! generator instance that produced them.
//!
//! All handles derive `Ord`, so `BTreeMap`/`BTreeSet` iteration and sorted
//! vectors follow allocation order.

use std::fmt;

/// Declares a dense index newtype with `new`, `index`, and `raw` accessors.
macro_rules! define_handles {
    (
        $(
            $(#[$meta:meta])*
            $name:ident => $prefix:literal
        ),+ $(,)?
    ) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct $name(u32);

            impl $name {
                /// Construct from a raw index.
                #[must_use]
                pub const fn new(raw: u32) -> Self {
                    Self(raw)
                }

                /// Construct from an arena position.
                ///
                /// Arenas are bounded by `u32::MAX` entries; positions past
                /// that are a caller bug.
                #[must_use]
                #[allow(clippy::cast_possible_truncation)]
                pub const fn from_index(index: usize) -> Self {
                    Self(index as u32)
                }

                /// Arena position.
                #[must_use]
                pub const fn index(self) -> usize {
                    self.0 as usize
                }

                /// Raw `u32` value (used in canonical JSON).
                #[must_use]
                pub const fn raw(self) -> u32 {
                    self.0
                }
            }

            impl fmt::Debug for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!($prefix, "#{}"), self.0)
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!($prefix, "#{}"), self.0)
                }
            }
        )+
    };
}

define_handles! {
    /// Handle of an object type (`object` is always `TypeId(0)`).
    TypeId => "type",
    /// Handle of an interned domain constant / problem object.
    ObjectId => "obj",
    /// Handle of an interned predicate.
    PredicateId => "pred",
    /// Handle of an interned ground atom.
    GroundAtomId => "atom",
    /// Handle of an action schema (position in `Problem::schemas`).
    SchemaId => "schema",
    /// Handle of a ground action inside an applicable-action generator.
    GroundActionId => "action",
    /// Handle of a state in a `StateRegistry`.
    StateId => "state",
}

impl TypeId {
    /// The root type every object belongs to.
    pub const OBJECT: Self = Self(0);
}
