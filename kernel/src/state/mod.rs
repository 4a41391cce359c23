//! States: the hash-consing registry and the successor-state generator.
//!
//! Depends on `formalism`, `actions` (for [`crate::actions::ground::GroundAction`]),
//! and `proof` (fingerprints).

pub mod registry;
pub mod successor;
