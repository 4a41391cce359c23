//! Actions: ground actions and applicable-action generators.
//!
//! Depends on `formalism`. The generator variants share one trait,
//! [`generator::ApplicableActionGenerator`]; [`generator::AagKind`] picks
//! one at construction.

pub mod generator;
pub mod ground;
pub mod grounded;
pub mod lifted;
