//! Formalism: the interned planning model.
//!
//! Everything here is immutable once [`builder::ProblemBuilder::build`]
//! returns. Handles ([`ids`]) index into [`factories::PddlFactories`] and
//! are cheap to copy and compare.

pub mod atom;
pub mod atom_set;
pub mod builder;
pub mod describe;
pub mod error;
pub mod factories;
pub mod ids;
pub mod problem;
pub mod schema;
pub mod symbols;
