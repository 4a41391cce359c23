//! Groundwork kernel: the planning model, state space, and grounding.
//!
//! # API Surface
//!
//! - [`formalism::builder::ProblemBuilder::build`] -- intern a problem into
//!   `Problem` + `PddlFactories`
//! - [`actions::generator::AagKind::build`] -- construct an applicable-action
//!   generator (lifted or grounded)
//! - [`state::successor::SuccessorStateGenerator::apply`] -- apply a ground
//!   action and intern the successor state
//! - [`proof::canon::canonical_json_bytes`] / [`proof::hash::canonical_hash`]
//!   -- the single canonicalizer and hasher for digests
//!
//! # Module Dependency Direction
//!
//! `formalism` ← `actions` ← `state`, with `proof` standalone.
//!
//! One-way only. `state` also uses `proof` for fingerprints; `formalism`
//! depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod actions;
pub mod formalism;
pub mod proof;
pub mod state;
