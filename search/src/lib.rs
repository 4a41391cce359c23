//! Groundwork search: a generic expansion loop, breadth-first search, and
//! search observers.
//!
//! This crate depends only on `groundwork_kernel`. It does NOT depend on
//! `groundwork_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! groundwork_kernel  ←  groundwork_search  ←  groundwork_harness
//! (model, AAG, SSG)     (frontier, BFS)       (fixtures, runner)
//! ```
//!
//! # Key types
//!
//! - [`brfs::BreadthFirstSearch`] -- BFS over borrowed kernel components
//! - [`algorithm::SearchAlgorithm`] -- `find_solution` contract
//! - [`algorithm::SearchOutcome`] -- status, plan, and statistics
//! - [`event::SearchEventHandler`] -- read-only observer of the loop
//! - [`policy::SearchPolicyV1`] -- optional bounds and dedup configuration
//! - [`frontier::Frontier`] -- open-list discipline consumed by
//!   [`search::graph_search`]

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod algorithm;
pub mod brfs;
pub mod error;
pub mod event;
pub mod frontier;
pub mod node;
pub mod plan;
pub mod policy;
pub mod search;
pub mod statistics;
pub mod status;
