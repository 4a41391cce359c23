//! Groundwork harness: named planning fixtures and a runner.
//!
//! The runner solves a fixture with breadth-first search, replays the plan
//! on a fresh state generator, and packages the result as a canonical
//! [`runner::RunReportV1`].
//!
//! The harness does NOT implement search or hashing; it delegates to the
//! kernel and search crates. Fixtures provide problem descriptions only.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod fixtures;
pub mod runner;
