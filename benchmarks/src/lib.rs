//! Shared helpers for groundwork benchmark suites.

use groundwork_harness::contract::FixtureV1;
use groundwork_kernel::actions::generator::AagKind;
use groundwork_kernel::formalism::factories::PddlFactories;
use groundwork_kernel::formalism::problem::Problem;
use groundwork_kernel::proof::canon::canonical_json_hash;
use groundwork_kernel::proof::hash::ContentHash;
use groundwork_kernel::proof::hash_domain::HashDomain;
use groundwork_kernel::state::successor::SuccessorStateGenerator;
use groundwork_search::algorithm::{SearchAlgorithm, SearchOutcome};
use groundwork_search::brfs::BreadthFirstSearch;
use groundwork_search::event::SearchEventHandler;
use groundwork_search::policy::SearchPolicyV1;

/// A fixture interned once, so timed loops measure only search.
pub struct PreparedFixture {
    pub id: String,
    pub problem: Problem,
    pub factories: PddlFactories,
}

/// Build a fixture's problem outside the timed region.
///
/// # Panics
///
/// Panics if the fixture is malformed. Benchmark setup failures are fatal.
#[must_use]
pub fn prepare(fixture: &dyn FixtureV1) -> PreparedFixture {
    let (problem, factories) = fixture.build().expect("fixture builds");
    PreparedFixture {
        id: fixture.fixture_id(),
        problem,
        factories,
    }
}

/// Observer that ignores every event.
struct Silent;

impl SearchEventHandler for Silent {}

/// BFS with fresh generators and no observer output.
///
/// # Panics
///
/// Panics if the generator or the search cannot be constructed.
#[must_use]
pub fn solve_only(prepared: &PreparedFixture, aag: AagKind, policy: &SearchPolicyV1) -> SearchOutcome {
    let mut ssg = SuccessorStateGenerator::new(&prepared.problem);
    let mut generator = aag
        .build(&prepared.problem, &prepared.factories)
        .expect("generator builds");
    let mut handler = Silent;
    BreadthFirstSearch::new(
        &prepared.problem,
        &prepared.factories,
        &mut ssg,
        generator.as_mut(),
        &mut handler,
    )
    .expect("search wiring")
    .with_policy(policy.clone())
    .expect("valid policy")
    .find_solution()
}

/// Digest over the deterministic parts of a set of outcomes.
///
/// Timed loops compare this before and after measurement; a change means
/// the benchmark stopped measuring the same work.
///
/// # Panics
///
/// Panics if a plan fails to canonicalize.
#[must_use]
pub fn guard_digest<'o>(outcomes: impl IntoIterator<Item = &'o SearchOutcome>) -> ContentHash {
    let entries: Vec<serde_json::Value> = outcomes
        .into_iter()
        .map(|o| {
            serde_json::json!({
                "status": o.status.as_str(),
                "plan": o.plan.to_json(),
                "statistics": o.statistics.to_json(),
            })
        })
        .collect();
    canonical_json_hash(HashDomain::BenchGuard, &serde_json::Value::Array(entries))
        .expect("bench guard canonicalizes")
}
