//! Harness runner: solves a fixture and packages the result as a report.
//!
//! The runner uses ONLY kernel and search APIs. It does not implement any
//! search or hashing logic itself.
//!
//! # Pipeline
//!
//! ```text
//! policy.validate() → fixture.build() → problem digest
//!   → AagKind::build() + SuccessorStateGenerator::new()
//!   → BreadthFirstSearch::find_solution()
//!   → replay plan on a fresh SSG → goal fingerprint
//!   → RunReportV1 (canonical JSON + digest)
//! ```

use std::fmt;

use groundwork_kernel::actions::generator::AagKind;
use groundwork_kernel::formalism::describe::Describer;
use groundwork_kernel::formalism::error::ModelError;
use groundwork_kernel::formalism::problem::Problem;
use groundwork_kernel::proof::canon::{canonical_json_bytes, canonical_json_hash, CanonError};
use groundwork_kernel::proof::hash::{canonical_hash, ContentHash};
use groundwork_kernel::proof::hash_domain::HashDomain;
use groundwork_kernel::state::successor::SuccessorStateGenerator;
use groundwork_search::algorithm::SearchAlgorithm;
use groundwork_search::brfs::BreadthFirstSearch;
use groundwork_search::error::SearchError;
use groundwork_search::event::EventHandlerKind;
use groundwork_search::plan::Plan;
use groundwork_search::policy::{ResourceLimitV1, SearchPolicyV1};
use groundwork_search::statistics::SearchStatistics;
use groundwork_search::status::SearchStatus;

use crate::contract::FixtureV1;

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// Fixture description is malformed.
    Model(ModelError),
    /// Search pre-flight failed.
    Search(SearchError),
    /// Canonical JSON serialization failed.
    Canon(CanonError),
    /// The returned plan does not replay to a goal state (search bug).
    PlanRejected { step: usize, detail: String },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model(e) => write!(f, "fixture model error: {e}"),
            Self::Search(e) => write!(f, "search error: {e}"),
            Self::Canon(e) => write!(f, "canonicalization error: {e}"),
            Self::PlanRejected { step, detail } => {
                write!(f, "plan rejected at step {step}: {detail}")
            }
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Model(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::Canon(e) => Some(e),
            Self::PlanRejected { .. } => None,
        }
    }
}

impl From<ModelError> for RunError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<CanonError> for RunError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

/// Which generator, observer, and bounds a run uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub aag: AagKind,
    pub handler: EventHandlerKind,
    pub policy: SearchPolicyV1,
}

/// The normative record of one run.
///
/// Everything except `statistics.elapsed` enters the digest; two runs of
/// the same fixture and config produce byte-identical canonical JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReportV1 {
    pub fixture_id: String,
    /// `ProblemIdentity` digest of the fixture's name-based identity.
    pub problem_digest: ContentHash,
    pub policy: SearchPolicyV1,
    pub policy_digest: ContentHash,
    pub generator: AagKind,
    pub status: SearchStatus,
    pub limit: Option<ResourceLimitV1>,
    pub plan: Plan,
    pub plan_digest: ContentHash,
    /// Fingerprint of the state the plan replays to (solved runs only).
    pub goal_fingerprint: Option<ContentHash>,
    pub statistics: SearchStatistics,
}

impl RunReportV1 {
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "schema_version": "run_report.v1",
            "fixture_id": self.fixture_id,
            "problem_digest": self.problem_digest.as_str(),
            "policy": self.policy.to_json(),
            "policy_digest": self.policy_digest.as_str(),
            "generator": self.generator.as_str(),
            "status": self.status.as_str(),
            "limit": self.limit.map(ResourceLimitV1::as_str),
            "plan": self.plan.to_json(),
            "plan_digest": self.plan_digest.as_str(),
            "goal_fingerprint": self.goal_fingerprint.as_ref().map(ContentHash::as_str),
            "statistics": self.statistics.to_json(),
        })
    }

    /// Canonical JSON bytes of [`to_json`](Self::to_json).
    ///
    /// # Errors
    ///
    /// [`CanonError`] if the JSON holds a non-integer number.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json())
    }

    /// `RunReport` digest of the canonical bytes.
    ///
    /// # Errors
    ///
    /// [`CanonError`] if the JSON holds a non-integer number.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(HashDomain::RunReport, &self.canonical_bytes()?))
    }
}

/// Solve `fixture` under `config` and verify the plan by replay.
///
/// Each call owns its generators, so runs are independent and may execute
/// on separate threads.
///
/// # Errors
///
/// [`RunError::Model`] / [`RunError::Search`] for pre-flight failures,
/// [`RunError::PlanRejected`] if a returned plan fails replay.
pub fn run(fixture: &dyn FixtureV1, config: &RunConfig) -> Result<RunReportV1, RunError> {
    config.policy.validate()?;
    let (problem, factories) = fixture.build()?;
    let problem_digest = canonical_json_hash(
        HashDomain::ProblemIdentity,
        &Describer::for_factories(&factories).problem_json(&problem),
    )?;

    let mut ssg = SuccessorStateGenerator::new(&problem);
    let mut aag = config.aag.build(&problem, &factories)?;
    let mut handler = config.handler.into_handler();
    let outcome = BreadthFirstSearch::new(&problem, &factories, &mut ssg, aag.as_mut(), handler.as_mut())?
        .with_policy(config.policy.clone())?
        .find_solution();

    let goal_fingerprint = if outcome.is_solved() {
        Some(replay(&problem, &outcome.plan)?)
    } else {
        None
    };

    tracing::info!(
        fixture = %fixture.fixture_id(),
        generator = %config.aag,
        status = %outcome.status,
        plan_length = outcome.plan.len(),
        "run finished"
    );

    Ok(RunReportV1 {
        fixture_id: fixture.fixture_id(),
        problem_digest,
        policy_digest: config.policy.digest()?,
        policy: config.policy.clone(),
        generator: config.aag,
        status: outcome.status,
        limit: outcome.limit,
        plan_digest: outcome.plan.digest()?,
        plan: outcome.plan,
        goal_fingerprint,
        statistics: outcome.statistics,
    })
}

/// Apply `plan` from the initial state on a fresh state generator.
///
/// # Errors
///
/// [`RunError::PlanRejected`] if a step is inapplicable or the final state
/// misses the goal.
pub fn replay(problem: &Problem, plan: &Plan) -> Result<ContentHash, RunError> {
    let mut ssg = SuccessorStateGenerator::new(problem);
    let mut state = ssg.initial_state();
    for (i, step) in plan.steps().iter().enumerate() {
        if !step.action.is_applicable(ssg.state(state)) {
            return Err(RunError::PlanRejected {
                step: i,
                detail: format!("{} is not applicable", step.to_pddl()),
            });
        }
        state = ssg.apply(state, &step.action);
    }
    if !ssg.is_goal(state, problem.goal()) {
        return Err(RunError::PlanRejected {
            step: plan.len(),
            detail: format!("final state with {} atoms misses the goal", ssg.state(state).len()),
        });
    }
    Ok(ssg.fingerprint(state))
}
