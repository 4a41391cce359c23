//! The search algorithm contract and its result type.

use crate::plan::Plan;
use crate::policy::ResourceLimitV1;
use crate::statistics::SearchStatistics;
use crate::status::SearchStatus;

/// Result of [`SearchAlgorithm::find_solution`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    /// Non-empty only when `status` is `Solved` and the goal needed actions.
    pub plan: Plan,
    /// Which bound stopped the search, for `OutOfResources`.
    pub limit: Option<ResourceLimitV1>,
    pub statistics: SearchStatistics,
}

impl SearchOutcome {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.status == SearchStatus::Solved
    }

    /// `(status, plan)`
    #[must_use]
    pub fn into_parts(self) -> (SearchStatus, Plan) {
        (self.status, self.plan)
    }
}

/// A complete search over a problem's state space.
pub trait SearchAlgorithm {
    /// Run to a terminal status.
    fn find_solution(&mut self) -> SearchOutcome;
}
