//! `Plan`: the action sequence a solved search returns.

use groundwork_kernel::actions::ground::GroundAction;
use groundwork_kernel::formalism::describe::Describer;
use groundwork_kernel::formalism::problem::Problem;
use groundwork_kernel::proof::canon::{canonical_json_hash, CanonError};
use groundwork_kernel::proof::hash::ContentHash;
use groundwork_kernel::proof::hash_domain::HashDomain;

/// One step of a plan: the ground action plus its rendered name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    pub action: GroundAction,
    /// Schema name.
    pub name: String,
    /// Object names, in parameter order.
    pub arguments: Vec<String>,
}

impl PlanStep {
    /// `(pick ball1 rooma left)`
    #[must_use]
    pub fn to_pddl(&self) -> String {
        if self.arguments.is_empty() {
            format!("({})", self.name)
        } else {
            format!("({} {})", self.name, self.arguments.join(" "))
        }
    }
}

/// Ordered ground actions from the initial state to a goal state.
///
/// Empty for unsolved searches and for problems whose goal already holds
/// initially.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    steps: Vec<PlanStep>,
}

impl Plan {
    /// Build from actions in execution order.
    #[must_use]
    pub fn from_actions<'g>(
        actions: impl IntoIterator<Item = &'g GroundAction>,
        problem: &Problem,
        describer: &Describer<'_>,
    ) -> Self {
        let steps = actions
            .into_iter()
            .map(|action| PlanStep {
                name: action.name(problem).to_string(),
                arguments: describer.object_names(&action.binding),
                action: action.clone(),
            })
            .collect();
        Self { steps }
    }

    #[must_use]
    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of action costs.
    #[must_use]
    pub fn cost(&self) -> u64 {
        self.steps.iter().map(|s| s.action.cost).sum()
    }

    /// Plan file text: one action per line, then a cost comment.
    #[must_use]
    pub fn to_pddl(&self) -> String {
        let mut out = String::new();
        for step in &self.steps {
            out.push_str(&step.to_pddl());
            out.push('\n');
        }
        out.push_str(&format!("; cost = {} (unit cost)\n", self.cost()));
        out
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let steps: Vec<serde_json::Value> = self
            .steps
            .iter()
            .map(|s| serde_json::json!({ "name": s.name, "arguments": s.arguments }))
            .collect();
        serde_json::json!({
            "schema_version": "plan.v1",
            "length": self.len(),
            "cost": self.cost(),
            "steps": steps,
        })
    }

    /// Content hash of [`to_json`](Self::to_json).
    ///
    /// # Errors
    ///
    /// [`CanonError`] if the JSON holds a non-integer number.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        canonical_json_hash(HashDomain::Plan, &self.to_json())
    }
}
