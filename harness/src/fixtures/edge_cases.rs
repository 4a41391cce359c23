//! Small fixtures that pin one corner of the semantics each.

use groundwork_kernel::formalism::builder::{ProblemBuilder, RawLiteral, SchemaBuilder};

use crate::contract::{Expectation, FixtureV1};

/// Goal already holds in the initial state: solved with the empty plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrivialGoal;

impl FixtureV1 for TrivialGoal {
    fn fixture_id(&self) -> String {
        "trivial-goal".to_string()
    }

    fn domain_name(&self) -> &'static str {
        "lamps"
    }

    fn describe(&self, b: &mut ProblemBuilder) {
        b.add_objects(&["lamp"], "object")
            .add_predicate("lit", &["object"])
            .add_schema(
                SchemaBuilder::new("unlight")
                    .parameter("?l", "object")
                    .precondition("lit", &["?l"])
                    .delete_effect("lit", &["?l"]),
            )
            .add_initial("lit", &["lamp"])
            .add_goal("lit", &["lamp"]);
    }

    fn expectation(&self) -> Expectation {
        Expectation::PlanLength(0)
    }
}

/// No action schemas and an unmet goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoActions;

impl FixtureV1 for NoActions {
    fn fixture_id(&self) -> String {
        "no-actions".to_string()
    }

    fn domain_name(&self) -> &'static str {
        "lamps"
    }

    fn describe(&self, b: &mut ProblemBuilder) {
        b.add_objects(&["lamp"], "object")
            .add_predicate("lit", &["object"])
            .add_goal("lit", &["lamp"]);
    }

    fn expectation(&self) -> Expectation {
        Expectation::Unsolvable
    }
}

/// `paint ?b ?c` binds both parameters only through its effects, so the
/// generator has to range them over their declared types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FreeParameters;

impl FixtureV1 for FreeParameters {
    fn fixture_id(&self) -> String {
        "free-parameters".to_string()
    }

    fn domain_name(&self) -> &'static str {
        "paint"
    }

    fn describe(&self, b: &mut ProblemBuilder) {
        b.add_type("block", None)
            .add_type("color", None)
            .add_objects(&["b1", "b2"], "block")
            .add_objects(&["red", "blue"], "color")
            .add_predicate("painted", &["block"])
            .add_predicate("has-color", &["block", "color"])
            .add_schema(
                SchemaBuilder::new("paint")
                    .parameter("?b", "block")
                    .parameter("?c", "color")
                    .precondition_not("painted", &["?b"])
                    .add_effect("painted", &["?b"])
                    .add_effect("has-color", &["?b", "?c"]),
            )
            .add_goal("has-color", &["b1", "blue"])
            .add_goal("has-color", &["b2", "red"]);
    }

    fn expectation(&self) -> Expectation {
        Expectation::PlanLength(2)
    }
}

/// `refresh ?x` adds and deletes `(lit ?x)`; the add must win. Its
/// conditional effect reads `(ready ?x)` from the source state even though
/// the same action deletes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddWins;

impl FixtureV1 for AddWins {
    fn fixture_id(&self) -> String {
        "add-wins".to_string()
    }

    fn domain_name(&self) -> &'static str {
        "lamps"
    }

    fn describe(&self, b: &mut ProblemBuilder) {
        b.add_objects(&["lamp"], "object")
            .add_predicate("lit", &["object"])
            .add_predicate("ready", &["object"])
            .add_predicate("checked", &["object"])
            .add_schema(
                SchemaBuilder::new("refresh")
                    .parameter("?x", "object")
                    .precondition("ready", &["?x"])
                    .add_effect("lit", &["?x"])
                    .delete_effect("lit", &["?x"])
                    .delete_effect("ready", &["?x"])
                    .when(
                        vec![RawLiteral::pos("ready", &["?x"])],
                        RawLiteral::pos("checked", &["?x"]),
                    ),
            )
            .add_initial("ready", &["lamp"])
            .add_goal("lit", &["lamp"])
            .add_goal("checked", &["lamp"])
            .add_goal_negated("ready", &["lamp"]);
    }

    fn expectation(&self) -> Expectation {
        Expectation::PlanLength(1)
    }
}

/// `move` between two linked places, in both directions. `parked` is never
/// added, so the whole two-state space is explored without reaching the goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shuttle;

impl FixtureV1 for Shuttle {
    fn fixture_id(&self) -> String {
        "shuttle".to_string()
    }

    fn domain_name(&self) -> &'static str {
        "shuttle"
    }

    fn describe(&self, b: &mut ProblemBuilder) {
        b.add_objects(&["a", "b"], "object")
            .add_predicate("at", &["object"])
            .add_predicate("link", &["object", "object"])
            .add_predicate("parked", &["object"])
            .add_schema(
                SchemaBuilder::new("move")
                    .parameter("?from", "object")
                    .parameter("?to", "object")
                    .precondition("at", &["?from"])
                    .precondition("link", &["?from", "?to"])
                    .add_effect("at", &["?to"])
                    .delete_effect("at", &["?from"]),
            )
            .add_initial("at", &["a"])
            .add_initial("link", &["a", "b"])
            .add_initial("link", &["b", "a"])
            .add_goal("parked", &["b"]);
    }

    fn expectation(&self) -> Expectation {
        Expectation::Unsolvable
    }
}

/// A single `go` from `a` to `b` reaches the goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneStep;

impl FixtureV1 for OneStep {
    fn fixture_id(&self) -> String {
        "one-step".to_string()
    }

    fn domain_name(&self) -> &'static str {
        "shuttle"
    }

    fn describe(&self, b: &mut ProblemBuilder) {
        b.add_objects(&["a", "b"], "object")
            .add_predicate("at", &["object"])
            .add_predicate("link", &["object", "object"])
            .add_schema(
                SchemaBuilder::new("go")
                    .parameter("?from", "object")
                    .parameter("?to", "object")
                    .precondition("at", &["?from"])
                    .precondition("link", &["?from", "?to"])
                    .add_effect("at", &["?to"])
                    .delete_effect("at", &["?from"]),
            )
            .add_initial("at", &["a"])
            .add_initial("link", &["a", "b"])
            .add_goal("at", &["b"]);
    }

    fn expectation(&self) -> Expectation {
        Expectation::PlanLength(1)
    }
}
