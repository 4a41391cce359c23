//! `Switches`: `count` independent switches, all off, goal all on.
//!
//! `turn-on` requires the switch to be off (a negative precondition), so the
//! fixture exercises negative literals in the generators. The state space is
//! every subset of switches; the shortest plan turns each on once.

use groundwork_kernel::formalism::builder::{ProblemBuilder, SchemaBuilder};

use crate::contract::{Expectation, FixtureV1};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switches {
    pub count: usize,
}

impl Switches {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl FixtureV1 for Switches {
    fn fixture_id(&self) -> String {
        format!("switches-{}", self.count)
    }

    fn domain_name(&self) -> &'static str {
        "switches"
    }

    fn describe(&self, b: &mut ProblemBuilder) {
        b.add_type("switch", None)
            .add_predicate("on", &["switch"])
            .add_schema(
                SchemaBuilder::new("turn-on")
                    .parameter("?s", "switch")
                    .precondition_not("on", &["?s"])
                    .add_effect("on", &["?s"]),
            )
            .add_schema(
                SchemaBuilder::new("turn-off")
                    .parameter("?s", "switch")
                    .precondition("on", &["?s"])
                    .delete_effect("on", &["?s"]),
            );
        for i in 1..=self.count {
            let name = format!("s{i}");
            b.add_object(&name, "switch").add_goal("on", &[name.as_str()]);
        }
    }

    fn expectation(&self) -> Expectation {
        Expectation::PlanLength(self.count)
    }
}
