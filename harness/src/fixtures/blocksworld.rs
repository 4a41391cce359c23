//! `Blocksworld`: four-operator blocks world with a single hand.
//!
//! All blocks start on the table; the goal is the tower `b1` on `b2` on ...
//! on `bn`. Building it takes one pick-up and one stack per block above
//! the bottom one.

use groundwork_kernel::formalism::builder::{ProblemBuilder, SchemaBuilder};

use crate::contract::{Expectation, FixtureV1};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blocksworld {
    pub blocks: usize,
}

impl Blocksworld {
    #[must_use]
    pub fn new(blocks: usize) -> Self {
        Self { blocks }
    }
}

impl FixtureV1 for Blocksworld {
    fn fixture_id(&self) -> String {
        format!("blocksworld-{}", self.blocks)
    }

    fn domain_name(&self) -> &'static str {
        "blocksworld"
    }

    fn describe(&self, b: &mut ProblemBuilder) {
        b.add_type("block", None)
            .add_predicate("on", &["block", "block"])
            .add_predicate("ontable", &["block"])
            .add_predicate("clear", &["block"])
            .add_predicate("holding", &["block"])
            .add_predicate("handempty", &[])
            .add_schema(
                SchemaBuilder::new("pick-up")
                    .parameter("?x", "block")
                    .precondition("clear", &["?x"])
                    .precondition("ontable", &["?x"])
                    .precondition("handempty", &[])
                    .add_effect("holding", &["?x"])
                    .delete_effect("ontable", &["?x"])
                    .delete_effect("clear", &["?x"])
                    .delete_effect("handempty", &[]),
            )
            .add_schema(
                SchemaBuilder::new("put-down")
                    .parameter("?x", "block")
                    .precondition("holding", &["?x"])
                    .add_effect("ontable", &["?x"])
                    .add_effect("clear", &["?x"])
                    .add_effect("handempty", &[])
                    .delete_effect("holding", &["?x"]),
            )
            .add_schema(
                SchemaBuilder::new("stack")
                    .parameter("?x", "block")
                    .parameter("?y", "block")
                    .precondition("holding", &["?x"])
                    .precondition("clear", &["?y"])
                    .add_effect("on", &["?x", "?y"])
                    .add_effect("clear", &["?x"])
                    .add_effect("handempty", &[])
                    .delete_effect("holding", &["?x"])
                    .delete_effect("clear", &["?y"]),
            )
            .add_schema(
                SchemaBuilder::new("unstack")
                    .parameter("?x", "block")
                    .parameter("?y", "block")
                    .precondition("on", &["?x", "?y"])
                    .precondition("clear", &["?x"])
                    .precondition("handempty", &[])
                    .add_effect("holding", &["?x"])
                    .add_effect("clear", &["?y"])
                    .delete_effect("on", &["?x", "?y"])
                    .delete_effect("clear", &["?x"])
                    .delete_effect("handempty", &[]),
            )
            .add_initial("handempty", &[]);

        let names: Vec<String> = (1..=self.blocks).map(|i| format!("b{i}")).collect();
        for name in &names {
            b.add_object(name, "block")
                .add_initial("ontable", &[name.as_str()])
                .add_initial("clear", &[name.as_str()]);
        }
        for pair in names.windows(2) {
            b.add_goal("on", &[pair[0].as_str(), pair[1].as_str()]);
        }
    }

    fn expectation(&self) -> Expectation {
        Expectation::PlanLength(2 * self.blocks.saturating_sub(1))
    }
}
