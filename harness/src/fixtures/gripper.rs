//! `Gripper`: one robot, two rooms, two hands, `balls` balls to carry from
//! `rooma` to `roomb`.
//!
//! The shortest plan carries two balls per trip. `gripper-2` needs exactly
//! 5 actions.

use groundwork_kernel::formalism::builder::{ProblemBuilder, SchemaBuilder};

use crate::contract::{Expectation, FixtureV1};

/// Gripper with `balls` balls, all starting in `rooma`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gripper {
    pub balls: usize,
}

impl Gripper {
    #[must_use]
    pub fn new(balls: usize) -> Self {
        Self { balls }
    }

    fn ball_names(self) -> Vec<String> {
        (1..=self.balls).map(|i| format!("ball{i}")).collect()
    }
}

/// Shortest plan length: per full trip pick 2, move, drop 2, then move back
/// unless it is the last trip.
fn optimal_length(balls: usize) -> usize {
    if balls == 0 {
        return 0;
    }
    let trips = balls.div_ceil(2);
    // picks + drops + forward moves + return moves
    2 * balls + trips + (trips - 1)
}

impl FixtureV1 for Gripper {
    fn fixture_id(&self) -> String {
        format!("gripper-{}", self.balls)
    }

    fn domain_name(&self) -> &'static str {
        "gripper"
    }

    fn describe(&self, b: &mut ProblemBuilder) {
        b.add_type("room", None)
            .add_type("ball", None)
            .add_type("gripper", None)
            .add_objects(&["rooma", "roomb"], "room")
            .add_objects(&["left", "right"], "gripper")
            .add_predicate("at-robby", &["room"])
            .add_predicate("at", &["ball", "room"])
            .add_predicate("free", &["gripper"])
            .add_predicate("carry", &["ball", "gripper"])
            .add_schema(
                SchemaBuilder::new("move")
                    .parameter("?from", "room")
                    .parameter("?to", "room")
                    .precondition("at-robby", &["?from"])
                    .add_effect("at-robby", &["?to"])
                    .delete_effect("at-robby", &["?from"]),
            )
            .add_schema(
                SchemaBuilder::new("pick")
                    .parameter("?obj", "ball")
                    .parameter("?room", "room")
                    .parameter("?gripper", "gripper")
                    .precondition("at", &["?obj", "?room"])
                    .precondition("at-robby", &["?room"])
                    .precondition("free", &["?gripper"])
                    .add_effect("carry", &["?obj", "?gripper"])
                    .delete_effect("at", &["?obj", "?room"])
                    .delete_effect("free", &["?gripper"]),
            )
            .add_schema(
                SchemaBuilder::new("drop")
                    .parameter("?obj", "ball")
                    .parameter("?room", "room")
                    .parameter("?gripper", "gripper")
                    .precondition("carry", &["?obj", "?gripper"])
                    .precondition("at-robby", &["?room"])
                    .add_effect("at", &["?obj", "?room"])
                    .add_effect("free", &["?gripper"])
                    .delete_effect("carry", &["?obj", "?gripper"]),
            )
            .add_initial("at-robby", &["rooma"])
            .add_initial("free", &["left"])
            .add_initial("free", &["right"]);

        for ball in self.ball_names() {
            b.add_object(&ball, "ball")
                .add_initial("at", &[ball.as_str(), "rooma"])
                .add_goal("at", &[ball.as_str(), "roomb"]);
        }
    }

    fn expectation(&self) -> Expectation {
        Expectation::PlanLength(optimal_length(self.balls))
    }
}
