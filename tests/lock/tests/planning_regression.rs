//! Planning regression locks over the fixture suite.
//!
//! - GRIPPER-5: gripper with two balls solves in exactly five actions.
//! - SUITE-EXPECTATION: every fixture meets its declared expectation under
//!   both generators.
//! - BFS-MINIMALITY: plan length equals the shallowest goal layer of an
//!   independent exhaustive enumeration.
//! - SOUNDNESS: every returned plan replays to a goal state.

use groundwork_harness::contract::{Expectation, FixtureV1};
use groundwork_harness::fixtures::edge_cases::{AddWins, FreeParameters, NoActions, TrivialGoal};
use groundwork_harness::fixtures::gripper::Gripper;
use groundwork_harness::fixtures::suite;
use groundwork_harness::runner::{replay, run, RunConfig};
use groundwork_kernel::actions::generator::AagKind;
use groundwork_search::status::SearchStatus;
use lock_tests::oracle::explore;

const GENERATORS: [AagKind; 2] = [AagKind::Lifted, AagKind::Grounded];

fn config(aag: AagKind) -> RunConfig {
    RunConfig {
        aag,
        ..RunConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Named regressions
// ---------------------------------------------------------------------------

/// ACCEPTANCE: GRIPPER-5
#[test]
fn gripper_two_balls_five_actions() {
    for aag in GENERATORS {
        let report = run(&Gripper::new(2), &config(aag)).unwrap();
        assert_eq!(report.status, SearchStatus::Solved, "{aag}");
        assert_eq!(report.plan.len(), 5, "{aag}: {}", report.plan.to_pddl());
        assert_eq!(report.plan.cost(), 5);

        let names: Vec<&str> = report.plan.steps().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.iter().filter(|n| **n == "pick").count(), 2);
        assert_eq!(names.iter().filter(|n| **n == "drop").count(), 2);
        assert_eq!(names.iter().filter(|n| **n == "move").count(), 1);
    }
}

#[test]
fn goal_true_initially_yields_empty_plan() {
    let report = run(&TrivialGoal, &RunConfig::default()).unwrap();
    assert_eq!(report.status, SearchStatus::Solved);
    assert!(report.plan.is_empty());
    assert_eq!(report.plan.to_pddl(), "; cost = 0 (unit cost)\n");
    assert_eq!(report.statistics.expanded, 0);
}

#[test]
fn no_schemas_and_unmet_goal_is_exhausted() {
    for aag in GENERATORS {
        let report = run(&NoActions, &config(aag)).unwrap();
        assert_eq!(report.status, SearchStatus::Exhausted);
        assert!(report.plan.is_empty());
        assert_eq!(report.limit, None);
        assert_eq!(report.statistics.generated, 0);
    }
}

#[test]
fn add_wins_over_delete_of_same_atom() {
    for aag in GENERATORS {
        let report = run(&AddWins, &config(aag)).unwrap();
        assert_eq!(report.status, SearchStatus::Solved);
        assert_eq!(report.plan.steps()[0].to_pddl(), "(refresh lamp)");
    }
}

#[test]
fn free_parameters_range_over_their_type() {
    let report = run(&FreeParameters, &RunConfig::default()).unwrap();
    let mut steps: Vec<String> = report.plan.steps().iter().map(|s| s.to_pddl()).collect();
    steps.sort();
    assert_eq!(steps, vec!["(paint b1 blue)", "(paint b2 red)"]);
}

// ---------------------------------------------------------------------------
// Suite-wide properties
// ---------------------------------------------------------------------------

/// ACCEPTANCE: SUITE-EXPECTATION
#[test]
fn every_fixture_meets_its_expectation() {
    for fixture in suite() {
        for aag in GENERATORS {
            let report = run(fixture.as_ref(), &config(aag)).unwrap();
            let id = fixture.fixture_id();
            match fixture.expectation() {
                Expectation::PlanLength(n) => {
                    assert_eq!(report.status, SearchStatus::Solved, "{id} ({aag})");
                    assert_eq!(report.plan.len(), n, "{id} ({aag}): {}", report.plan.to_pddl());
                }
                Expectation::Unsolvable => {
                    assert_eq!(report.status, SearchStatus::Exhausted, "{id} ({aag})");
                }
            }
        }
    }
}

/// ACCEPTANCE: BFS-MINIMALITY
#[test]
fn plan_length_equals_shallowest_goal_layer() {
    for fixture in suite() {
        let (problem, factories) = fixture.build().unwrap();
        let exploration = explore(&problem, &factories, AagKind::Lifted, usize::MAX);
        let report = run(fixture.as_ref(), &RunConfig::default()).unwrap();
        let id = fixture.fixture_id();

        match exploration.goal_depth {
            Some(depth) => {
                assert_eq!(report.status, SearchStatus::Solved, "{id}");
                assert_eq!(report.plan.len(), depth, "{id}");
            }
            None => assert_eq!(report.status, SearchStatus::Exhausted, "{id}"),
        }
        // With unbounded search every reachable state is registered.
        if report.status == SearchStatus::Exhausted {
            let reachable: usize = exploration.layers.iter().map(Vec::len).sum();
            assert_eq!(report.statistics.states, reachable as u64, "{id}");
        }
    }
}

/// ACCEPTANCE: SOUNDNESS
#[test]
fn returned_plans_replay_to_goal() {
    for fixture in suite() {
        let (problem, _) = fixture.build().unwrap();
        for aag in GENERATORS {
            let report = run(fixture.as_ref(), &config(aag)).unwrap();
            if report.status == SearchStatus::Solved {
                let fingerprint = replay(&problem, &report.plan).unwrap();
                assert_eq!(Some(fingerprint), report.goal_fingerprint);
            }
        }
    }
}

#[test]
fn generators_agree_on_status_and_length() {
    for fixture in suite() {
        let lifted = run(fixture.as_ref(), &config(AagKind::Lifted)).unwrap();
        let grounded = run(fixture.as_ref(), &config(AagKind::Grounded)).unwrap();
        assert_eq!(lifted.status, grounded.status, "{}", fixture.fixture_id());
        assert_eq!(lifted.plan.len(), grounded.plan.len(), "{}", fixture.fixture_id());
        assert_eq!(lifted.problem_digest, grounded.problem_digest);
    }
}
