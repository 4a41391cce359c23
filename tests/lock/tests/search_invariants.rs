//! Search loop locks.
//!
//! - DETERMINISM-INPROC: N>=10 runs yield byte-identical reports.
//! - IDEMPOTENT-EXPANSION: no state is expanded twice.
//! - OBSERVER-PASSIVE: handlers see every event and never change results.
//! - RESOURCE-BOUNDS: each bound yields `OutOfResources` naming that bound.

use std::collections::BTreeSet;

use groundwork_harness::contract::FixtureV1;
use groundwork_harness::fixtures::edge_cases::{NoActions, OneStep, Shuttle};
use groundwork_harness::fixtures::gripper::Gripper;
use groundwork_harness::fixtures::suite;
use groundwork_harness::runner::{run, RunConfig};
use groundwork_kernel::actions::generator::AagKind;
use groundwork_kernel::formalism::ids::{GroundActionId, StateId};
use groundwork_kernel::state::successor::SuccessorStateGenerator;
use groundwork_search::algorithm::{SearchAlgorithm, SearchOutcome};
use groundwork_search::brfs::BreadthFirstSearch;
use groundwork_search::event::{DebugEventHandler, EventContext, SearchEventHandler};
use groundwork_search::policy::{DedupPolicyV1, ResourceLimitV1, SearchPolicyV1};
use groundwork_search::statistics::SearchStatistics;
use groundwork_search::status::SearchStatus;

#[derive(Default)]
struct Recorder {
    started: usize,
    expanded: Vec<StateId>,
    generated: u64,
    new_states: u64,
    layers: Vec<u32>,
    goals: Vec<u32>,
    ended: Vec<SearchStatus>,
    rendered_actions: BTreeSet<String>,
}

impl SearchEventHandler for Recorder {
    fn on_start_search(&mut self, _ctx: &EventContext<'_>, _initial: StateId) {
        self.started += 1;
    }

    fn on_generate_node(
        &mut self,
        ctx: &EventContext<'_>,
        _parent: StateId,
        action: GroundActionId,
        _successor: StateId,
        new_state: bool,
    ) {
        self.generated += 1;
        if new_state {
            self.new_states += 1;
        }
        self.rendered_actions.insert(ctx.render_action(action));
    }

    fn on_expand_node(&mut self, _ctx: &EventContext<'_>, state: StateId, _depth: u32) {
        self.expanded.push(state);
    }

    fn on_finish_layer(&mut self, depth: u32, _statistics: &SearchStatistics) {
        self.layers.push(depth);
    }

    fn on_goal_found(&mut self, _ctx: &EventContext<'_>, _state: StateId, depth: u32) {
        self.goals.push(depth);
    }

    fn on_search_end(&mut self, status: SearchStatus, _statistics: &SearchStatistics) {
        self.ended.push(status);
    }
}

fn solve_with(
    fixture: &dyn FixtureV1,
    aag: AagKind,
    policy: SearchPolicyV1,
    handler: &mut dyn SearchEventHandler,
) -> SearchOutcome {
    let (problem, factories) = fixture.build().unwrap();
    let mut ssg = SuccessorStateGenerator::new(&problem);
    let mut generator = aag.build(&problem, &factories).unwrap();
    BreadthFirstSearch::new(&problem, &factories, &mut ssg, generator.as_mut(), handler)
        .unwrap()
        .with_policy(policy)
        .unwrap()
        .find_solution()
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

/// ACCEPTANCE: DETERMINISM-INPROC
#[test]
fn determinism_inproc_n10() {
    for aag in [AagKind::Lifted, AagKind::Grounded] {
        let config = RunConfig {
            aag,
            ..RunConfig::default()
        };
        let first = run(&Gripper::new(3), &config).unwrap();
        let first_bytes = first.canonical_bytes().unwrap();
        for i in 1..=10 {
            let again = run(&Gripper::new(3), &config).unwrap();
            assert_eq!(again.plan, first.plan, "run {i} ({aag}) changed the plan");
            assert_eq!(
                again.canonical_bytes().unwrap(),
                first_bytes,
                "run {i} ({aag}) changed the report"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Expansion and observers
// ---------------------------------------------------------------------------

/// ACCEPTANCE: IDEMPOTENT-EXPANSION
#[test]
fn no_state_expanded_twice() {
    for fixture in suite() {
        for dedup in [DedupPolicyV1::Seen, DedupPolicyV1::ClosedOnly] {
            let mut recorder = Recorder::default();
            let policy = SearchPolicyV1 {
                dedup,
                ..SearchPolicyV1::default()
            };
            let outcome = solve_with(fixture.as_ref(), AagKind::Lifted, policy, &mut recorder);

            let distinct: BTreeSet<StateId> = recorder.expanded.iter().copied().collect();
            assert_eq!(
                distinct.len(),
                recorder.expanded.len(),
                "{} ({}) expanded a state twice",
                fixture.fixture_id(),
                dedup.as_str()
            );
            assert_eq!(outcome.statistics.expanded, recorder.expanded.len() as u64);
        }
    }
}

/// ACCEPTANCE: OBSERVER-PASSIVE
#[test]
fn observer_sees_every_event() {
    let mut recorder = Recorder::default();
    let outcome = solve_with(
        &Gripper::new(2),
        AagKind::Lifted,
        SearchPolicyV1::default(),
        &mut recorder,
    );

    assert_eq!(recorder.started, 1);
    assert_eq!(recorder.ended, vec![SearchStatus::Solved]);
    assert_eq!(recorder.goals, vec![5]);
    assert_eq!(recorder.generated, outcome.statistics.generated);
    // Every registered state except the initial one was new when generated.
    assert_eq!(recorder.new_states + 1, outcome.statistics.states);
    assert_eq!(recorder.layers, vec![0, 1, 2, 3, 4]);
    assert_eq!(outcome.statistics.layers.len(), 5);
    assert!(recorder.rendered_actions.contains("(pick ball1 rooma left)"));
}

#[test]
fn handler_choice_does_not_change_outcome() {
    let mut recorder = Recorder::default();
    let mut debug = DebugEventHandler;
    let a = solve_with(&Gripper::new(3), AagKind::Lifted, SearchPolicyV1::default(), &mut recorder);
    let b = solve_with(&Gripper::new(3), AagKind::Lifted, SearchPolicyV1::default(), &mut debug);
    assert_eq!(a.plan, b.plan);
    assert_eq!(a.statistics.to_json(), b.statistics.to_json());
}

// ---------------------------------------------------------------------------
// Resource bounds
// ---------------------------------------------------------------------------

fn bounded(policy: SearchPolicyV1) -> SearchOutcome {
    let mut recorder = Recorder::default();
    let outcome = solve_with(&Gripper::new(3), AagKind::Lifted, policy, &mut recorder);
    assert_eq!(recorder.ended, vec![outcome.status]);
    outcome
}

/// ACCEPTANCE: RESOURCE-BOUNDS
#[test]
fn depth_bound_is_out_of_resources() {
    let outcome = bounded(SearchPolicyV1 {
        max_depth: Some(2),
        ..SearchPolicyV1::default()
    });
    assert_eq!(outcome.status, SearchStatus::OutOfResources);
    assert_eq!(outcome.limit, Some(ResourceLimitV1::Depth));
    assert!(outcome.plan.is_empty());
}

/// ACCEPTANCE: RESOURCE-BOUNDS
#[test]
fn expansion_bound_is_out_of_resources() {
    let outcome = bounded(SearchPolicyV1 {
        max_expansions: Some(3),
        ..SearchPolicyV1::default()
    });
    assert_eq!(outcome.status, SearchStatus::OutOfResources);
    assert_eq!(outcome.limit, Some(ResourceLimitV1::Expansions));
    assert_eq!(outcome.statistics.expanded, 3);
}

/// ACCEPTANCE: RESOURCE-BOUNDS
#[test]
fn generated_bound_is_out_of_resources() {
    let outcome = bounded(SearchPolicyV1 {
        max_generated: Some(5),
        ..SearchPolicyV1::default()
    });
    assert_eq!(outcome.status, SearchStatus::OutOfResources);
    assert_eq!(outcome.limit, Some(ResourceLimitV1::Generated));
    assert_eq!(outcome.statistics.generated, 5);
}

#[test]
fn bound_wide_enough_still_solves() {
    let outcome = bounded(SearchPolicyV1 {
        max_depth: Some(9),
        max_expansions: Some(1_000_000),
        ..SearchPolicyV1::default()
    });
    assert_eq!(outcome.status, SearchStatus::Solved);
    assert_eq!(outcome.plan.len(), 9);
}

#[test]
fn depth_bound_on_exhaustible_space_is_not_a_cut() {
    // The only state has no applicable actions, so the bound never cuts.
    let mut recorder = Recorder::default();
    let outcome = solve_with(
        &NoActions,
        AagKind::Lifted,
        SearchPolicyV1 {
            max_depth: Some(0),
            ..SearchPolicyV1::default()
        },
        &mut recorder,
    );
    assert_eq!(outcome.status, SearchStatus::Exhausted);
    assert_eq!(outcome.limit, None);
}

fn solve_both_dedups(fixture: &dyn FixtureV1, policy: &SearchPolicyV1) -> Vec<SearchOutcome> {
    [DedupPolicyV1::Seen, DedupPolicyV1::ClosedOnly]
        .into_iter()
        .map(|dedup| {
            let mut recorder = Recorder::default();
            let policy = SearchPolicyV1 {
                dedup,
                ..policy.clone()
            };
            solve_with(fixture, AagKind::Lifted, policy, &mut recorder)
        })
        .collect()
}

/// ACCEPTANCE: RESOURCE-BOUNDS
#[test]
fn space_ending_at_depth_bound_is_exhausted() {
    // a <-> b: the node at depth 1 only leads back to the closed root.
    for max_depth in [Some(1), Some(5), None] {
        let policy = SearchPolicyV1 {
            max_depth,
            ..SearchPolicyV1::default()
        };
        for outcome in solve_both_dedups(&Shuttle, &policy) {
            assert_eq!(outcome.status, SearchStatus::Exhausted, "max_depth {max_depth:?}");
            assert_eq!(outcome.limit, None);
            assert_eq!(outcome.statistics.states, 2);
            assert_eq!(outcome.statistics.expanded, 2);
        }
    }
}

/// ACCEPTANCE: RESOURCE-BOUNDS
#[test]
fn depth_bound_short_of_space_is_a_cut() {
    let policy = SearchPolicyV1 {
        max_depth: Some(0),
        ..SearchPolicyV1::default()
    };
    for outcome in solve_both_dedups(&Shuttle, &policy) {
        assert_eq!(outcome.status, SearchStatus::OutOfResources);
        assert_eq!(outcome.limit, Some(ResourceLimitV1::Depth));
        // Looking past the bound registers no state.
        assert_eq!(outcome.statistics.states, 1);
    }
}

/// ACCEPTANCE: RESOURCE-BOUNDS
#[test]
fn goal_on_frontier_when_expansions_run_out_is_solved() {
    let policy = SearchPolicyV1 {
        max_expansions: Some(1),
        ..SearchPolicyV1::default()
    };
    for outcome in solve_both_dedups(&OneStep, &policy) {
        assert_eq!(outcome.status, SearchStatus::Solved);
        assert_eq!(outcome.plan.len(), 1);
        assert_eq!(outcome.statistics.expanded, 1);
    }
}

/// ACCEPTANCE: RESOURCE-BOUNDS
#[test]
fn goal_on_frontier_when_generation_runs_out_is_solved() {
    let policy = SearchPolicyV1 {
        max_generated: Some(1),
        ..SearchPolicyV1::default()
    };
    for outcome in solve_both_dedups(&OneStep, &policy) {
        assert_eq!(outcome.status, SearchStatus::Solved);
        assert_eq!(outcome.plan.len(), 1);
        assert_eq!(outcome.statistics.generated, 1);
    }
}

#[test]
fn expansion_budget_stops_before_the_next_expansion() {
    // Shuttle needs two expansions to exhaust; one is not enough.
    let policy = SearchPolicyV1 {
        max_expansions: Some(1),
        ..SearchPolicyV1::default()
    };
    for outcome in solve_both_dedups(&Shuttle, &policy) {
        assert_eq!(outcome.status, SearchStatus::OutOfResources);
        assert_eq!(outcome.limit, Some(ResourceLimitV1::Expansions));
        assert_eq!(outcome.statistics.expanded, 1);
    }
}
