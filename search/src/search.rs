//! The generic expansion loop.
//!
//! [`graph_search`] runs the same loop for any [`Frontier`]; the frontier's
//! discipline decides the algorithm. Per iteration:
//!
//! 1. empty frontier: `Exhausted`, or `OutOfResources` if the depth bound
//!    cut off a state never reached otherwise;
//! 2. time bound reached: `OutOfResources`;
//! 3. pop a node; skip it if its state is closed;
//! 4. goal state: `Solved`, plan from the node's parent chain;
//! 5. expansion budget spent: `OutOfResources`;
//! 6. close the state and enumerate applicable actions (at the depth bound,
//!    only look for unseen successors); push each successor the dedup
//!    policy keeps, stopping if the generation budget is spent.

use std::time::Instant;

use groundwork_kernel::actions::generator::ApplicableActionGenerator;
use groundwork_kernel::formalism::describe::Describer;
use groundwork_kernel::formalism::factories::PddlFactories;
use groundwork_kernel::formalism::ids::{GroundActionId, StateId};
use groundwork_kernel::formalism::problem::Problem;
use groundwork_kernel::state::successor::{successor_atoms, SuccessorStateGenerator};

use crate::algorithm::SearchOutcome;
use crate::event::{EventContext, SearchEventHandler};
use crate::frontier::Frontier;
use crate::node::{NodeArena, NodeId};
use crate::plan::Plan;
use crate::policy::{DedupPolicyV1, ResourceLimitV1, SearchPolicyV1};
use crate::statistics::{LayerStatistics, SearchStatistics};
use crate::status::SearchStatus;

/// Set of state ids, dense by index.
#[derive(Debug, Default)]
struct StateSet {
    members: Vec<bool>,
}

impl StateSet {
    fn contains(&self, state: StateId) -> bool {
        self.members.get(state.index()).copied().unwrap_or(false)
    }

    /// `true` if `state` was not yet a member.
    fn insert(&mut self, state: StateId) -> bool {
        let i = state.index();
        if i >= self.members.len() {
            self.members.resize(i + 1, false);
        }
        !std::mem::replace(&mut self.members[i], true)
    }
}

fn context<'c>(
    problem: &'c Problem,
    factories: &'c PddlFactories,
    ssg: &'c SuccessorStateGenerator,
    aag: &'c dyn ApplicableActionGenerator,
) -> EventContext<'c> {
    EventContext {
        problem,
        factories,
        ssg,
        aag,
    }
}

fn count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

/// Whether some action applicable in `state` leads to a state the search
/// has not reached yet. Successors are looked up, never registered.
fn reaches_unseen(
    ssg: &SuccessorStateGenerator,
    aag: &mut dyn ApplicableActionGenerator,
    state: StateId,
    seen: &StateSet,
    applicable: &mut Vec<GroundActionId>,
) -> bool {
    let atoms = ssg.state(state);
    aag.generate_applicable_actions(atoms, applicable);
    applicable.iter().any(|&action| {
        let next = successor_atoms(atoms, aag.action(action));
        !ssg.registry().find(&next).is_some_and(|id| seen.contains(id))
    })
}

/// Run the expansion loop from the state generator's initial state.
///
/// The caller has validated `policy` and checked that `ssg` and `aag` belong
/// to `problem`.
#[allow(clippy::too_many_lines)]
pub fn graph_search<F: Frontier>(
    problem: &Problem,
    factories: &PddlFactories,
    ssg: &mut SuccessorStateGenerator,
    aag: &mut dyn ApplicableActionGenerator,
    handler: &mut dyn SearchEventHandler,
    policy: &SearchPolicyV1,
    mut frontier: F,
) -> SearchOutcome {
    let start = Instant::now();
    let goal = problem.goal();
    let mut stats = SearchStatistics::default();
    let mut arena = NodeArena::new();
    let mut closed = StateSet::default();
    let mut seen = StateSet::default();
    let mut applicable = Vec::new();
    let mut depth_cut = false;
    let mut layer = 0u32;

    let initial = ssg.initial_state();
    frontier.push(arena.push_root(initial));
    seen.insert(initial);
    handler.on_start_search(&context(problem, factories, ssg, aag), initial);

    let (status, limit, goal_node): (SearchStatus, Option<ResourceLimitV1>, Option<NodeId>) = 'search: loop {
        if frontier.is_empty() {
            break if depth_cut {
                (SearchStatus::OutOfResources, Some(ResourceLimitV1::Depth), None)
            } else {
                (SearchStatus::Exhausted, None, None)
            };
        }
        if policy.max_time.is_some_and(|t| start.elapsed() >= t) {
            break (SearchStatus::OutOfResources, Some(ResourceLimitV1::Time), None);
        }
        let Some(node_id) = frontier.pop() else {
            continue;
        };
        let node = *arena.get(node_id);

        if node.depth > layer {
            stats.states = count(ssg.state_count());
            stats.layers.push(LayerStatistics {
                depth: layer,
                expanded: stats.expanded,
                generated: stats.generated,
                states: stats.states,
            });
            handler.on_finish_layer(layer, &stats);
            layer = node.depth;
        }

        if closed.contains(node.state) {
            stats.duplicates += 1;
            continue;
        }
        if ssg.is_goal(node.state, goal) {
            handler.on_goal_found(&context(problem, factories, ssg, aag), node.state, node.depth);
            break (SearchStatus::Solved, None, Some(node_id));
        }
        if policy.max_expansions.is_some_and(|m| stats.expanded >= m) {
            break (SearchStatus::OutOfResources, Some(ResourceLimitV1::Expansions), None);
        }
        closed.insert(node.state);
        stats.expanded += 1;
        handler.on_expand_node(&context(problem, factories, ssg, aag), node.state, node.depth);

        if policy.max_depth.is_some_and(|d| node.depth >= d) {
            if !depth_cut && reaches_unseen(ssg, aag, node.state, &seen, &mut applicable) {
                depth_cut = true;
            }
            continue;
        }

        aag.generate_applicable_actions(ssg.state(node.state), &mut applicable);
        for &action in &applicable {
            if policy.max_generated.is_some_and(|m| stats.generated >= m) {
                break 'search (SearchStatus::OutOfResources, Some(ResourceLimitV1::Generated), None);
            }
            let (successor, new_state) = ssg.apply_tracked(node.state, aag.action(action));
            stats.generated += 1;
            handler.on_generate_node(
                &context(problem, factories, ssg, aag),
                node.state,
                action,
                successor,
                new_state,
            );
            let first_sight = seen.insert(successor);
            let duplicate = match policy.dedup {
                DedupPolicyV1::ClosedOnly => closed.contains(successor),
                DedupPolicyV1::Seen => closed.contains(successor) || !first_sight,
            };
            if duplicate {
                stats.duplicates += 1;
                continue;
            }
            frontier.push(arena.push_child(node_id, action, successor));
        }
        stats.peak_frontier = count(frontier.high_water());
    };

    stats.peak_frontier = count(frontier.high_water());
    stats.states = count(ssg.state_count());
    stats.generator = *aag.statistics();
    stats.elapsed = start.elapsed();

    let plan = goal_node.map_or_else(Plan::default, |node| {
        let path = arena.reconstruct_path(node);
        let describer = Describer::new(factories, aag.atoms());
        Plan::from_actions(path.iter().map(|&a| aag.action(a)), problem, &describer)
    });

    handler.on_search_end(status, &stats);
    SearchOutcome {
        status,
        plan,
        limit,
        statistics: stats,
    }
}
