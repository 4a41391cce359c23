//! Search observers.
//!
//! A [`SearchEventHandler`] is a synchronous, read-only tap on the search
//! loop. Every method defaults to a no-op, so a handler implements only what
//! it reports. Handlers receive an [`EventContext`] for rendering states and
//! actions and never influence the search.

use groundwork_kernel::actions::generator::ApplicableActionGenerator;
use groundwork_kernel::formalism::describe::Describer;
use groundwork_kernel::formalism::factories::PddlFactories;
use groundwork_kernel::formalism::ids::{GroundActionId, StateId};
use groundwork_kernel::formalism::problem::Problem;
use groundwork_kernel::state::successor::SuccessorStateGenerator;

use crate::statistics::SearchStatistics;
use crate::status::SearchStatus;

/// Read-only view of the search components at the time of an event.
pub struct EventContext<'c> {
    pub problem: &'c Problem,
    pub factories: &'c PddlFactories,
    pub ssg: &'c SuccessorStateGenerator,
    pub aag: &'c dyn ApplicableActionGenerator,
}

impl EventContext<'_> {
    #[must_use]
    pub fn describer(&self) -> Describer<'_> {
        Describer::new(self.factories, self.aag.atoms())
    }

    /// `{(at ball1 rooma) ...}`
    #[must_use]
    pub fn render_state(&self, state: StateId) -> String {
        self.describer().state(self.ssg.state(state))
    }

    /// `(pick ball1 rooma left)`
    #[must_use]
    pub fn render_action(&self, action: GroundActionId) -> String {
        self.aag.action(action).describe(self.problem, &self.describer())
    }
}

/// Observer of search progress.
pub trait SearchEventHandler {
    fn on_start_search(&mut self, _ctx: &EventContext<'_>, _initial: StateId) {}

    /// A successor was produced. `new_state` is whether the state registry
    /// grew.
    fn on_generate_node(
        &mut self,
        _ctx: &EventContext<'_>,
        _parent: StateId,
        _action: GroundActionId,
        _successor: StateId,
        _new_state: bool,
    ) {
    }

    fn on_expand_node(&mut self, _ctx: &EventContext<'_>, _state: StateId, _depth: u32) {}

    /// Every node of depth `depth` has been popped.
    fn on_finish_layer(&mut self, _depth: u32, _statistics: &SearchStatistics) {}

    fn on_goal_found(&mut self, _ctx: &EventContext<'_>, _state: StateId, _depth: u32) {}

    fn on_search_end(&mut self, _status: SearchStatus, _statistics: &SearchStatistics) {}
}

/// Layer progress and the final summary at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimalEventHandler;

impl SearchEventHandler for MinimalEventHandler {
    fn on_start_search(&mut self, ctx: &EventContext<'_>, _initial: StateId) {
        tracing::info!(
            problem = ctx.problem.name(),
            generator = %ctx.aag.kind(),
            "search started"
        );
    }

    fn on_finish_layer(&mut self, depth: u32, statistics: &SearchStatistics) {
        tracing::info!(
            depth,
            expanded = statistics.expanded,
            generated = statistics.generated,
            states = statistics.states,
            "layer finished"
        );
    }

    fn on_goal_found(&mut self, _ctx: &EventContext<'_>, _state: StateId, depth: u32) {
        tracing::info!(plan_length = depth, "goal found");
    }

    fn on_search_end(&mut self, status: SearchStatus, statistics: &SearchStatistics) {
        tracing::info!(
            %status,
            expanded = statistics.expanded,
            generated = statistics.generated,
            duplicates = statistics.duplicates,
            states = statistics.states,
            peak_frontier = statistics.peak_frontier,
            elapsed_ms = u64::try_from(statistics.elapsed.as_millis()).unwrap_or(u64::MAX),
            "search finished"
        );
    }
}

/// Every transition with rendered states and actions at `debug` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugEventHandler;

impl SearchEventHandler for DebugEventHandler {
    fn on_start_search(&mut self, ctx: &EventContext<'_>, initial: StateId) {
        tracing::debug!(
            problem = ctx.problem.name(),
            generator = %ctx.aag.kind(),
            initial = %ctx.render_state(initial),
            "search started"
        );
    }

    fn on_generate_node(
        &mut self,
        ctx: &EventContext<'_>,
        parent: StateId,
        action: GroundActionId,
        successor: StateId,
        new_state: bool,
    ) {
        tracing::debug!(
            %parent,
            action = %ctx.render_action(action),
            %successor,
            new_state,
            state = %ctx.render_state(successor),
            "generated"
        );
    }

    fn on_expand_node(&mut self, ctx: &EventContext<'_>, state: StateId, depth: u32) {
        tracing::debug!(%state, depth, atoms = %ctx.render_state(state), "expanding");
    }

    fn on_finish_layer(&mut self, depth: u32, statistics: &SearchStatistics) {
        tracing::debug!(
            depth,
            expanded = statistics.expanded,
            generated = statistics.generated,
            "layer finished"
        );
    }

    fn on_goal_found(&mut self, ctx: &EventContext<'_>, state: StateId, depth: u32) {
        tracing::debug!(%state, depth, atoms = %ctx.render_state(state), "goal found");
    }

    fn on_search_end(&mut self, status: SearchStatus, statistics: &SearchStatistics) {
        tracing::debug!(
            %status,
            expanded = statistics.expanded,
            generated = statistics.generated,
            duplicates = statistics.duplicates,
            "search finished"
        );
    }
}

/// Selects one of the built-in handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EventHandlerKind {
    #[default]
    Minimal,
    Debug,
}

impl EventHandlerKind {
    #[must_use]
    pub fn into_handler(self) -> Box<dyn SearchEventHandler> {
        match self {
            Self::Minimal => Box::new(MinimalEventHandler),
            Self::Debug => Box::new(DebugEventHandler),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Debug => "debug",
        }
    }
}
