//! Counters the search owns and hands to event handlers by reference.

use std::time::Duration;

use groundwork_kernel::actions::generator::AagStatistics;

/// Cumulative counters at the moment a depth layer finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerStatistics {
    pub depth: u32,
    pub expanded: u64,
    pub generated: u64,
    pub states: u64,
}

/// Search counters.
///
/// Everything except `elapsed` is deterministic for a fixed problem,
/// generator kind, and policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Successors produced by applying an action.
    pub generated: u64,
    /// Nodes whose applicable actions were enumerated.
    pub expanded: u64,
    /// Successors dropped by the dedup policy, plus closed nodes skipped on pop.
    pub duplicates: u64,
    /// Frontier high-water mark.
    pub peak_frontier: u64,
    /// States registered with the state generator.
    pub states: u64,
    /// One entry per completed depth layer.
    pub layers: Vec<LayerStatistics>,
    /// Generator counters at search end.
    pub generator: AagStatistics,
    pub elapsed: Duration,
}

impl SearchStatistics {
    /// Deterministic fields as JSON (no wall time).
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let layers: Vec<serde_json::Value> = self
            .layers
            .iter()
            .map(|l| {
                serde_json::json!({
                    "depth": l.depth,
                    "expanded": l.expanded,
                    "generated": l.generated,
                    "states": l.states,
                })
            })
            .collect();
        serde_json::json!({
            "generated": self.generated,
            "expanded": self.expanded,
            "duplicates": self.duplicates,
            "peak_frontier": self.peak_frontier,
            "states": self.states,
            "layers": layers,
            "ground_actions": self.generator.ground_actions(),
            "grounding_cache_hits": self.generator.cache_hits,
        })
    }
}
