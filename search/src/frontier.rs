//! Frontiers: the open list of nodes awaiting expansion.
//!
//! The search loop only sees the [`Frontier`] trait; the discipline decides
//! the algorithm. Breadth-first search uses [`FifoFrontier`].

use std::collections::VecDeque;

use crate::node::NodeId;

/// Open list of node ids.
pub trait Frontier {
    fn push(&mut self, node: NodeId);

    fn pop(&mut self) -> Option<NodeId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest size reached so far.
    fn high_water(&self) -> usize;
}

/// First-in first-out frontier.
#[derive(Debug, Clone, Default)]
pub struct FifoFrontier {
    queue: VecDeque<NodeId>,
    high_water: usize,
}

impl FifoFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for FifoFrontier {
    fn push(&mut self, node: NodeId) {
        self.queue.push_back(node);
        self.high_water = self.high_water.max(self.queue.len());
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn high_water(&self) -> usize {
        self.high_water
    }
}
