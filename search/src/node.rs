//! Search nodes and the node arena.

use groundwork_kernel::formalism::ids::{GroundActionId, StateId};

/// Index of a node in its [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node of the search tree.
///
/// Nodes are immutable once pushed. `parent` and `action` are `None` only
/// for the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    pub state: StateId,
    pub parent: Option<NodeId>,
    /// The ground action that produced this node from its parent.
    pub action: Option<GroundActionId>,
    /// Tree depth (root = 0).
    pub depth: u32,
}

/// Append-only storage for search nodes; parent links are arena indices.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the root node for `state`.
    pub fn push_root(&mut self, state: StateId) -> NodeId {
        self.push(SearchNode {
            state,
            parent: None,
            action: None,
            depth: 0,
        })
    }

    /// Push a child of `parent` reached by `action`.
    pub fn push_child(&mut self, parent: NodeId, action: GroundActionId, state: StateId) -> NodeId {
        let depth = self.get(parent).depth + 1;
        self.push(SearchNode {
            state,
            parent: Some(parent),
            action: Some(action),
            depth,
        })
    }

    #[allow(clippy::cast_possible_truncation)]
    fn push(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Node by id. Panics on a foreign id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Actions from the root to `id`, in execution order.
    #[must_use]
    pub fn reconstruct_path(&self, id: NodeId) -> Vec<GroundActionId> {
        let mut path = Vec::with_capacity(self.get(id).depth as usize);
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id);
            if let Some(action) = node.action {
                path.push(action);
            }
            current = node.parent;
        }
        path.reverse();
        path
    }
}
