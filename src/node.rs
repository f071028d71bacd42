//! Search-tree nodes.
//!
//! Nodes live in a per-search arena and point at their parent by index, so
//! the tree only ever links child to ancestor and is freed in one go when the
//! search returns.

use crate::puzzle::{Board, Move};

/// Index of a node inside its [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// One point in the search tree. Immutable once pushed into the arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub board: Board,
    pub parent: Option<NodeId>,
    /// Move that produced `board` from the parent's board.
    pub via: Option<Move>,
    /// Path cost g.
    pub depth: u32,
    /// Cached heuristic estimate h.
    pub h: u32,
}

impl Node {
    pub fn root(board: Board, h: u32) -> Self {
        Self {
            board,
            parent: None,
            via: None,
            depth: 0,
            h,
        }
    }

    /// Priority f = g + h.
    pub fn f(&self) -> u32 {
        self.depth + self.h
    }
}

#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Nodes from the root down to `id`, inclusive.
    pub fn path_to(&self, id: NodeId) -> Vec<&Node> {
        let mut path = Vec::with_capacity(self.get(id).depth as usize + 1);
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.get(current);
            path.push(node);
            cursor = node.parent;
        }
        path.reverse();
        path
    }
}
