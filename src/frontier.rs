//! Min-priority frontier with insertion-order tie-breaking.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::node::NodeId;

/// Ordering key: lowest `f` first, then earliest insertion.
///
/// `BinaryHeap` is a max-heap, so entries are wrapped in `Reverse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierKey {
    f: u32,
    seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    key: FrontierKey,
    node: NodeId,
}

#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
    next_seq: u64,
    high_water: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node` with priority `f`; each call consumes one sequence number.
    pub fn push(&mut self, f: u32, node: NodeId) {
        let key = FrontierKey {
            f,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.heap.push(Reverse(FrontierEntry { key, node }));
        self.high_water = self.high_water.max(self.heap.len());
    }

    /// Removes the entry with the lowest `(f, seq)`.
    pub fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse(entry)| entry.node)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Largest size the frontier has reached.
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}
