//! Best-first frontier with deterministic tie-breaking.
//!
//! The frontier is a binary min-heap keyed by `(fval, seq)`. `seq` is derived
//! from the node's creation order, so two nodes with equal f-values leave the
//! frontier in generation order (FIFO) or reverse generation order (LIFO),
//! never in an order that depends on heap internals.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::rc::Rc;

use lodestar_kernel::space::SearchState;

use crate::node::SearchNode;

/// Order among nodes whose f-values are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Older nodes first.
    Fifo,
    /// Newer nodes first (depth-first behaviour).
    Lifo,
}

/// The frontier ordering key: lower `fval` first, then lower `seq`.
///
/// `fval` is compared with `f64::total_cmp`, so the key is a total order
/// even for infinities.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub fval: f64,
    pub seq: u64,
}

impl FrontierKey {
    #[must_use]
    pub fn new(fval: f64, creation_order: u64, tie_break: TieBreak) -> Self {
        let seq = match tie_break {
            TieBreak::Fifo => creation_order,
            TieBreak::Lifo => u64::MAX - creation_order,
        };
        Self { fval, seq }
    }
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fval
            .total_cmp(&other.fval)
            .then(self.seq.cmp(&other.seq))
    }
}

/// A frontier entry wrapping a node with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest `fval` first).
struct FrontierEntry<S: SearchState> {
    key: Reverse<FrontierKey>,
    node: Rc<SearchNode<S>>,
}

impl<S: SearchState> PartialEq for FrontierEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<S: SearchState> Eq for FrontierEntry<S> {}

impl<S: SearchState> PartialOrd for FrontierEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: SearchState> Ord for FrontierEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first frontier.
///
/// Every node in the frontier is live: it has been generated but not yet
/// popped. Duplicate handling is the explored table's job, not the
/// frontier's, so the same state may be queued more than once along
/// different paths.
pub struct BestFirstFrontier<S: SearchState> {
    heap: BinaryHeap<FrontierEntry<S>>,
    tie_break: TieBreak,
    high_water: u64,
}

impl<S: SearchState> BestFirstFrontier<S> {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            heap: BinaryHeap::new(),
            tie_break,
            high_water: 0,
        }
    }

    /// Push a node, keyed by its `fval` and `creation_order`.
    pub fn push(&mut self, node: Rc<SearchNode<S>>) {
        let key = FrontierKey::new(node.fval, node.creation_order, self.tie_break);
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            node,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the best (lowest key) node from the frontier.
    #[must_use]
    pub fn pop(&mut self) -> Option<Rc<SearchNode<S>>> {
        self.heap.pop().map(|e| e.node)
    }

    /// Key of the node that [`Self::pop`] would return next.
    #[must_use]
    pub fn peek_key(&self) -> Option<FrontierKey> {
        self.heap.peek().map(|e| e.key.0)
    }

    /// Current frontier size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of frontier size since the last [`Self::clear`].
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Drop every queued node and reset the high-water mark.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.high_water = 0;
    }
}
