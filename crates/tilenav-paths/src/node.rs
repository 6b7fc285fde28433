//! Per-query search primitives: node arena, open set, closed set and the
//! depth budget.

use std::collections::{HashMap, HashSet};
use std::ops::Index;

use tilenav_core::{Direction, Point};

/// Tolerance used when comparing accumulated costs against the depth limit.
const COST_EPSILON: f64 = 1e-9;

// ---------------------------------------------------------------------------
// SearchNode / NodeStore
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub(crate) struct SearchNode {
    pub(crate) pos: Point,
    /// Slot of the node this one was reached from; `None` for the start.
    pub(crate) parent: Option<usize>,
    /// Direction of every step taken from the parent to reach `pos`.
    pub(crate) via: Option<Direction>,
    pub(crate) g: f64,
    /// Remaining distance to the goal.
    pub(crate) h: f64,
    /// Directions a jump point still has to scan.
    pub(crate) dirs: Vec<Direction>,
}

impl SearchNode {
    pub(crate) fn root(pos: Point, h: f64) -> Self {
        Self {
            pos,
            parent: None,
            via: None,
            g: 0.0,
            h,
            dirs: Vec::new(),
        }
    }

    pub(crate) fn child(parent: usize, via: Direction, pos: Point, g: f64, h: f64) -> Self {
        Self {
            pos,
            parent: Some(parent),
            via: Some(via),
            g,
            h,
            dirs: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn f(&self) -> f64 {
        self.g + self.h
    }
}

/// Arena of search nodes addressed by slot. Parents are slots, so the search
/// tree has no owning cycles and is dropped in one go.
#[derive(Debug, Default)]
pub(crate) struct NodeStore {
    nodes: Vec<SearchNode>,
}

impl NodeStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, node: SearchNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Slots on the parent chain ending at `slot`, ordered from the child of
    /// the root outwards. The root itself is not included.
    pub(crate) fn chain(&self, slot: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cur = slot;
        while let Some(parent) = self.nodes[cur].parent {
            out.push(cur);
            cur = parent;
        }
        out.reverse();
        out
    }
}

impl Index<usize> for NodeStore {
    type Output = SearchNode;

    fn index(&self, slot: usize) -> &SearchNode {
        &self.nodes[slot]
    }
}

// ---------------------------------------------------------------------------
// OpenSet
// ---------------------------------------------------------------------------

/// Open set keyed by linearized cell index.
///
/// Minimum extraction is a linear scan in insertion order that keeps the
/// first entry attaining the minimum key, so equal keys resolve to the
/// earliest-inserted cell. Replacing a cell's node keeps its position.
#[derive(Debug, Default)]
pub(crate) struct OpenSet {
    order: Vec<usize>,
    slots: HashMap<usize, usize>,
}

impl OpenSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&self, cell: usize) -> Option<usize> {
        self.slots.get(&cell).copied()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether a node reaching `cell` with cost `g` should enter the set:
    /// the cell is new, or `g` strictly improves on the stored node.
    pub(crate) fn admits(&self, cell: usize, g: f64, nodes: &NodeStore) -> bool {
        self.get(cell).is_none_or(|slot| g < nodes[slot].g)
    }

    /// Insert `cell` or point it at a new node, keeping its position.
    pub(crate) fn put(&mut self, cell: usize, slot: usize) {
        if self.slots.insert(cell, slot).is_none() {
            self.order.push(cell);
        }
    }

    /// Remove and return the entry with the smallest `key`.
    pub(crate) fn extract_min<K>(&mut self, nodes: &NodeStore, key: K) -> Option<(usize, usize)>
    where
        K: Fn(&SearchNode) -> f64,
    {
        let mut best: Option<(usize, f64)> = None;
        for (i, cell) in self.order.iter().enumerate() {
            let k = key(&nodes[self.slots[cell]]);
            if best.is_none_or(|(_, bk)| k < bk) {
                best = Some((i, k));
            }
        }
        let (i, _) = best?;
        let cell = self.order.remove(i);
        let slot = self.slots.remove(&cell)?;
        Some((cell, slot))
    }
}

// ---------------------------------------------------------------------------
// ClosedSet
// ---------------------------------------------------------------------------

/// Finalized cells. A closed cell is never reopened.
#[derive(Debug, Default)]
pub(crate) struct ClosedSet(HashSet<usize>);

impl ClosedSet {
    pub(crate) fn insert(&mut self, cell: usize) -> bool {
        self.0.insert(cell)
    }

    pub(crate) fn contains(&self, cell: usize) -> bool {
        self.0.contains(&cell)
    }
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

/// Depth limit as a cost budget. `None` is unlimited.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Budget(Option<f64>);

impl Budget {
    pub(crate) fn new(depth_limit: u32) -> Self {
        Self((depth_limit > 0).then(|| f64::from(depth_limit)))
    }

    pub(crate) fn limit(self) -> Option<f64> {
        self.0
    }

    /// A node at cost `g` is closed but not expanded.
    pub(crate) fn exhausted_at(self, g: f64) -> bool {
        self.0.is_some_and(|l| g >= l - COST_EPSILON)
    }

    /// No node may be created at cost `g`.
    pub(crate) fn exceeded_by(self, g: f64) -> bool {
        self.0.is_some_and(|l| g > l + COST_EPSILON)
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What a strategy hands back to the engine for reconstruction.
#[derive(Debug)]
pub(crate) struct Outcome {
    pub(crate) nodes: NodeStore,
    /// Node to reconstruct the path to; `None` when there is none.
    pub(crate) terminal: Option<usize>,
    /// Nodes are jump points rather than adjacent cells.
    pub(crate) sparse: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(gs: &[f64]) -> NodeStore {
        let mut nodes = NodeStore::new();
        for (i, &g) in gs.iter().enumerate() {
            nodes.push(SearchNode {
                g,
                ..SearchNode::root(Point::new(i as i32, 0), 0.0)
            });
        }
        nodes
    }

    #[test]
    fn extract_min_prefers_earliest_on_ties() {
        let nodes = store_with(&[3.0, 1.0, 1.0, 2.0]);
        let mut open = OpenSet::new();
        for (cell, slot) in [(10, 0), (11, 1), (12, 2), (13, 3)] {
            open.put(cell, slot);
        }
        let order: Vec<usize> = std::iter::from_fn(|| open.extract_min(&nodes, |n| n.g))
            .map(|(cell, _)| cell)
            .collect();
        assert_eq!(order, vec![11, 12, 13, 10]);
        assert!(open.is_empty());
    }

    #[test]
    fn replacement_keeps_position() {
        let nodes = store_with(&[1.0, 5.0, 1.0]);
        let mut open = OpenSet::new();
        open.put(7, 0);
        open.put(8, 1);
        assert!(open.admits(8, 0.5, &nodes));
        assert!(!open.admits(8, 5.0, &nodes));
        open.put(8, 2);
        // Slot 2 ties slot 0, but cell 7 was inserted first.
        assert_eq!(open.extract_min(&nodes, |n| n.g), Some((7, 0)));
        assert_eq!(open.extract_min(&nodes, |n| n.g), Some((8, 2)));
        assert_eq!(open.extract_min(&nodes, |n| n.g), None);
    }

    #[test]
    fn chain_excludes_root() {
        let mut nodes = NodeStore::new();
        let root = nodes.push(SearchNode::root(Point::ZERO, 2.0));
        let a = nodes.push(SearchNode::child(root, Direction::Right, Point::new(1, 0), 1.0, 1.0));
        let b = nodes.push(SearchNode::child(a, Direction::Right, Point::new(2, 0), 2.0, 0.0));
        assert_eq!(nodes.chain(b), vec![a, b]);
        assert!(nodes.chain(root).is_empty());
    }

    #[test]
    fn budget_limits() {
        let unlimited = Budget::new(0);
        assert_eq!(unlimited.limit(), None);
        assert!(!unlimited.exhausted_at(1e9));
        assert!(!unlimited.exceeded_by(1e9));

        let b = Budget::new(3);
        assert!(b.exhausted_at(3.0));
        assert!(!b.exhausted_at(2.9));
        assert!(!b.exceeded_by(3.0));
        assert!(b.exceeded_by(1.0 + 2.0 * std::f64::consts::SQRT_2));
    }

    #[test]
    fn closed_cells_stay_closed() {
        let mut closed = ClosedSet::default();
        assert!(closed.insert(4));
        assert!(!closed.insert(4));
        assert!(closed.contains(4));
        assert!(!closed.contains(5));
    }
}
