use tilenav_core::Point;

use crate::PathEngine;
use crate::astar::Frontier;
use crate::node::Outcome;
use crate::trace::TraceRecorder;
use crate::traits::GridAdapter;

impl PathEngine {
    /// Uniform-cost search. Same expansion rules as A*, popped by `g` alone.
    ///
    /// Without reaching the goal the fallback is the discovered node
    /// closest to it, the cheaper one on ties; the start stays the fallback
    /// when nothing gets closer.
    pub(crate) fn dijkstra_search<G>(
        &self,
        grid: &G,
        start: Point,
        goal: Point,
        trace: &mut TraceRecorder,
    ) -> Outcome
    where
        G: GridAdapter + ?Sized,
    {
        self.frontier_search(grid, start, goal, Frontier::Cost, trace)
    }
}
