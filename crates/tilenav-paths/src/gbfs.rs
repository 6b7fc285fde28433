use tilenav_core::{Direction, Point};

use crate::PathEngine;
use crate::astar::may_expand;
use crate::distance::step_cost;
use crate::node::{ClosedSet, NodeStore, Outcome, SearchNode};
use crate::trace::TraceRecorder;
use crate::traits::GridAdapter;

/// Iteration cap when no depth limit is configured.
pub(crate) const GREEDY_ITERATION_CAP: usize = 2048;

impl PathEngine {
    /// Greedy best-first descent: always step to the unvisited neighbour
    /// closest to the goal, never backtracking.
    ///
    /// No optimality or completeness guarantee. A walk that boxes itself in
    /// has no terminal node.
    pub(crate) fn greedy_search<G>(
        &self,
        grid: &G,
        start: Point,
        goal: Point,
        trace: &mut TraceRecorder,
    ) -> Outcome
    where
        G: GridAdapter + ?Sized,
    {
        let movement = self.config.movement;
        let budget = self.config.budget();
        let cap = budget
            .limit()
            .map_or(GREEDY_ITERATION_CAP, |limit| limit as usize);

        let mut nodes = NodeStore::new();
        let mut closed = ClosedSet::default();
        let mut current = nodes.push(SearchNode::root(
            start,
            grid.distance(start, goal, movement),
        ));

        let mut iterations = 0;
        let terminal = loop {
            if iterations >= cap {
                break Some(current);
            }
            iterations += 1;

            let (pos, g) = (nodes[current].pos, nodes[current].g);
            closed.insert(grid.index(pos));
            trace.record_explored(pos);
            if pos == goal {
                break Some(current);
            }

            let remaining = grid.distance(pos, goal, movement);
            let mut pick: Option<(Direction, Point, f64)> = None;
            let mut over_budget = false;
            for &dir in movement.directions() {
                let next = grid.step(pos, dir);
                if !grid.contains(next)
                    || closed.contains(grid.index(next))
                    || !may_expand(grid, pos, dir, remaining)
                {
                    continue;
                }
                if budget.exceeded_by(g + step_cost(dir)) {
                    over_budget = true;
                    continue;
                }
                let h = grid.distance(next, goal, movement);
                if pick.is_none_or(|(_, _, best_h)| h < best_h) {
                    pick = Some((dir, next, h));
                }
            }

            match pick {
                Some((dir, next, h)) => {
                    current = nodes.push(SearchNode::child(
                        current,
                        dir,
                        next,
                        g + step_cost(dir),
                        h,
                    ));
                }
                None if over_budget => break Some(current),
                None => break None,
            }
        };

        Outcome {
            nodes,
            terminal,
            sparse: false,
        }
    }
}
