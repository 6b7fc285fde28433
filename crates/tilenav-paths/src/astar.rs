use tilenav_core::{Direction, Point};

use crate::PathEngine;
use crate::distance::step_cost;
use crate::node::{ClosedSet, NodeStore, OpenSet, Outcome, SearchNode};
use crate::trace::TraceRecorder;
use crate::traits::GridAdapter;

/// Distance to the goal under which an orthogonal step ignores passability.
const ORTHOGONAL_REACH: f64 = 1.0;
/// Distance to the goal under which a diagonal step ignores passability.
const DIAGONAL_REACH: f64 = 1.5;

/// Ordering and best-node policy of a frontier search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Frontier {
    /// Pop by `f = g + h` (A*).
    Heuristic,
    /// Pop by `g` alone (Dijkstra).
    Cost,
}

impl Frontier {
    fn key(self, n: &SearchNode) -> f64 {
        match self {
            Frontier::Heuristic => n.f(),
            Frontier::Cost => n.g,
        }
    }

    /// Whether `candidate` replaces `best` as the fallback target.
    pub(crate) fn improves(self, candidate: &SearchNode, best: &SearchNode) -> bool {
        match self {
            Frontier::Heuristic => candidate.h < best.h,
            Frontier::Cost => {
                candidate.h < best.h || (candidate.h == best.h && candidate.g < best.g)
            }
        }
    }
}

/// Whether a search may step from `pos` in `dir`. Close to the goal the
/// passability check is waived so an agent can step onto an occupied goal.
pub(crate) fn may_expand<G>(grid: &G, pos: Point, dir: Direction, remaining: f64) -> bool
where
    G: GridAdapter + ?Sized,
{
    match dir.components() {
        Some((horz, vert)) => {
            grid.passable_diagonally(pos, horz, vert) || remaining <= DIAGONAL_REACH
        }
        None => grid.passable(pos, dir) || remaining <= ORTHOGONAL_REACH,
    }
}

impl PathEngine {
    pub(crate) fn astar_search<G>(
        &self,
        grid: &G,
        start: Point,
        goal: Point,
        trace: &mut TraceRecorder,
    ) -> Outcome
    where
        G: GridAdapter + ?Sized,
    {
        self.frontier_search(grid, start, goal, Frontier::Heuristic, trace)
    }

    /// Best-first search over single steps shared by A* and Dijkstra.
    pub(crate) fn frontier_search<G>(
        &self,
        grid: &G,
        start: Point,
        goal: Point,
        frontier: Frontier,
        trace: &mut TraceRecorder,
    ) -> Outcome
    where
        G: GridAdapter + ?Sized,
    {
        let movement = self.config.movement;
        let budget = self.config.budget();

        let mut nodes = NodeStore::new();
        let mut open = OpenSet::new();
        let mut closed = ClosedSet::default();

        let root = nodes.push(SearchNode::root(
            start,
            grid.distance(start, goal, movement),
        ));
        open.put(grid.index(start), root);
        let mut best = root;

        while let Some((cell, slot)) = open.extract_min(&nodes, |n| frontier.key(n)) {
            closed.insert(cell);
            let (pos, g) = (nodes[slot].pos, nodes[slot].g);
            trace.record_explored(pos);

            if pos == goal {
                best = slot;
                break;
            }
            if budget.exhausted_at(g) {
                continue;
            }

            let remaining = grid.distance(pos, goal, movement);
            for &dir in movement.directions() {
                let next = grid.step(pos, dir);
                if !grid.contains(next) {
                    continue;
                }
                let next_cell = grid.index(next);
                if closed.contains(next_cell) || !may_expand(grid, pos, dir, remaining) {
                    continue;
                }
                let g2 = g + step_cost(dir);
                if budget.exceeded_by(g2) || !open.admits(next_cell, g2, &nodes) {
                    continue;
                }
                let h2 = grid.distance(next, goal, movement);
                let child = nodes.push(SearchNode::child(slot, dir, next, g2, h2));
                // A cheaper node for the best cell takes over as best.
                let replaced = open.get(next_cell);
                open.put(next_cell, child);
                if replaced == Some(best) || frontier.improves(&nodes[child], &nodes[best]) {
                    best = child;
                }
            }
        }

        Outcome {
            nodes,
            terminal: Some(best),
            sparse: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::SQRT_2;

    use super::*;
    use crate::config::{Algorithm, Movement, SearchConfig};
    use crate::testgrid::AsciiGrid;

    fn engine(movement: Movement, depth_limit: u32) -> PathEngine {
        PathEngine::new(
            SearchConfig::default()
                .with_algorithm(Algorithm::AStar)
                .with_movement(movement)
                .with_depth_limit(depth_limit),
        )
    }

    #[test]
    fn straight_run_on_open_grid() {
        let grid = AsciiGrid::open(5, 5);
        let r = engine(Movement::Four, 0).compute_path(&grid, Point::ZERO, Point::new(4, 0));
        assert_eq!(r.direction, Some(Direction::Right));
        assert_eq!(
            r.waypoints,
            vec![
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(3, 0),
                Point::new(4, 0)
            ]
        );
        assert!(r.reached_goal);
        assert_eq!(r.cost, 4.0);
    }

    #[test]
    fn routes_through_wall_gap() {
        let grid = AsciiGrid::parse(&["S.#.G", "#.#..", "....."]);
        let r = engine(Movement::Four, 0).compute_path(&grid, Point::ZERO, Point::new(4, 0));
        assert_eq!(r.direction, Some(Direction::Right));
        assert_eq!(r.cost, 8.0);
        assert_eq!(r.waypoints.len(), 8);
        assert!(r.waypoints.iter().all(|&p| !grid.is_wall(p)));
    }

    #[test]
    fn diagonal_run_costs_octile() {
        let grid = AsciiGrid::open(6, 6);
        let r = engine(Movement::Eight, 0).compute_path(&grid, Point::ZERO, Point::new(4, 4));
        assert_eq!(r.direction, Some(Direction::DownRight));
        assert!((r.cost - 4.0 * SQRT_2).abs() < 1e-9);
        assert_eq!(r.waypoints.last(), Some(&Point::new(4, 4)));
    }

    #[test]
    fn corner_cut_is_refused_away_from_goal() {
        // Both L-shaped routes around (1,1) are blocked.
        let grid = AsciiGrid::parse(&[".#..", "#...", "...."]);
        let r = engine(Movement::Eight, 0).compute_path(&grid, Point::ZERO, Point::new(3, 2));
        assert_eq!(r.direction, None);
        assert!(!r.reached_goal);
    }

    #[test]
    fn steps_onto_blocked_goal_when_adjacent() {
        let grid = AsciiGrid::parse(&["..#", "..."]);
        let r = engine(Movement::Four, 0).compute_path(&grid, Point::new(1, 0), Point::new(2, 0));
        assert_eq!(r.direction, Some(Direction::Right));
        assert!(r.reached_goal);
    }

    #[test]
    fn depth_limit_closes_without_expanding() {
        let grid = AsciiGrid::parse(&["S#", ".."]);
        let r = engine(Movement::Four, 1).compute_path(&grid, Point::ZERO, Point::new(1, 1));
        assert_eq!(r.direction, Some(Direction::Down));
        assert_eq!(r.waypoints, vec![Point::new(0, 1)]);
        assert!(!r.reached_goal);
    }

    #[test]
    fn cheaper_route_to_best_cell_is_kept() {
        // (2,0) is first reached diagonally through (1,1), then more cheaply
        // along the top row.
        let grid = AsciiGrid::parse(&["...#", "..#."]);
        let r = engine(Movement::Eight, 3).compute_path(&grid, Point::ZERO, Point::new(3, 1));
        assert_eq!(r.direction, Some(Direction::Right));
        assert_eq!(r.waypoints, vec![Point::new(1, 0), Point::new(2, 0)]);
        assert_eq!(r.cost, 2.0);
        assert!(!r.reached_goal);
    }

    #[test]
    fn frontier_best_policies() {
        let near = SearchNode {
            g: 5.0,
            ..SearchNode::root(Point::ZERO, 1.0)
        };
        let cheap_near = SearchNode {
            g: 3.0,
            ..SearchNode::root(Point::ZERO, 1.0)
        };
        assert!(!Frontier::Heuristic.improves(&cheap_near, &near));
        assert!(Frontier::Cost.improves(&cheap_near, &near));
        assert!(!Frontier::Cost.improves(&near, &cheap_near));
    }
}
