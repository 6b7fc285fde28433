use tilenav_core::{Direction, Point};

use crate::PathEngine;
use crate::cache::PathCache;
use crate::trace::TraceRecorder;
use crate::traits::GridAdapter;

/// Per-agent state carried between movement decisions. Owned by the caller;
/// nothing in it is shared between agents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementState {
    pub cache: PathCache,
    pub trace: TraceRecorder,
}

impl MovementState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the cached path and trace.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.trace.clear();
    }
}

impl PathEngine {
    /// Decide an agent's next move for this tick.
    ///
    /// A directional `input` always wins and discards any remembered path.
    /// Otherwise the agent heads for `destination`, following its cached path
    /// when the engine remembers paths and searching again whenever that path
    /// runs out, is left behind or is blocked.
    pub fn decide_move<G>(
        &self,
        grid: &G,
        state: &mut MovementState,
        position: Point,
        destination: Option<Point>,
        input: Option<Direction>,
    ) -> Option<Direction>
    where
        G: GridAdapter + ?Sized,
    {
        if let Some(dir) = input {
            state.clear();
            return Some(dir);
        }
        let goal = destination?;

        if !self.config.remember_path {
            return self.query(grid, position, goal, &mut state.trace).direction;
        }

        if state.cache.goal() == Some(goal) {
            if let Some(dir) = state.cache.next_step(grid, position) {
                return Some(dir);
            }
        } else {
            state.cache.clear();
        }

        let result = self.query(grid, position, goal, &mut state.trace);
        if result.waypoints.is_empty() {
            return result.direction;
        }
        state.cache.store(goal, &result.waypoints);
        state.cache.next_step(grid, position).or(result.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Algorithm, SearchConfig};
    use crate::testgrid::AsciiGrid;

    fn remembering() -> PathEngine {
        PathEngine::new(
            SearchConfig::default()
                .with_algorithm(Algorithm::AStar)
                .with_depth_limit(0)
                .with_remember_path(true),
        )
    }

    #[test]
    fn input_overrides_and_clears() {
        let grid = AsciiGrid::open(5, 5);
        let e = remembering();
        let mut state = MovementState::new();
        let goal = Some(Point::new(4, 4));
        assert!(e.decide_move(&grid, &mut state, Point::ZERO, goal, None).is_some());
        assert!(!state.cache.is_empty());

        let dir = e.decide_move(&grid, &mut state, Point::ZERO, goal, Some(Direction::Up));
        assert_eq!(dir, Some(Direction::Up));
        assert!(state.cache.is_empty());
    }

    #[test]
    fn no_destination_no_move() {
        let grid = AsciiGrid::open(3, 3);
        let mut state = MovementState::new();
        assert_eq!(
            remembering().decide_move(&grid, &mut state, Point::ZERO, None, None),
            None
        );
    }

    #[test]
    fn follows_cached_path_to_goal() {
        let grid = AsciiGrid::parse(&["S.#.G", "#.#..", "....."]);
        let e = remembering();
        let mut state = MovementState::new();
        let goal = Point::new(4, 0);
        let mut pos = Point::ZERO;
        let mut steps = 0;
        while let Some(dir) = e.decide_move(&grid, &mut state, pos, Some(goal), None) {
            pos = grid.step(pos, dir);
            steps += 1;
            assert!(steps <= 8);
        }
        assert_eq!(pos, goal);
        assert_eq!(steps, 8);
    }

    #[test]
    fn standing_on_goal_caches_nothing() {
        let grid = AsciiGrid::open(3, 1);
        let e = remembering();
        let mut state = MovementState::new();
        let goal = Some(Point::new(2, 0));
        for _ in 0..3 {
            assert_eq!(e.decide_move(&grid, &mut state, Point::new(2, 0), goal, None), None);
            assert!(state.cache.is_empty());
            assert_eq!(state.cache.goal(), None);
        }
    }

    #[test]
    fn obstruction_triggers_fresh_search() {
        let open = AsciiGrid::open(4, 3);
        let e = remembering();
        let mut state = MovementState::new();
        let goal = Point::new(3, 0);
        assert_eq!(
            e.decide_move(&open, &mut state, Point::ZERO, Some(goal), None),
            Some(Direction::Right)
        );

        // A wall appears on the cached route.
        let blocked = AsciiGrid::parse(&[".#..", "....", "...."]);
        let dir = e.decide_move(&blocked, &mut state, Point::ZERO, Some(goal), None);
        assert_eq!(dir, Some(Direction::Down));
        assert_eq!(state.cache.peek(), Some(Point::new(0, 1)));
    }

    #[test]
    fn new_destination_replaces_cache() {
        let grid = AsciiGrid::open(5, 5);
        let e = remembering();
        let mut state = MovementState::new();
        e.decide_move(&grid, &mut state, Point::new(2, 2), Some(Point::new(4, 2)), None);
        let dir = e.decide_move(&grid, &mut state, Point::new(2, 2), Some(Point::new(0, 2)), None);
        assert_eq!(dir, Some(Direction::Left));
        assert_eq!(state.cache.goal(), Some(Point::new(0, 2)));
    }

    #[test]
    fn without_memo_every_call_searches() {
        let grid = AsciiGrid::open(5, 1);
        let e = PathEngine::new(SearchConfig::default().with_trace(true));
        let mut state = MovementState::new();
        let dir = e.decide_move(&grid, &mut state, Point::ZERO, Some(Point::new(4, 0)), None);
        assert_eq!(dir, Some(Direction::Right));
        assert!(state.cache.is_empty());
        assert!(!state.trace.explored().is_empty());
    }
}
