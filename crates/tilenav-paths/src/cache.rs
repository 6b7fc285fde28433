use tilenav_core::{Direction, Point};

use crate::trace::MAX_WAYPOINTS;
use crate::traits::GridAdapter;

/// Waypoints remembered from an earlier query, consumed one step per call.
///
/// The cache never forces a move: when the next waypoint is no longer
/// adjacent or the step onto it is blocked, the cache empties itself and the
/// caller is expected to search again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathCache {
    goal: Option<Point>,
    waypoints: Vec<Point>,
    cursor: usize,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cache with a path toward `goal`, keeping at most
    /// [`MAX_WAYPOINTS`] cells.
    pub fn store(&mut self, goal: Point, waypoints: &[Point]) {
        self.goal = Some(goal);
        self.waypoints.clear();
        self.waypoints
            .extend_from_slice(&waypoints[..waypoints.len().min(MAX_WAYPOINTS)]);
        self.cursor = 0;
    }

    pub fn clear(&mut self) {
        self.goal = None;
        self.waypoints.clear();
        self.cursor = 0;
    }

    /// Goal the cached path leads to.
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Number of waypoints not yet consumed.
    pub fn remaining(&self) -> usize {
        self.waypoints.len().saturating_sub(self.cursor)
    }

    /// Next waypoint to walk onto.
    pub fn peek(&self) -> Option<Point> {
        self.waypoints.get(self.cursor).copied()
    }

    /// Direction from `position` onto the next cached waypoint.
    ///
    /// Waypoints the agent already stands on are consumed first. Returns
    /// `None`, and empties the cache, when the path is exhausted, the next
    /// waypoint is not adjacent, or the step is blocked.
    pub fn next_step<G>(&mut self, grid: &G, position: Point) -> Option<Direction>
    where
        G: GridAdapter + ?Sized,
    {
        while self.peek() == Some(position) {
            self.cursor += 1;
        }
        let Some(next) = self.peek() else {
            if self.goal.is_some() {
                log::debug!("cached path exhausted at {position}");
            }
            self.clear();
            return None;
        };

        let dx = grid.delta_x(next.x, position.x);
        let dy = grid.delta_y(next.y, position.y);
        let dir = match Direction::from_delta(dx, dy) {
            Some(dir) if dx.abs() <= 1 && dy.abs() <= 1 => dir,
            _ => {
                log::debug!("cached waypoint {next} is not adjacent to {position}, dropping path");
                self.clear();
                return None;
            }
        };
        if !grid.can_move(position, dir) {
            log::debug!("cached step {dir} from {position} is blocked, dropping path");
            self.clear();
            return None;
        }
        Some(dir)
    }

    /// Remaining waypoints as linearized cell indices, for persistence.
    pub fn to_indices<G>(&self, grid: &G) -> Vec<usize>
    where
        G: GridAdapter + ?Sized,
    {
        self.waypoints
            .get(self.cursor..)
            .unwrap_or_default()
            .iter()
            .map(|&p| grid.index(p))
            .collect()
    }

    /// Rebuild a cache toward `goal` from linearized cell indices.
    pub fn from_indices<G>(grid: &G, goal: Point, indices: &[usize]) -> Self
    where
        G: GridAdapter + ?Sized,
    {
        let waypoints: Vec<Point> = indices.iter().map(|&i| grid.point(i)).collect();
        let mut cache = Self::new();
        cache.store(goal, &waypoints);
        cache
    }
}
