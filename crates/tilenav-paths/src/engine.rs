use tilenav_core::{Direction, Point};

use crate::config::{Algorithm, Movement, SearchConfig};
use crate::node::Outcome;
use crate::trace::{MAX_WAYPOINTS, TraceRecorder};
use crate::traits::GridAdapter;

/// Cell count above which an unlimited search is worth a log line.
const LARGE_GRID_CELLS: i64 = 64 * 64;

/// What one query found.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    /// First step to take; `None` means stay put.
    pub direction: Option<Direction>,
    /// Cells from the one next to the start out to the terminal node, each
    /// one step from the previous. At most [`MAX_WAYPOINTS`].
    pub waypoints: Vec<Point>,
    /// Jump points on the path, for Jump Point Search; empty otherwise.
    pub jump_points: Vec<Point>,
    /// Cells in the order the search finalized them, when tracing.
    pub explored: Vec<Point>,
    /// Accumulated cost of the terminal node.
    pub cost: f64,
    /// Whether the terminal node is the goal.
    pub reached_goal: bool,
}

impl PathResult {
    fn stationary() -> Self {
        Self {
            reached_goal: true,
            ..Self::default()
        }
    }

    /// Numpad code of [`direction`](Self::direction), `0` for no movement.
    pub fn direction_code(&self) -> u8 {
        tilenav_core::direction_code(self.direction)
    }

    pub fn is_stationary(&self) -> bool {
        self.direction.is_none()
    }
}

/// Runs next-step queries under a fixed [`SearchConfig`].
///
/// The engine holds no per-query or per-agent state; one engine can serve
/// every agent on a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathEngine {
    pub(crate) config: SearchConfig,
}

impl PathEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Direction of the first step from `start` toward `goal`.
    pub fn next_step<G>(&self, grid: &G, start: Point, goal: Point) -> Option<Direction>
    where
        G: GridAdapter + ?Sized,
    {
        self.compute_path(grid, start, goal).direction
    }

    /// Run a query with a throwaway trace. `explored` is filled only when
    /// the configuration enables tracing.
    pub fn compute_path<G>(&self, grid: &G, start: Point, goal: Point) -> PathResult
    where
        G: GridAdapter + ?Sized,
    {
        let mut trace = TraceRecorder::new();
        self.query(grid, start, goal, &mut trace)
    }

    /// Run one search from `start` to `goal`, recording into `trace`.
    ///
    /// Never fails: an unreachable goal yields the best partial progress,
    /// and a degenerate query yields no movement.
    pub fn query<G>(
        &self,
        grid: &G,
        start: Point,
        goal: Point,
        trace: &mut TraceRecorder,
    ) -> PathResult
    where
        G: GridAdapter + ?Sized,
    {
        trace.begin(self.config.trace);
        if start == goal {
            return PathResult::stationary();
        }
        if !grid.contains(start) || !grid.contains(goal) {
            log::debug!(
                "path query {start} -> {goal} leaves the {}x{} grid",
                grid.width(),
                grid.height()
            );
            return PathResult::default();
        }
        if self.config.depth_limit == 0
            && i64::from(grid.width()) * i64::from(grid.height()) > LARGE_GRID_CELLS
        {
            log::debug!(
                "unlimited {} search on a {}x{} grid",
                self.config.algorithm,
                grid.width(),
                grid.height()
            );
        }

        let outcome = match self.config.algorithm {
            Algorithm::AStar => self.astar_search(grid, start, goal, trace),
            Algorithm::Dijkstra => self.dijkstra_search(grid, start, goal, trace),
            Algorithm::GreedyBestFirst => self.greedy_search(grid, start, goal, trace),
            Algorithm::JumpPoint => self.jps_search(grid, start, goal, trace),
        };
        let result = reconstruct(grid, start, goal, &outcome, trace);

        log::trace!(
            "{} {start} -> {goal}: step {} cost {:.3}, {} waypoints, goal {}",
            self.config.algorithm,
            result.direction_code(),
            result.cost,
            result.waypoints.len(),
            if result.reached_goal { "reached" } else { "not reached" },
        );
        result
    }
}

/// Walk the parent chain of the terminal node and expand it into cells.
fn reconstruct<G>(
    grid: &G,
    start: Point,
    goal: Point,
    outcome: &Outcome,
    trace: &mut TraceRecorder,
) -> PathResult
where
    G: GridAdapter + ?Sized,
{
    let Some(terminal) = outcome.terminal else {
        return PathResult {
            explored: trace.explored().to_vec(),
            ..PathResult::default()
        };
    };
    let nodes = &outcome.nodes;
    let max_run = usize::try_from(grid.width().max(1)).unwrap_or(1)
        * usize::try_from(grid.height().max(1)).unwrap_or(1);

    let mut waypoints = Vec::new();
    let mut jump_points = Vec::new();
    'chain: for slot in nodes.chain(terminal) {
        let node = &nodes[slot];
        if outcome.sparse {
            jump_points.push(node.pos);
        }
        let (Some(parent), Some(via)) = (node.parent, node.via) else {
            continue;
        };
        let mut p = nodes[parent].pos;
        for _ in 0..max_run {
            if waypoints.len() >= MAX_WAYPOINTS {
                break 'chain;
            }
            p = grid.step(p, via);
            waypoints.push(p);
            if p == node.pos {
                break;
            }
        }
    }
    trace.record_path(&waypoints);

    let direction = waypoints.first().and_then(|&first| {
        Direction::from_delta(
            grid.delta_x(first.x, start.x),
            grid.delta_y(first.y, start.y),
        )
    });
    PathResult {
        direction,
        waypoints,
        jump_points,
        explored: trace.explored().to_vec(),
        cost: nodes[terminal].g,
        reached_goal: nodes[terminal].pos == goal,
    }
}

/// One-shot next-step query.
///
/// `depth_limit` of `0` is unlimited; see the crate docs for why that is a
/// risk on large maps.
pub fn compute_next_step<G>(
    grid: &G,
    start: Point,
    goal: Point,
    movement: Movement,
    algorithm: Algorithm,
    depth_limit: u32,
) -> Option<Direction>
where
    G: GridAdapter + ?Sized,
{
    PathEngine::new(
        SearchConfig::default()
            .with_movement(movement)
            .with_algorithm(algorithm)
            .with_depth_limit(depth_limit),
    )
    .next_step(grid, start, goal)
}
