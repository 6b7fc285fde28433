//! Next-step pathfinding for agents on bounded tile grids.
//!
//! Given a read-only [`GridAdapter`], a start and a goal cell, a
//! [`PathEngine`] runs one of four searches and reports the first
//! [`Direction`] to move in, together with the waypoints it found:
//!
//! - **A\*** ([`Algorithm::AStar`]): heuristic frontier search
//! - **Dijkstra** ([`Algorithm::Dijkstra`]): uniform-cost frontier search
//! - **Greedy best-first** ([`Algorithm::GreedyBestFirst`]): single-track
//!   descent on the heuristic, no backtracking
//! - **Jump Point Search** ([`Algorithm::JumpPoint`]): frontier search over
//!   jump points found by scanning straight runs
//!
//! Searches never fail. When the goal cannot be reached within the depth
//! limit the engine steps toward the closest cell it discovered; degenerate
//! queries return "no movement".
//!
//! Memoization across calls lives in [`PathCache`] and diagnostics in
//! [`TraceRecorder`]; both are owned by the caller through a per-agent
//! [`MovementState`].
//!
//! # Depth limits
//!
//! [`SearchConfig::depth_limit`] bounds the accumulated path cost a search
//! may expand. `0` disables the bound: searches then run until the goal is
//! found or the reachable area is exhausted, which on large open maps is an
//! unbounded synchronous stall. Prefer a finite limit for per-tick queries.

mod agent;
mod astar;
mod cache;
mod config;
mod dijkstra;
mod distance;
mod engine;
mod gbfs;
mod jps;
mod node;
mod trace;
mod traits;

#[cfg(test)]
mod testgrid;

pub use agent::MovementState;
pub use cache::PathCache;
pub use config::{Algorithm, ConfigError, DEFAULT_DEPTH_LIMIT, Movement, SearchConfig};
pub use distance::{manhattan, octile, step_cost};
pub use engine::{PathEngine, PathResult, compute_next_step};
pub use tilenav_core::{Direction, Point};
pub use trace::{MAX_EXPLORED, MAX_WAYPOINTS, TraceRecorder};
pub use traits::GridAdapter;
