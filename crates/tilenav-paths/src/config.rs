//! Search configuration supplied by the host for each query.

use std::fmt;
use std::str::FromStr;

use tilenav_core::{Direction, Point};

use crate::distance;
use crate::node::Budget;

/// Depth limit used when the host does not configure one.
pub const DEFAULT_DEPTH_LIMIT: u32 = 12;

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

/// Directionality of agent movement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Movement {
    /// Orthogonal steps only; distances are Manhattan.
    #[default]
    Four,
    /// Orthogonal and diagonal steps; distances are octile.
    Eight,
}

impl Movement {
    /// Directions a search expands, in expansion order.
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Movement::Four => &Direction::ORTHOGONAL,
            Movement::Eight => &Direction::ALL,
        }
    }

    /// Whether a step in `dir` is legal under this movement model.
    pub fn allows(self, dir: Direction) -> bool {
        self == Movement::Eight || !dir.is_diagonal()
    }

    /// Length of the offset `d` under this movement model.
    pub fn distance(self, d: Point) -> f64 {
        match self {
            Movement::Four => distance::manhattan(d),
            Movement::Eight => distance::octile(d),
        }
    }

    /// Number of directions (4 or 8).
    pub fn count(self) -> u8 {
        match self {
            Movement::Four => 4,
            Movement::Eight => 8,
        }
    }

    /// Movement model for a raw direction count.
    pub fn from_count(n: i64) -> Result<Self, ConfigError> {
        match n {
            4 => Ok(Movement::Four),
            8 => Ok(Movement::Eight),
            other => Err(ConfigError::UnsupportedDirections(other)),
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-directional", self.count())
    }
}

impl FromStr for Movement {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "4" | "four" | "4-directional" => Ok(Movement::Four),
            "8" | "eight" | "8-directional" => Ok(Movement::Eight),
            _ => Err(ConfigError::UnknownMovement(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// Search strategy selection.
///
/// Numeric codes follow the host's parameter block: 0 = A*, 1 = JPS,
/// 2 = Dijkstra, 3 = greedy best-first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    AStar,
    #[default]
    JumpPoint,
    Dijkstra,
    GreedyBestFirst,
}

impl Algorithm {
    /// All strategies in code order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::AStar,
        Algorithm::JumpPoint,
        Algorithm::Dijkstra,
        Algorithm::GreedyBestFirst,
    ];

    /// Host parameter code.
    pub fn code(self) -> u8 {
        match self {
            Algorithm::AStar => 0,
            Algorithm::JumpPoint => 1,
            Algorithm::Dijkstra => 2,
            Algorithm::GreedyBestFirst => 3,
        }
    }

    /// Strategy for a host parameter code.
    pub fn from_code(code: i64) -> Result<Self, ConfigError> {
        match code {
            0 => Ok(Algorithm::AStar),
            1 => Ok(Algorithm::JumpPoint),
            2 => Ok(Algorithm::Dijkstra),
            3 => Ok(Algorithm::GreedyBestFirst),
            other => Err(ConfigError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::AStar => "A*",
            Algorithm::JumpPoint => "JPS",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::GreedyBestFirst => "GBFS",
        };
        f.write_str(name)
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a*" | "astar" | "a-star" => Ok(Algorithm::AStar),
            "jps" | "jump-point" | "jumppoint" => Ok(Algorithm::JumpPoint),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "gbfs" | "greedy" | "greedy-best-first" => Ok(Algorithm::GreedyBestFirst),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// SearchConfig
// ---------------------------------------------------------------------------

/// Per-query search settings. Read-only for the duration of a query.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Maximum accumulated path cost to expand; `0` means unlimited.
    pub depth_limit: u32,
    pub movement: Movement,
    pub algorithm: Algorithm,
    /// Keep the found waypoints in the agent's [`PathCache`](crate::PathCache)
    /// and follow them on later calls instead of searching every time.
    pub remember_path: bool,
    /// Record explored and path cells in the agent's
    /// [`TraceRecorder`](crate::TraceRecorder).
    pub trace: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth_limit: DEFAULT_DEPTH_LIMIT,
            movement: Movement::Four,
            algorithm: Algorithm::JumpPoint,
            remember_path: false,
            trace: false,
        }
    }
}

impl SearchConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_depth_limit(mut self, depth_limit: u32) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    pub fn with_movement(mut self, movement: Movement) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_remember_path(mut self, remember_path: bool) -> Self {
        self.remember_path = remember_path;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Build a configuration from the host's raw parameter values,
    /// rejecting anything the search core does not accept.
    pub fn from_params(
        depth_limit: i64,
        algorithm: i64,
        directions: i64,
        remember_path: bool,
        trace: bool,
    ) -> Result<Self, ConfigError> {
        if depth_limit < 0 {
            return Err(ConfigError::NegativeDepthLimit(depth_limit));
        }
        let depth_limit =
            u32::try_from(depth_limit).map_err(|_| ConfigError::DepthLimitTooLarge(depth_limit))?;
        Ok(Self {
            depth_limit,
            movement: Movement::from_count(directions)?,
            algorithm: Algorithm::from_code(algorithm)?,
            remember_path,
            trace,
        })
    }

    pub(crate) fn budget(&self) -> Budget {
        Budget::new(self.depth_limit)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Host parameters that violate the search contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Depth limits are non-negative; `0` already means unlimited.
    NegativeDepthLimit(i64),
    /// Depth limit does not fit the supported range.
    DepthLimitTooLarge(i64),
    /// Not one of the four strategy codes or names.
    UnknownAlgorithm(String),
    /// Directionality other than 4 or 8.
    UnsupportedDirections(i64),
    /// Unrecognised movement name.
    UnknownMovement(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeDepthLimit(n) => write!(f, "depth limit must not be negative, got {n}"),
            Self::DepthLimitTooLarge(n) => write!(f, "depth limit {n} is too large"),
            Self::UnknownAlgorithm(s) => write!(f, "unknown pathfinding algorithm \"{s}\""),
            Self::UnsupportedDirections(n) => {
                write!(f, "movement must be 4- or 8-directional, got {n}")
            }
            Self::UnknownMovement(s) => write!(f, "unknown movement mode \"{s}\""),
        }
    }
}

impl std::error::Error for ConfigError {}
