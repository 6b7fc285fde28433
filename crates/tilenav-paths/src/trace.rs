use tilenav_core::Point;

/// Most explored cells a trace keeps.
pub const MAX_EXPLORED: usize = 512;

/// Most waypoints a result or cache keeps.
pub const MAX_WAYPOINTS: usize = 256;

/// Capped buffers of explored and path cells for visualization.
///
/// Every query resets the buffers before it runs, so their contents always
/// belong to the most recent query. Cells past the caps are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceRecorder {
    enabled: bool,
    explored: Vec<Point>,
    path: Vec<Point>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start recording for a new query, discarding the previous one.
    pub fn begin(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.explored.clear();
        self.path.clear();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn record_explored(&mut self, p: Point) {
        if self.enabled && self.explored.len() < MAX_EXPLORED {
            self.explored.push(p);
        }
    }

    pub fn record_path(&mut self, waypoints: &[Point]) {
        if self.enabled {
            self.path.clear();
            self.path
                .extend_from_slice(&waypoints[..waypoints.len().min(MAX_WAYPOINTS)]);
        }
    }

    /// Cells in the order the last query finalized them.
    pub fn explored(&self) -> &[Point] {
        &self.explored
    }

    /// Waypoints of the last query.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Drop recorded cells and stop recording.
    pub fn clear(&mut self) {
        self.begin(false);
    }
}
