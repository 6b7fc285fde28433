use tilenav_core::{Direction, Point};

use crate::config::Movement;

/// Read-only passability and distance oracle over a tile map.
///
/// Only [`width`](Self::width), [`height`](Self::height) and
/// [`passable`](Self::passable) are required. Maps that wrap around their
/// edges override the rounding and delta methods; everything else derives
/// from those.
///
/// Every method must be cheap and free of side effects, and the answers must
/// not change while a query is running.
pub trait GridAdapter {
    /// Number of columns.
    fn width(&self) -> i32;

    /// Number of rows.
    fn height(&self) -> i32;

    /// Whether an agent standing on `p` can take one orthogonal step in `dir`.
    fn passable(&self, p: Point, dir: Direction) -> bool;

    /// Whether an agent on `p` can step diagonally by `horz` and `vert`
    /// without cutting a corner.
    ///
    /// The default accepts the move when at least one of the two L-shaped
    /// routes (vertical then horizontal, or horizontal then vertical) is
    /// passable, and rejects it when both are blocked.
    fn passable_diagonally(&self, p: Point, horz: Direction, vert: Direction) -> bool {
        (self.passable(p, vert) && self.passable(self.step(p, vert), horz))
            || (self.passable(p, horz) && self.passable(self.step(p, horz), vert))
    }

    /// Whether a single step from `p` in any compass direction is allowed.
    fn can_move(&self, p: Point, dir: Direction) -> bool {
        match dir.components() {
            Some((horz, vert)) => self.passable_diagonally(p, horz, vert),
            None => self.passable(p, dir),
        }
    }

    /// Map an x coordinate back onto the grid. Non-looping maps leave it alone.
    fn round_x(&self, x: i32) -> i32 {
        x
    }

    /// Map a y coordinate back onto the grid. Non-looping maps leave it alone.
    fn round_y(&self, y: i32) -> i32 {
        y
    }

    /// Signed horizontal offset from `x2` to `x1`, shortest way round.
    fn delta_x(&self, x1: i32, x2: i32) -> i32 {
        x1 - x2
    }

    /// Signed vertical offset from `y2` to `y1`, shortest way round.
    fn delta_y(&self, y1: i32, y2: i32) -> i32 {
        y1 - y2
    }

    /// The cell one step from `p` in `dir`, after rounding.
    fn step(&self, p: Point, dir: Direction) -> Point {
        let d = dir.delta();
        Point::new(self.round_x(p.x + d.x), self.round_y(p.y + d.y))
    }

    /// Whether `p` lies on the grid.
    fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width() && p.y >= 0 && p.y < self.height()
    }

    /// Linearized cell index `y * width + x`. `p` must be on the grid.
    fn index(&self, p: Point) -> usize {
        (p.y * self.width() + p.x) as usize
    }

    /// Inverse of [`index`](Self::index).
    fn point(&self, index: usize) -> Point {
        let w = self.width().max(1) as usize;
        Point::new((index % w) as i32, (index / w) as i32)
    }

    /// Distance between two cells under `movement`: Manhattan for
    /// 4-directional movement, octile for 8-directional.
    fn distance(&self, a: Point, b: Point, movement: Movement) -> f64 {
        movement.distance(Point::new(
            self.delta_x(a.x, b.x),
            self.delta_y(a.y, b.y),
        ))
    }
}
