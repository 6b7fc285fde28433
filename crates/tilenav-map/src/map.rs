//! A tile map with per-direction passage, optional looping edges and cells
//! occupied by other agents.

use std::collections::HashSet;

use tilenav_core::{Direction, Point, Range};
use tilenav_paths::GridAdapter;

/// Passage mask of a tile: which orthogonal directions an agent may leave
/// or enter it by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile(u8);

impl Tile {
    const DOWN: u8 = 1;
    const LEFT: u8 = 2;
    const RIGHT: u8 = 4;
    const UP: u8 = 8;

    /// Blocks every direction.
    pub const WALL: Tile = Tile(0);
    /// Open in every direction.
    pub const FLOOR: Tile = Tile(Self::DOWN | Self::LEFT | Self::RIGHT | Self::UP);
    /// Passable left and right only, like a bridge seen from the side.
    pub const HORIZONTAL: Tile = Tile(Self::LEFT | Self::RIGHT);
    /// Passable up and down only.
    pub const VERTICAL: Tile = Tile(Self::DOWN | Self::UP);

    /// Tile from a raw mask; bits above the four directions are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::FLOOR.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    const fn bit(dir: Direction) -> u8 {
        match dir {
            Direction::Down => Self::DOWN,
            Direction::Left => Self::LEFT,
            Direction::Right => Self::RIGHT,
            Direction::Up => Self::UP,
            _ => 0,
        }
    }

    /// Whether the tile lets an agent cross its edge in the orthogonal
    /// direction `dir`. Diagonals are never allowed directly.
    pub const fn allows(self, dir: Direction) -> bool {
        self.0 & Self::bit(dir) != 0
    }
}

/// A rectangular tile map.
///
/// Stepping from one cell to the next needs the source tile to allow
/// leaving in that direction, the target tile to allow entering from the
/// opposite side, and the target to be free of other agents.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMap {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    loop_horizontal: bool,
    loop_vertical: bool,
    occupied: HashSet<Point>,
}

impl TileMap {
    /// Create a map filled with [`Tile::FLOOR`]. Negative sizes are clamped
    /// to zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![Tile::FLOOR; (width * height) as usize],
            loop_horizontal: false,
            loop_vertical: false,
            occupied: HashSet::new(),
        }
    }

    /// Make the map wrap around its left/right and top/bottom edges.
    pub fn with_looping(mut self, horizontal: bool, vertical: bool) -> Self {
        self.loop_horizontal = horizontal;
        self.loop_vertical = vertical;
        self
    }

    pub fn loops_horizontally(&self) -> bool {
        self.loop_horizontal
    }

    pub fn loops_vertically(&self) -> bool {
        self.loop_vertical
    }

    /// The map's extent as a range starting at the origin.
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    fn slot(&self, p: Point) -> Option<usize> {
        self.contains(p).then(|| self.index(p))
    }

    /// Tile at `p`, or `None` off the map.
    pub fn at(&self, p: Point) -> Option<Tile> {
        self.slot(p).map(|i| self.tiles[i])
    }

    /// Set the tile at `p`. Does nothing off the map.
    pub fn set(&mut self, p: Point, tile: Tile) {
        if let Some(i) = self.slot(p) {
            self.tiles[i] = tile;
        }
    }

    /// Set every tile in `rng` that lies on the map.
    pub fn fill(&mut self, rng: Range, tile: Tile) {
        for p in rng {
            self.set(p, tile);
        }
    }

    /// Mark `p` as taken by another agent.
    pub fn occupy(&mut self, p: Point) {
        if self.contains(p) {
            self.occupied.insert(p);
        }
    }

    /// Free `p`. Returns whether it was occupied.
    pub fn vacate(&mut self, p: Point) -> bool {
        self.occupied.remove(&p)
    }

    pub fn is_occupied(&self, p: Point) -> bool {
        self.occupied.contains(&p)
    }

    /// Move an occupant from `from` to `to`.
    pub fn relocate(&mut self, from: Point, to: Point) {
        if self.vacate(from) {
            self.occupy(to);
        }
    }
}

impl GridAdapter for TileMap {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn passable(&self, p: Point, dir: Direction) -> bool {
        let q = self.step(p, dir);
        match (self.at(p), self.at(q)) {
            (Some(from), Some(to)) => {
                from.allows(dir) && to.allows(dir.reverse()) && !self.is_occupied(q)
            }
            _ => false,
        }
    }

    fn round_x(&self, x: i32) -> i32 {
        if self.loop_horizontal && self.width > 0 {
            x.rem_euclid(self.width)
        } else {
            x
        }
    }

    fn round_y(&self, y: i32) -> i32 {
        if self.loop_vertical && self.height > 0 {
            y.rem_euclid(self.height)
        } else {
            y
        }
    }

    fn delta_x(&self, x1: i32, x2: i32) -> i32 {
        wrap_delta(x1 - x2, self.width, self.loop_horizontal)
    }

    fn delta_y(&self, y1: i32, y2: i32) -> i32 {
        wrap_delta(y1 - y2, self.height, self.loop_vertical)
    }
}

/// Shortest signed offset on an axis of length `extent`.
fn wrap_delta(d: i32, extent: i32, looping: bool) -> i32 {
    if looping && 2 * d.abs() > extent {
        if d < 0 { d + extent } else { d - extent }
    } else {
        d
    }
}
