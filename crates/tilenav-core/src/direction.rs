//! Numpad compass directions.
//!
//! A [`Direction`] is one of the eight grid-adjacent moves, encoded the way a
//! telephone/numeric keypad is laid out around the centre key `5`:
//!
//! ```text
//! 7 8 9
//! 4 . 6
//! 1 2 3
//! ```
//!
//! `5` (no movement) has no variant; APIs that may decline to move return
//! `Option<Direction>` and [`direction_code`] maps `None` to `0`.

use std::fmt;

use crate::geom::Point;

/// One of the eight compass moves, keyed by its numpad code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    DownLeft = 1,
    Down = 2,
    DownRight = 3,
    Left = 4,
    Right = 6,
    UpLeft = 7,
    Up = 8,
    UpRight = 9,
}

impl Direction {
    /// Every direction in ascending numpad order. Searches expand neighbours
    /// in this order.
    pub const ALL: [Direction; 8] = [
        Direction::DownLeft,
        Direction::Down,
        Direction::DownRight,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::Up,
        Direction::UpRight,
    ];

    /// The four orthogonal directions in ascending numpad order.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Up,
    ];

    /// Numpad code of this direction (1 to 9, never 5).
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Direction for a numpad code. `0`, `5` and anything above `9` yield `None`.
    pub const fn from_code(code: u8) -> Option<Direction> {
        match code {
            1 => Some(Direction::DownLeft),
            2 => Some(Direction::Down),
            3 => Some(Direction::DownRight),
            4 => Some(Direction::Left),
            6 => Some(Direction::Right),
            7 => Some(Direction::UpLeft),
            8 => Some(Direction::Up),
            9 => Some(Direction::UpRight),
            _ => None,
        }
    }

    /// Direction pointing along the signs of `(dx, dy)`.
    ///
    /// Only the sign of each component matters, so `(5, -2)` is
    /// [`Direction::UpRight`]. `(0, 0)` has no direction.
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        let dx = dx.signum();
        let dy = dy.signum();
        if dx == 0 && dy == 0 {
            return None;
        }
        Direction::from_code((5 - 3 * dy + dx) as u8)
    }

    /// Unit offset of one step in this direction.
    #[inline]
    pub const fn delta(self) -> Point {
        let code = self as i32;
        Point::new((code - 1) % 3 - 1, 1 - (code - 1) / 3)
    }

    /// Whether this is one of the four diagonal moves.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        (self as u8) % 2 == 1
    }

    /// Whether this direction moves along the x axis only.
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Split a diagonal into its `(horizontal, vertical)` components.
    ///
    /// Orthogonal directions have no components and return `None`.
    pub const fn components(self) -> Option<(Direction, Direction)> {
        match self {
            Direction::DownLeft => Some((Direction::Left, Direction::Down)),
            Direction::DownRight => Some((Direction::Right, Direction::Down)),
            Direction::UpLeft => Some((Direction::Left, Direction::Up)),
            Direction::UpRight => Some((Direction::Right, Direction::Up)),
            _ => None,
        }
    }

    /// Diagonal made of a horizontal and a vertical component.
    ///
    /// Returns `None` unless `h` is horizontal and `v` vertical.
    pub fn combine(h: Direction, v: Direction) -> Option<Direction> {
        if !h.is_horizontal() || !matches!(v, Direction::Down | Direction::Up) {
            return None;
        }
        let d = h.delta() + v.delta();
        Direction::from_delta(d.x, d.y)
    }

    /// The opposite direction.
    #[inline]
    pub const fn reverse(self) -> Direction {
        match self {
            Direction::DownLeft => Direction::UpRight,
            Direction::Down => Direction::Up,
            Direction::DownRight => Direction::UpLeft,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::UpLeft => Direction::DownRight,
            Direction::Up => Direction::Down,
            Direction::UpRight => Direction::DownLeft,
        }
    }

    /// The two orthogonal directions perpendicular to an orthogonal move,
    /// positive axis first: `[Down, Up]` for horizontal moves and
    /// `[Right, Left]` for vertical ones.
    ///
    /// A diagonal yields its own components, horizontal first.
    pub const fn perpendiculars(self) -> [Direction; 2] {
        match self {
            Direction::Left | Direction::Right => [Direction::Down, Direction::Up],
            Direction::Down | Direction::Up => [Direction::Right, Direction::Left],
            Direction::DownLeft => [Direction::Left, Direction::Down],
            Direction::DownRight => [Direction::Right, Direction::Down],
            Direction::UpLeft => [Direction::Left, Direction::Up],
            Direction::UpRight => [Direction::Right, Direction::Up],
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, u8> {
        Direction::from_code(code).ok_or(code)
    }
}

impl From<Direction> for u8 {
    fn from(d: Direction) -> u8 {
        d.code()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Numpad code of an optional move: `0` means "stay put".
#[inline]
pub fn direction_code(dir: Option<Direction>) -> u8 {
    dir.map_or(0, Direction::code)
}
