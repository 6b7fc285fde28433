//! ASCII grid used by unit tests. `#` is a wall, anything else is floor.

use rand::RngExt;
use tilenav_core::{Direction, Point};

use crate::traits::GridAdapter;

pub(crate) struct AsciiGrid {
    width: i32,
    height: i32,
    cells: Vec<u8>,
}

impl AsciiGrid {
    pub(crate) fn parse(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.len()) as i32;
        let mut cells = Vec::with_capacity((width * height) as usize);
        for row in rows {
            assert_eq!(row.len() as i32, width, "ragged test grid");
            cells.extend_from_slice(row.as_bytes());
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub(crate) fn open(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![b'.'; (width * height) as usize],
        }
    }

    /// Random walls at roughly `density` percent, with `keep` left open.
    pub(crate) fn random(width: i32, height: i32, density: u32, keep: &[Point]) -> Self {
        let mut rng = rand::rng();
        let mut g = Self::open(width, height);
        for i in 0..g.cells.len() {
            if rng.random_range(0..100) < density {
                g.cells[i] = b'#';
            }
        }
        for &p in keep {
            let i = g.index(p);
            g.cells[i] = b'.';
        }
        g
    }

    /// First cell holding `glyph`.
    pub(crate) fn find(&self, glyph: u8) -> Point {
        let i = self
            .cells
            .iter()
            .position(|&c| c == glyph)
            .expect("glyph not in grid");
        self.point(i)
    }

    pub(crate) fn is_wall(&self, p: Point) -> bool {
        self.cells[self.index(p)] == b'#'
    }
}

impl GridAdapter for AsciiGrid {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn passable(&self, p: Point, dir: Direction) -> bool {
        let q = self.step(p, dir);
        self.contains(p) && self.contains(q) && !self.is_wall(q)
    }
}

#[test]
fn ascii_grid_walls_block_entry() {
    let g = AsciiGrid::parse(&["S#", ".."]);
    assert_eq!(g.find(b'S'), Point::ZERO);
    assert!(!g.passable(Point::ZERO, Direction::Right));
    assert!(g.passable(Point::ZERO, Direction::Down));
    assert!(!g.passable(Point::ZERO, Direction::Up));
    assert!(g.passable_diagonally(Point::ZERO, Direction::Right, Direction::Down));
    assert!(!AsciiGrid::parse(&[".#", "#."]).can_move(Point::ZERO, Direction::DownRight));
}
