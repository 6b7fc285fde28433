//! Text form of tile maps, one glyph per cell.
//!
//! | glyph | meaning                              |
//! |-------|--------------------------------------|
//! | `#`   | wall                                 |
//! | `.`   | floor                                |
//! | `o`   | floor taken by another agent         |
//! | `-`   | passable left and right only         |
//! | `\|`  | passable up and down only            |
//! | `1-e` | any other passage mask, in hex       |

use std::fmt;
use std::str::FromStr;

use tilenav_core::Point;

use crate::map::{Tile, TileMap};

const OCCUPIED: char = 'o';

impl Tile {
    /// Glyph of the tile in the text form.
    pub fn glyph(self) -> char {
        match self {
            Tile::WALL => '#',
            Tile::FLOOR => '.',
            Tile::HORIZONTAL => '-',
            Tile::VERTICAL => '|',
            t => char::from_digit(u32::from(t.bits()), 16).unwrap_or('?'),
        }
    }

    /// Tile for a glyph, or `None` if the glyph names none.
    pub fn from_glyph(ch: char) -> Option<Tile> {
        match ch {
            '#' => Some(Tile::WALL),
            '.' => Some(Tile::FLOOR),
            '-' => Some(Tile::HORIZONTAL),
            '|' => Some(Tile::VERTICAL),
            _ => ch
                .to_digit(16)
                .filter(|_| !ch.is_ascii_uppercase())
                .map(|d| Tile::from_bits(d as u8)),
        }
    }
}

/// Errors that can occur when parsing a tile map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapParseError {
    /// The text has no cells.
    Empty,
    /// A row's width differs from the first row's.
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A glyph that names no tile.
    InvalidGlyph { ch: char, pos: Point },
}

impl fmt::Display for MapParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "map: no cells"),
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "map: line {line} has {found} cells, expected {expected}"
            ),
            Self::InvalidGlyph { ch, pos } => {
                write!(f, "map contains invalid glyph \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for MapParseError {}

impl TileMap {
    /// Parse a map from its text form. Surrounding whitespace is ignored and
    /// every row must have the same width.
    pub fn parse(s: &str) -> Result<Self, MapParseError> {
        let rows: Vec<&str> = s.trim().lines().map(str::trim).collect();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if width == 0 {
            return Err(MapParseError::Empty);
        }

        let mut map = TileMap::new(width as i32, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MapParseError::InconsistentWidth {
                    line: y + 1,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                if ch == OCCUPIED {
                    map.occupy(pos);
                    continue;
                }
                let tile = Tile::from_glyph(ch).ok_or(MapParseError::InvalidGlyph { ch, pos })?;
                map.set(pos, tile);
            }
        }
        Ok(map)
    }
}

impl FromStr for TileMap {
    type Err = MapParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TileMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.bounds();
        for y in 0..b.height() {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..b.width() {
                let p = Point::new(x, y);
                let tile = self.at(p).unwrap_or_default();
                let ch = if self.is_occupied(p) && tile == Tile::FLOOR {
                    OCCUPIED
                } else {
                    tile.glyph()
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilenav_core::Direction;

    const ROOM: &str = "
        #####
        #.-.#
        #|o.#
        #####
    ";

    #[test]
    fn parse_room() {
        let m: TileMap = ROOM.parse().unwrap();
        assert_eq!((m.bounds().width(), m.bounds().height()), (5, 4));
        assert_eq!(m.at(Point::new(0, 0)), Some(Tile::WALL));
        assert_eq!(m.at(Point::new(2, 1)), Some(Tile::HORIZONTAL));
        assert_eq!(m.at(Point::new(1, 2)), Some(Tile::VERTICAL));
        assert_eq!(m.at(Point::new(2, 2)), Some(Tile::FLOOR));
        assert!(m.is_occupied(Point::new(2, 2)));
    }

    #[test]
    fn display_round_trips() {
        let m = TileMap::parse(ROOM).unwrap();
        let text = m.to_string();
        assert_eq!(text, "#####\n#.-.#\n#|o.#\n#####");
        assert_eq!(TileMap::parse(&text).unwrap(), m);
    }

    #[test]
    fn hex_masks() {
        let t = Tile::from_glyph('a').unwrap();
        assert!(t.allows(Direction::Left));
        assert!(t.allows(Direction::Up));
        assert!(!t.allows(Direction::Down));
        assert_eq!(t.glyph(), 'a');
        assert_eq!(Tile::from_glyph('A'), None);
        assert_eq!(Tile::from_glyph('0'), Some(Tile::WALL));
        assert_eq!(Tile::WALL.glyph(), '#');
    }

    #[test]
    fn parse_errors() {
        assert_eq!(TileMap::parse("  \n "), Err(MapParseError::Empty));
        assert_eq!(
            TileMap::parse("...\n.."),
            Err(MapParseError::InconsistentWidth {
                line: 2,
                expected: 3,
                found: 2
            })
        );
        let err = TileMap::parse("..\n.x").unwrap_err();
        assert_eq!(
            err,
            MapParseError::InvalidGlyph {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().ends_with("at (1, 1)"));
    }
}
