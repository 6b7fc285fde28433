//! **tilenav-core**: geometry and compass primitives shared by the
//! *tilenav* crates.
//!
//! Grid coordinates grow right (`x`) and down (`y`). Movement directions use
//! the numeric-keypad layout: 2 is down, 4 left, 6 right, 8 up and the odd
//! codes are the diagonals between them.

pub mod direction;
pub mod geom;

pub use direction::{Direction, direction_code};
pub use geom::{Point, Range, RangeIter};
