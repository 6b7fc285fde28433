use std::f64::consts::SQRT_2;

use tilenav_core::{Direction, Point};

/// Manhattan (L1) length of the offset `d`.
#[inline]
pub fn manhattan(d: Point) -> f64 {
    f64::from(d.x.abs() + d.y.abs())
}

/// Octile length of the offset `d`: diagonal steps cost √2, straight steps 1.
#[inline]
pub fn octile(d: Point) -> f64 {
    let dx = d.x.abs();
    let dy = d.y.abs();
    f64::from(dx.min(dy)) * SQRT_2 + f64::from((dx - dy).abs())
}

/// Cost of a single step in `dir`.
#[inline]
pub fn step_cost(dir: Direction) -> f64 {
    if dir.is_diagonal() { SQRT_2 } else { 1.0 }
}
