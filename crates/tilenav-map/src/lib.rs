//! Tile maps for tilenav: per-direction passage, looping edges, occupancy by
//! other agents and a text form.
//!
//! [`TileMap`] implements [`GridAdapter`](tilenav_paths::GridAdapter), so it
//! can be handed straight to a [`PathEngine`](tilenav_paths::PathEngine).

pub mod ascii;
pub mod map;

pub use ascii::MapParseError;
pub use map::{Tile, TileMap};
