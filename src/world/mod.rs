//! World module
//!
//! Map data structures, tiles, and deterministic terrain generation.

pub mod map;
pub mod tile;

pub use map::{Map, WorldError};
pub use tile::TileKind;
