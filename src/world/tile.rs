//! Tile definitions
//!
//! Terrain kinds and their display properties.

use serde::{Deserialize, Serialize};

/// Terrain kinds, with their stable map codes
///
/// The numeric codes are part of the map format: grass is 1, water is 2,
/// forest is 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileKind {
    Grass = 1,
    Water = 2,
    Forest = 3,
}

impl TileKind {
    /// Stable numeric code for this kind
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a kind by its numeric code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(TileKind::Grass),
            2 => Some(TileKind::Water),
            3 => Some(TileKind::Forest),
            _ => None,
        }
    }

    /// Can entities stand on this tile?
    pub fn is_walkable(self) -> bool {
        !matches!(self, TileKind::Water)
    }

    pub fn glyph(self) -> char {
        match self {
            TileKind::Grass => '.',
            TileKind::Water => '~',
            TileKind::Forest => '♣',
        }
    }

    pub fn fg_color(self) -> (u8, u8, u8) {
        match self {
            TileKind::Grass => (110, 160, 70),
            TileKind::Water => (70, 110, 200),
            TileKind::Forest => (40, 110, 50),
        }
    }

    pub fn bg_color(self) -> (u8, u8, u8) {
        match self {
            TileKind::Grass => (25, 35, 18),
            TileKind::Water => (15, 25, 50),
            TileKind::Forest => (12, 28, 15),
        }
    }
}
