//! Map data structure
//!
//! The 2D grid of terrain the game world lives on. Generation is banded and
//! fully deterministic: the same dimensions always produce the same map.

use super::tile::TileKind;
use thiserror::Error;

/// Errors from map queries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("tile coordinates ({x}, {y}) out of bounds for {width}x{height} map")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
}

/// A world map
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
}

impl Map {
    /// Generate a map of the given dimensions
    ///
    /// Terrain is assigned purely by the vertical third a row falls in:
    /// grass on top, water in the middle, forest at the bottom. No
    /// randomness; calling this twice with the same dimensions yields
    /// identical maps.
    pub fn generate(width: i32, height: i32) -> Self {
        let mut tiles = Vec::with_capacity((width.max(0) * height.max(0)) as usize);
        for y in 0..height {
            for _x in 0..width {
                tiles.push(Self::band_for_row(y, height));
            }
        }
        log::debug!("Generated {}x{} map ({} tiles)", width, height, tiles.len());
        Self {
            width,
            height,
            tiles,
        }
    }

    /// Terrain band for a row, by vertical third
    ///
    /// Integer comparisons `3y < h` and `3y < 2h` match the real-valued
    /// thresholds `y < h/3` and `y < 2h/3` for every integer row.
    fn band_for_row(y: i32, height: i32) -> TileKind {
        if 3 * y < height {
            TileKind::Grass
        } else if 3 * y < 2 * height {
            TileKind::Water
        } else {
            TileKind::Forest
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Get the tile at a position
    ///
    /// Out-of-bounds coordinates in any direction are an error, not a
    /// default tile: coordinates come from caller arithmetic and a bad one
    /// is a bug worth surfacing.
    pub fn tile(&self, x: i32, y: i32) -> Result<TileKind, WorldError> {
        if self.in_bounds(x, y) {
            Ok(self.tiles[self.xy_to_idx(x, y)])
        } else {
            Err(WorldError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Check if a position is walkable (in bounds and not water)
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).map_or(false, |t| t.is_walkable())
    }

    /// All walkable positions, in row-major order (for spawning)
    pub fn walkable_positions(&self) -> Vec<(i32, i32)> {
        let mut positions = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.tiles[self.xy_to_idx(x, y)].is_walkable() {
                    positions.push((x, y));
                }
            }
        }
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        let a = Map::generate(40, 30);
        let b = Map::generate(40, 30);
        assert_eq!(a, b);
    }

    #[test]
    fn test_vertical_bands() {
        let width = 12;
        let height = 10;
        let map = Map::generate(width, height);

        for y in 0..height {
            for x in 0..width {
                let kind = map.tile(x, y).unwrap();
                // Same thresholds as the real-valued y < h/3 and y < 2h/3
                let expected = if 3 * y < height {
                    TileKind::Grass
                } else if 3 * y < 2 * height {
                    TileKind::Water
                } else {
                    TileKind::Forest
                };
                assert_eq!(kind, expected, "wrong band at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_band_codes() {
        // height 9 splits into thirds exactly: rows 0-2, 3-5, 6-8
        let map = Map::generate(5, 9);
        assert_eq!(map.tile(0, 0).unwrap().code(), 1);
        assert_eq!(map.tile(0, 2).unwrap().code(), 1);
        assert_eq!(map.tile(0, 3).unwrap().code(), 2);
        assert_eq!(map.tile(0, 5).unwrap().code(), 2);
        assert_eq!(map.tile(0, 6).unwrap().code(), 3);
        assert_eq!(map.tile(0, 8).unwrap().code(), 3);
    }

    #[test]
    fn test_out_of_bounds_all_four_directions() {
        let map = Map::generate(8, 6);

        assert!(map.tile(-1, 3).is_err()); // west
        assert!(map.tile(8, 3).is_err()); // east
        assert!(map.tile(4, -1).is_err()); // north
        assert!(map.tile(4, 6).is_err()); // south

        // In-bounds corners still work
        assert!(map.tile(0, 0).is_ok());
        assert!(map.tile(7, 5).is_ok());
    }

    #[test]
    fn test_out_of_bounds_error_reports_coordinates() {
        let map = Map::generate(8, 6);
        let err = map.tile(9, -2).unwrap_err();
        assert_eq!(
            err,
            WorldError::OutOfBounds {
                x: 9,
                y: -2,
                width: 8,
                height: 6
            }
        );
    }

    #[test]
    fn test_walkable_positions_skip_water() {
        let map = Map::generate(6, 9);
        let walkable = map.walkable_positions();

        // Middle third is water, so two thirds of the map remains
        assert_eq!(walkable.len(), 6 * 6);
        assert!(walkable.iter().all(|&(x, y)| map.is_walkable(x, y)));
        assert!(!map.is_walkable(0, 4));
    }
}
