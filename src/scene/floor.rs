//! Two floor tiles leap-frogging each other for an endless ground.

use super::category::CategoryMask;
use super::geometry::{Rect, Size, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorTile {
    /// Bottom-left corner.
    pub origin: Vec2,
    pub size: Size,
}

impl FloorTile {
    pub const CATEGORY: CategoryMask = CategoryMask::FLOOR;

    pub fn frame(&self) -> Rect {
        Rect::anchored(self.origin, self.size)
    }
}

/// Lay both tiles end to end starting at x = 0.
pub fn initial_tiles(size: Size) -> [FloorTile; 2] {
    [
        FloorTile {
            origin: Vec2::ZERO,
            size,
        },
        FloorTile {
            origin: Vec2::new(size.width, 0.0),
            size,
        },
    ]
}

/// Shift both tiles left by `dx`. A tile that has fully left the screen is
/// moved to the right edge of the other one.
pub fn scroll_tiles(tiles: &mut [FloorTile; 2], dx: f64) {
    for tile in tiles.iter_mut() {
        tile.origin.x -= dx;
    }
    if tiles[0].origin.x < -tiles[0].size.width {
        tiles[0].origin.x = tiles[1].origin.x + tiles[1].size.width;
    }
    if tiles[1].origin.x < -tiles[1].size.width {
        tiles[1].origin.x = tiles[0].origin.x + tiles[0].size.width;
    }
}
