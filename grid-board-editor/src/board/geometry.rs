use bevy::math::Vec2;
use constants::board::TILE_SPAN;
use serde::{Deserialize, Serialize};

/// Integer grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: u32,
    pub z: u32,
}

impl Cell {
    pub const fn new(x: u32, z: u32) -> Self {
        Self { x, z }
    }

    /// Human-readable coordinate, column letter then 1-based row (`C4`).
    pub fn label(&self) -> String {
        format!("{}{}", column_letter(self.x), self.z + 1)
    }

    pub fn in_bounds(&self, size: u32) -> bool {
        self.x < size && self.z < size
    }

    /// Checkerboard parity. Dark cells take the second tile colour.
    pub fn is_dark(&self) -> bool {
        (self.x + self.z) % 2 == 1
    }
}

pub fn column_letter(x: u32) -> char {
    char::from_u32('A' as u32 + x).unwrap_or('?')
}

/// Distance from the board centre to the centre of the first tile.
pub fn board_offset(size: u32) -> f32 {
    (size as f32 * TILE_SPAN) / 2.0 - TILE_SPAN / 2.0
}

/// Full edge length of the board in world units.
pub fn board_extent(size: u32) -> f32 {
    size as f32 * TILE_SPAN
}

/// Centre of `cell` on the XZ plane, returned as `(px, pz)`.
pub fn cell_to_world(cell: Cell, size: u32) -> Vec2 {
    let offset = board_offset(size);
    Vec2::new(
        cell.x as f32 * TILE_SPAN - offset,
        cell.z as f32 * TILE_SPAN - offset,
    )
}

/// Inverse of [`cell_to_world`]. `None` when the point lies off the board.
pub fn world_to_cell(px: f32, pz: f32, size: u32) -> Option<Cell> {
    if !px.is_finite() || !pz.is_finite() {
        return None;
    }

    let offset = board_offset(size) + TILE_SPAN / 2.0;
    let fx = ((px + offset) / TILE_SPAN).floor();
    let fz = ((pz + offset) / TILE_SPAN).floor();

    if fx < 0.0 || fz < 0.0 {
        return None;
    }

    let cell = Cell::new(fx as u32, fz as u32);
    cell.in_bounds(size).then_some(cell)
}
