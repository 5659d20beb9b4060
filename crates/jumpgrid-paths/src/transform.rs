//! Conversion between world coordinates and cell keys.

use jumpgrid_core::{Point, Vec2};

/// Maps world space onto an unbounded lattice of square cells.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellTransform {
    /// World position of the min corner of cell `(0, 0)`.
    pub origin: Vec2,
    pub cell_size: f64,
}

impl CellTransform {
    pub fn new(origin: Vec2, cell_size: f64) -> Self {
        Self { origin, cell_size }
    }

    /// Cell containing `world`. No bounds check is performed.
    #[inline]
    pub fn world_to_cell(&self, world: Vec2) -> Point {
        Point::new(
            self.axis_to_cell(world.x, self.origin.x),
            self.axis_to_cell(world.y, self.origin.y),
        )
    }

    /// World position of `cell`, offset inside the cell by `anchor`
    /// fractions (`(0.5, 0.5)` is the cell centre).
    #[inline]
    pub fn cell_to_world(&self, cell: Point, anchor: Vec2) -> Vec2 {
        Vec2::new(
            cell.x as f64 * self.cell_size + self.origin.x + self.cell_size * anchor.x,
            cell.y as f64 * self.cell_size + self.origin.y + self.cell_size * anchor.y,
        )
    }

    #[inline]
    fn axis_to_cell(&self, world: f64, origin: f64) -> i32 {
        // `as` saturates, so far-away or non-finite input lands off-map.
        ((world - origin) / self.cell_size).floor() as i32
    }
}
