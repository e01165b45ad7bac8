//! Rectangular edit operations on the occupancy grid.
//!
//! Rectangles are inclusive on all four edges, matching the device tooling:
//! `set_floor` on (2,2)-(5,5) relabels 16 cells. Out-of-bounds or inverted
//! rectangles are rejected before any cell is touched, so a failed edit
//! leaves the grid exactly as it was. All operations are idempotent and
//! never change grid dimensions or any non-grid block.

use std::str::FromStr;

use crate::core::{CellCode, MapTransform};
use crate::error::{Error, Result};
use crate::grid::OccupancyGrid;

/// An inclusive rectangle in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Left edge (inclusive)
    pub x1: u32,
    /// Top edge (inclusive)
    pub y1: u32,
    /// Right edge (inclusive)
    pub x2: u32,
    /// Bottom edge (inclusive)
    pub y2: u32,
}

impl Rect {
    /// Create a rectangle; validation happens against a grid at edit time
    #[inline]
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Convert a metric rectangle (meters, world frame) to cell coordinates
    /// using the map's transform block.
    ///
    /// Corners are floored into their containing cells. A rectangle that
    /// falls outside the positive cell quadrant is rejected here; grid-size
    /// validation still happens at edit time.
    pub fn from_world(
        transform: &MapTransform,
        wx1: f32,
        wy1: f32,
        wx2: f32,
        wy2: f32,
    ) -> Result<Self> {
        let (x1, y1) = transform.world_to_cell(wx1, wy1);
        let (x2, y2) = transform.world_to_cell(wx2, wy2);
        if x1 < 0 || y1 < 0 || x1 > x2 || y1 > y2 || x2 > u32::MAX as i64 || y2 > u32::MAX as i64 {
            return Err(Error::InvalidWorldRectangle {
                wx1,
                wy1,
                wx2,
                wy2,
                x1,
                y1,
                x2,
                y2,
            });
        }
        Ok(Self::new(x1 as u32, y1 as u32, x2 as u32, y2 as u32))
    }

    /// Reject rectangles that are inverted or reach outside the grid
    fn validate(&self, grid: &OccupancyGrid) -> Result<()> {
        if self.x1 > self.x2
            || self.y1 > self.y2
            || self.x2 >= grid.width()
            || self.y2 >= grid.height()
        {
            return Err(Error::InvalidRectangle {
                x1: self.x1 as i64,
                y1: self.y1 as i64,
                x2: self.x2 as i64,
                y2: self.y2 as i64,
                width: grid.width(),
                height: grid.height(),
            });
        }
        Ok(())
    }
}

impl FromStr for Rect {
    type Err = String;

    /// Parse "x1,y1,x2,y2" as used by the CLI edit flags
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(format!("expected 4 comma-separated integers, got {:?}", s));
        }
        let mut values = [0u32; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part
                .trim()
                .parse()
                .map_err(|e| format!("bad coordinate {:?}: {}", part, e))?;
        }
        Ok(Rect::new(values[0], values[1], values[2], values[3]))
    }
}

/// Relabel every cell inside the rectangle as unexplored
pub fn set_unexplored(grid: &mut OccupancyGrid, rect: Rect) -> Result<()> {
    fill_rect(grid, rect, CellCode::Unexplored)
}

/// Relabel every cell inside the rectangle as floor
pub fn set_floor(grid: &mut OccupancyGrid, rect: Rect) -> Result<()> {
    fill_rect(grid, rect, CellCode::Floor)
}

/// Relabel only the rectangle's one-cell-thick perimeter as wall.
///
/// Interior cells are left unchanged. `x1 == x2` or `y1 == y2` degenerates
/// to a line.
pub fn set_wall(grid: &mut OccupancyGrid, rect: Rect) -> Result<()> {
    rect.validate(grid)?;
    for x in rect.x1..=rect.x2 {
        grid.set(x, rect.y1, CellCode::Wall);
        grid.set(x, rect.y2, CellCode::Wall);
    }
    for y in rect.y1..=rect.y2 {
        grid.set(rect.x1, y, CellCode::Wall);
        grid.set(rect.x2, y, CellCode::Wall);
    }
    Ok(())
}

fn fill_rect(grid: &mut OccupancyGrid, rect: Rect, code: CellCode) -> Result<()> {
    rect.validate(grid)?;
    for y in rect.y1..=rect.y2 {
        for x in rect.x1..=rect.x2 {
            grid.set(x, y, code);
        }
    }
    Ok(())
}
