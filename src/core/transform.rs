//! Map-to-world transform.
//!
//! The transform block carries the world coordinates of cell (0, 0) and the
//! metric size of one cell. It is the only place where metric and cell
//! coordinate systems meet: conversion happens at the boundary where
//! external input is accepted, never inside the grid storage.

/// Mapping between grid cell coordinates and real-world metric coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapTransform {
    /// World X of cell (0, 0) in meters
    pub origin_x: f32,
    /// World Y of cell (0, 0) in meters
    pub origin_y: f32,
    /// Cell size in meters
    pub resolution: f32,
}

impl MapTransform {
    /// Create a new transform
    #[inline]
    pub fn new(origin_x: f32, origin_y: f32, resolution: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            resolution,
        }
    }

    /// Convert world coordinates (meters) to the containing grid cell.
    ///
    /// The result may lie outside the grid; callers validate against the
    /// grid dimensions.
    #[inline]
    pub fn world_to_cell(&self, wx: f32, wy: f32) -> (i64, i64) {
        let x = ((wx - self.origin_x) / self.resolution).floor() as i64;
        let y = ((wy - self.origin_y) / self.resolution).floor() as i64;
        (x, y)
    }

    /// Convert a grid cell to world coordinates of its center (meters)
    #[inline]
    pub fn cell_to_world(&self, x: u32, y: u32) -> (f32, f32) {
        (
            self.origin_x + (x as f32 + 0.5) * self.resolution,
            self.origin_y + (y as f32 + 0.5) * self.resolution,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_to_cell_floors() {
        let t = MapTransform::new(-1.0, -1.0, 0.05);
        assert_eq!(t.world_to_cell(-1.0, -1.0), (0, 0));
        assert_eq!(t.world_to_cell(-0.951, -0.951), (0, 0));
        assert_eq!(t.world_to_cell(-0.95, -0.95), (1, 1));
        assert_eq!(t.world_to_cell(-1.01, -1.01), (-1, -1));
    }

    #[test]
    fn test_cell_to_world_is_cell_center() {
        let t = MapTransform::new(0.0, 0.0, 0.1);
        let (wx, wy) = t.cell_to_world(3, 7);
        assert!((wx - 0.35).abs() < 1e-6);
        assert!((wy - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_round_trip_through_cell() {
        let t = MapTransform::new(-2.5, 1.25, 0.05);
        let (wx, wy) = t.cell_to_world(40, 12);
        assert_eq!(t.world_to_cell(wx, wy), (40, 12));
    }
}
