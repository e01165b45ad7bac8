//! Raster rendering of the occupancy grid.
//!
//! Each cell maps to a fixed color. Reserved codes get a sentinel color so
//! anything the codec carried opaquely shows up in the image instead of
//! disappearing silently. PNG encoding itself happens at the CLI boundary
//! through the `image` crate.

use image::{Rgb, RgbImage};

use crate::core::CellCode;
use crate::grid::OccupancyGrid;

/// Color for unexplored cells
pub const UNEXPLORED_COLOR: Rgb<u8> = Rgb([48, 146, 239]);
/// Color for floor cells
pub const FLOOR_COLOR: Rgb<u8> = Rgb([87, 174, 255]);
/// Color for wall cells
pub const WALL_COLOR: Rgb<u8> = Rgb([173, 223, 255]);
/// Sentinel color for reserved cell codes
pub const RESERVED_COLOR: Rgb<u8> = Rgb([255, 0, 255]);

/// Color for a single cell code
#[inline]
pub fn cell_color(code: CellCode) -> Rgb<u8> {
    match code {
        CellCode::Unexplored => UNEXPLORED_COLOR,
        CellCode::Floor => FLOOR_COLOR,
        CellCode::Wall => WALL_COLOR,
        CellCode::Reserved(_) => RESERVED_COLOR,
    }
}

/// Render the grid to an RGB image, one pixel per cell
pub fn render(grid: &OccupancyGrid) -> RgbImage {
    let mut img = RgbImage::new(grid.width(), grid.height());
    for (i, &raw) in grid.cells_raw().iter().enumerate() {
        let x = (i as u32) % grid.width();
        let y = (i as u32) / grid.width();
        img.put_pixel(x, y, cell_color(CellCode::from_raw(raw)));
    }
    img
}
