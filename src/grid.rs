//! Occupancy grid storage.
//!
//! Cells are stored as raw bytes in a flat row-major array, one byte per
//! cell, exactly as they appear in the image block payload. Reserved codes
//! the firmware wrote are never normalized, so an untouched grid re-encodes
//! byte-for-byte. Dimensions are fixed once decoded; edits only relabel
//! existing cells.

use crate::core::CellCode;

/// The 2D array of cells decoded from the occupancy image block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    /// Raw cell bytes, row-major, `width * height` entries
    cells: Vec<u8>,
    /// Grid width in cells
    width: u32,
    /// Grid height in cells
    height: u32,
    /// Horizontal offset of the grid within the full map frame (cells)
    left: u32,
    /// Vertical offset of the grid within the full map frame (cells)
    top: u32,
}

impl OccupancyGrid {
    /// Create a fully unexplored grid
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_offset(width, height, 0, 0)
    }

    /// Create a fully unexplored grid with a frame offset
    pub fn with_offset(width: u32, height: u32, left: u32, top: u32) -> Self {
        Self {
            cells: vec![CellCode::Unexplored.to_raw(); (width as usize) * (height as usize)],
            width,
            height,
            left,
            top,
        }
    }

    /// Reconstruct a grid from decoded image block fields.
    ///
    /// `cells` must hold exactly `width * height` bytes; callers (the image
    /// decoder) validate this against the block header.
    pub(crate) fn from_raw_parts(
        cells: Vec<u8>,
        width: u32,
        height: u32,
        left: u32,
        top: u32,
    ) -> Self {
        debug_assert_eq!(cells.len(), (width as usize) * (height as usize));
        Self {
            cells,
            width,
            height,
            left,
            top,
        }
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Horizontal offset within the map frame
    #[inline]
    pub fn left(&self) -> u32 {
        self.left
    }

    /// Vertical offset within the map frame
    #[inline]
    pub fn top(&self) -> u32 {
        self.top
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Raw access to the cell byte array
    #[inline]
    pub fn cells_raw(&self) -> &[u8] {
        &self.cells
    }

    /// Check if cell coordinates are within bounds
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Flat index of a cell, or None if out of bounds
    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if self.contains(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the raw byte of a cell
    #[inline]
    pub fn get_raw(&self, x: u32, y: u32) -> Option<u8> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Get the decoded code of a cell
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<CellCode> {
        self.get_raw(x, y).map(CellCode::from_raw)
    }

    /// Set a cell to the given code.
    /// Returns true if the cell was within bounds and updated.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, code: CellCode) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = code.to_raw();
                true
            }
            None => false,
        }
    }

    /// Count cells per decoded state: (unexplored, floor, wall, reserved)
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        let mut counts = (0, 0, 0, 0);
        for &raw in &self.cells {
            match CellCode::from_raw(raw) {
                CellCode::Unexplored => counts.0 += 1,
                CellCode::Floor => counts.1 += 1,
                CellCode::Wall => counts.2 += 1,
                CellCode::Reserved(_) => counts.3 += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_unexplored() {
        let grid = OccupancyGrid::new(4, 3);
        assert_eq!(grid.cell_count(), 12);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(grid.get(x, y), Some(CellCode::Unexplored));
            }
        }
    }

    #[test]
    fn test_set_get() {
        let mut grid = OccupancyGrid::new(4, 3);
        assert!(grid.set(2, 1, CellCode::Wall));
        assert_eq!(grid.get(2, 1), Some(CellCode::Wall));
        assert_eq!(grid.get(1, 2), Some(CellCode::Unexplored));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = OccupancyGrid::new(4, 3);
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.get(0, 3), None);
        assert!(!grid.set(4, 3, CellCode::Floor));
    }

    #[test]
    fn test_reserved_codes_survive() {
        let mut grid = OccupancyGrid::new(2, 2);
        assert!(grid.set(0, 1, CellCode::Reserved(0x7f)));
        assert_eq!(grid.get(0, 1), Some(CellCode::Reserved(0x7f)));
        assert_eq!(grid.get_raw(0, 1), Some(0x7f));
    }

    #[test]
    fn test_counts() {
        let mut grid = OccupancyGrid::new(3, 1);
        grid.set(0, 0, CellCode::Floor);
        grid.set(1, 0, CellCode::Wall);
        assert_eq!(grid.counts(), (1, 1, 1, 0));
    }
}
