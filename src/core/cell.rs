//! Cell codes for the occupancy grid.
//!
//! The map stores one byte per cell. Three codes are defined by the format;
//! every other byte is reserved by the firmware and must survive a
//! decode/encode round trip untouched, so it is carried as an opaque value
//! instead of being normalized away.

/// Raw byte for an unexplored cell
pub const RAW_UNEXPLORED: u8 = 0x00;
/// Raw byte for a wall cell
pub const RAW_WALL: u8 = 0x01;
/// Raw byte for a floor cell
pub const RAW_FLOOR: u8 = 0xFF;

/// Decoded cell state.
///
/// - `Unexplored` - never observed by the LIDAR
/// - `Floor` - traversable surface
/// - `Wall` - LIDAR-detected obstacle
/// - `Reserved` - any other byte the firmware wrote; kept verbatim
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellCode {
    /// Cell has never been observed
    #[default]
    Unexplored,

    /// Traversable floor surface
    Floor,

    /// Solid wall or obstacle
    Wall,

    /// Unrecognized code, preserved byte-for-byte on re-encode
    Reserved(u8),
}

impl CellCode {
    /// Decode a raw cell byte
    #[inline]
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            RAW_UNEXPLORED => CellCode::Unexplored,
            RAW_WALL => CellCode::Wall,
            RAW_FLOOR => CellCode::Floor,
            other => CellCode::Reserved(other),
        }
    }

    /// Encode back to the raw cell byte
    #[inline]
    pub fn to_raw(self) -> u8 {
        match self {
            CellCode::Unexplored => RAW_UNEXPLORED,
            CellCode::Wall => RAW_WALL,
            CellCode::Floor => RAW_FLOOR,
            CellCode::Reserved(raw) => raw,
        }
    }

    /// Has this cell been observed?
    #[inline]
    pub fn is_known(self) -> bool {
        self != CellCode::Unexplored
    }

    /// Single character representation for debugging
    pub fn as_char(self) -> char {
        match self {
            CellCode::Unexplored => '?',
            CellCode::Floor => '.',
            CellCode::Wall => '#',
            CellCode::Reserved(_) => '!',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defined_codes() {
        assert_eq!(CellCode::from_raw(RAW_UNEXPLORED), CellCode::Unexplored);
        assert_eq!(CellCode::from_raw(RAW_WALL), CellCode::Wall);
        assert_eq!(CellCode::from_raw(RAW_FLOOR), CellCode::Floor);
    }

    #[test]
    fn test_reserved_codes_round_trip() {
        for raw in 0..=u8::MAX {
            assert_eq!(CellCode::from_raw(raw).to_raw(), raw);
        }
    }

    #[test]
    fn test_is_known() {
        assert!(!CellCode::Unexplored.is_known());
        assert!(CellCode::Floor.is_known());
        assert!(CellCode::Wall.is_known());
        assert!(CellCode::Reserved(0x42).is_known());
    }
}
