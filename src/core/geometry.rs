//! Read-only geometry carried by the auxiliary map blocks.
//!
//! Paths, zones and virtual walls use the same map-native millimeter
//! coordinates as poses. None of them are mutated by the editor; zone and
//! virtual-wall blocks are distinct from the WALL cell code on the grid.

/// A single point on a movement path, in millimeters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PathPoint {
    /// X position in millimeters
    pub x: i32,
    /// Y position in millimeters
    pub y: i32,
}

impl PathPoint {
    /// Create a new path point
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An ordered sequence of points describing historical or planned movement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TracePath {
    /// Waypoints along the path
    pub points: Vec<PathPoint>,
}

impl TracePath {
    /// Create an empty path
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Number of points
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A zoned-cleaning rectangle in map-native millimeters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Zone {
    /// Left edge in millimeters
    pub x1: i32,
    /// Top edge in millimeters
    pub y1: i32,
    /// Right edge in millimeters
    pub x2: i32,
    /// Bottom edge in millimeters
    pub y2: i32,
}

/// A virtual wall segment in map-native millimeters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VirtualWall {
    /// Segment start X in millimeters
    pub x1: i32,
    /// Segment start Y in millimeters
    pub y1: i32,
    /// Segment end X in millimeters
    pub x2: i32,
    /// Segment end Y in millimeters
    pub y2: i32,
}
