//! Pose type for the robot and charger positions.
//!
//! Poses are stored map-native: millimeters for position, whole degrees for
//! the heading, exactly as the firmware writes them. They are read-only in
//! this tool; the editor never touches pose blocks.

use super::transform::MapTransform;

/// A position plus orientation angle in map-native units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pose {
    /// X position in millimeters
    pub x: i32,
    /// Y position in millimeters
    pub y: i32,
    /// Heading angle in degrees
    pub angle: i32,
}

impl Pose {
    /// Create a new pose
    #[inline]
    pub fn new(x: i32, y: i32, angle: i32) -> Self {
        Self { x, y, angle }
    }

    /// Position in meters
    #[inline]
    pub fn position_m(self) -> (f32, f32) {
        (self.x as f32 / 1000.0, self.y as f32 / 1000.0)
    }

    /// Grid cell this pose falls in, given the map's transform
    #[inline]
    pub fn to_cell(self, transform: &MapTransform) -> (i64, i64) {
        let (wx, wy) = self.position_m();
        transform.world_to_cell(wx, wy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_m() {
        let pose = Pose::new(2500, -1250, 90);
        assert_eq!(pose.position_m(), (2.5, -1.25));
    }

    #[test]
    fn test_to_cell() {
        let t = MapTransform::new(0.0, 0.0, 0.05);
        let pose = Pose::new(1000, 500, 0);
        assert_eq!(pose.to_cell(&t), (20, 10));
    }
}
