//! Per-type block payload decoders.
//!
//! Each decoder turns a [`RawBlock`] payload into a typed value. Decoders
//! fail only on structurally bad payloads (short buffers, misaligned point
//! arrays); valid-but-unexpected values such as unrecognized cell codes are
//! carried opaquely so re-encoding stays lossless.

use crate::core::{MapTransform, PathPoint, Pose, TracePath, VirtualWall, Zone};
use crate::error::{Error, Result};
use crate::format::block::RawBlock;
use crate::grid::OccupancyGrid;

/// Image block header extension size: left, top, width, height (4 x u32)
pub const IMAGE_EXTENSION_SIZE: usize = 16;

/// Pose payload size: x, y, angle (3 x i32)
pub const POSE_PAYLOAD_SIZE: usize = 12;

/// Transform payload size: origin_x, origin_y, resolution (3 x f32)
pub const TRANSFORM_PAYLOAD_SIZE: usize = 12;

/// Bytes per path point (x i32, y i32)
pub const PATH_POINT_SIZE: usize = 8;

/// Bytes per zone or virtual wall rectangle (4 x i32)
pub const RECT_ENTRY_SIZE: usize = 16;

fn parse_error(block: &RawBlock, reason: impl Into<String>) -> Error {
    Error::Parse {
        block_type: block.block_type.tag(),
        offset: block.offset,
        reason: reason.into(),
    }
}

fn read_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

fn read_i32(buf: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

fn read_f32(buf: &[u8], at: usize) -> f32 {
    f32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

/// Decode the occupancy image block.
///
/// The header extension declares the grid's frame offset and dimensions;
/// the payload is one raw cell byte per cell, row-major.
pub fn decode_image(block: &RawBlock) -> Result<OccupancyGrid> {
    let ext = block.extension();
    if ext.len() < IMAGE_EXTENSION_SIZE {
        return Err(parse_error(
            block,
            format!("image header extension too short: {} bytes", ext.len()),
        ));
    }

    let left = read_u32(ext, 0);
    let top = read_u32(ext, 4);
    let width = read_u32(ext, 8);
    let height = read_u32(ext, 12);

    let expected = width as u64 * height as u64;
    if block.payload.len() as u64 != expected {
        return Err(parse_error(
            block,
            format!(
                "image payload is {} bytes, expected {}x{} = {}",
                block.payload.len(),
                width,
                height,
                expected
            ),
        ));
    }

    log::debug!(
        "decoded image block: {}x{} cells at offset ({}, {})",
        width,
        height,
        left,
        top
    );

    Ok(OccupancyGrid::from_raw_parts(
        block.payload.clone(),
        width,
        height,
        left,
        top,
    ))
}

/// Decode a robot or charger pose block.
///
/// Reads the leading 12 bytes; trailing bytes are tolerated (newer firmware
/// appends fields) and preserved through the verbatim block on re-encode.
pub fn decode_pose(block: &RawBlock) -> Result<Pose> {
    if block.payload.len() < POSE_PAYLOAD_SIZE {
        return Err(parse_error(
            block,
            format!("pose payload too short: {} bytes", block.payload.len()),
        ));
    }
    Ok(Pose::new(
        read_i32(&block.payload, 0),
        read_i32(&block.payload, 4),
        read_i32(&block.payload, 8),
    ))
}

/// Decode a cleaned-area or goto path block
pub fn decode_path(block: &RawBlock) -> Result<TracePath> {
    if block.payload.len() % PATH_POINT_SIZE != 0 {
        return Err(parse_error(
            block,
            format!(
                "path payload of {} bytes is not a multiple of {}",
                block.payload.len(),
                PATH_POINT_SIZE
            ),
        ));
    }
    let points = block
        .payload
        .chunks_exact(PATH_POINT_SIZE)
        .map(|chunk| PathPoint::new(read_i32(chunk, 0), read_i32(chunk, 4)))
        .collect();
    Ok(TracePath { points })
}

fn decode_rect_entries(block: &RawBlock, kind: &str) -> Result<Vec<[i32; 4]>> {
    if block.payload.len() % RECT_ENTRY_SIZE != 0 {
        return Err(parse_error(
            block,
            format!(
                "{} payload of {} bytes is not a multiple of {}",
                kind,
                block.payload.len(),
                RECT_ENTRY_SIZE
            ),
        ));
    }
    Ok(block
        .payload
        .chunks_exact(RECT_ENTRY_SIZE)
        .map(|chunk| {
            [
                read_i32(chunk, 0),
                read_i32(chunk, 4),
                read_i32(chunk, 8),
                read_i32(chunk, 12),
            ]
        })
        .collect())
}

/// Decode the zoned-cleaning block
pub fn decode_zones(block: &RawBlock) -> Result<Vec<Zone>> {
    Ok(decode_rect_entries(block, "zone")?
        .into_iter()
        .map(|[x1, y1, x2, y2]| Zone { x1, y1, x2, y2 })
        .collect())
}

/// Decode the virtual walls block
pub fn decode_walls(block: &RawBlock) -> Result<Vec<VirtualWall>> {
    Ok(decode_rect_entries(block, "virtual wall")?
        .into_iter()
        .map(|[x1, y1, x2, y2]| VirtualWall { x1, y1, x2, y2 })
        .collect())
}

/// Decode the map-to-world transform block
pub fn decode_transform(block: &RawBlock) -> Result<MapTransform> {
    if block.payload.len() < TRANSFORM_PAYLOAD_SIZE {
        return Err(parse_error(
            block,
            format!(
                "transform payload too short: {} bytes",
                block.payload.len()
            ),
        ));
    }
    let transform = MapTransform::new(
        read_f32(&block.payload, 0),
        read_f32(&block.payload, 4),
        read_f32(&block.payload, 8),
    );
    if !(transform.resolution.is_finite() && transform.resolution > 0.0) {
        return Err(parse_error(
            block,
            format!("non-positive resolution {}", transform.resolution),
        ));
    }
    Ok(transform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellCode;
    use crate::format::block::BlockType;

    fn image_extension(left: u32, top: u32, width: u32, height: u32) -> Vec<u8> {
        let mut ext = Vec::with_capacity(IMAGE_EXTENSION_SIZE);
        ext.extend_from_slice(&left.to_le_bytes());
        ext.extend_from_slice(&top.to_le_bytes());
        ext.extend_from_slice(&width.to_le_bytes());
        ext.extend_from_slice(&height.to_le_bytes());
        ext
    }

    #[test]
    fn test_decode_image() {
        let ext = image_extension(5, 7, 3, 2);
        let payload = vec![0x00, 0xFF, 0x01, 0x00, 0x2A, 0xFF];
        let block = RawBlock::new(BlockType::Image, &ext, payload);

        let grid = decode_image(&block).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.left(), 5);
        assert_eq!(grid.top(), 7);
        assert_eq!(grid.get(1, 0), Some(CellCode::Floor));
        assert_eq!(grid.get(2, 0), Some(CellCode::Wall));
        assert_eq!(grid.get(1, 1), Some(CellCode::Reserved(0x2A)));
    }

    #[test]
    fn test_decode_image_size_mismatch() {
        let ext = image_extension(0, 0, 4, 4);
        let block = RawBlock::new(BlockType::Image, &ext, vec![0u8; 15]);
        assert!(matches!(
            decode_image(&block),
            Err(Error::Parse { block_type: 2, .. })
        ));
    }

    #[test]
    fn test_decode_pose() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&2500i32.to_le_bytes());
        payload.extend_from_slice(&(-300i32).to_le_bytes());
        payload.extend_from_slice(&90i32.to_le_bytes());
        let block = RawBlock::new(BlockType::RobotPose, &[], payload);

        assert_eq!(decode_pose(&block).unwrap(), Pose::new(2500, -300, 90));
    }

    #[test]
    fn test_decode_pose_tolerates_trailing_bytes() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1i32.to_le_bytes());
        payload.extend_from_slice(&2i32.to_le_bytes());
        payload.extend_from_slice(&3i32.to_le_bytes());
        payload.extend_from_slice(&[0xDE, 0xAD]);
        let block = RawBlock::new(BlockType::ChargerPose, &[], payload);

        assert_eq!(decode_pose(&block).unwrap(), Pose::new(1, 2, 3));
    }

    #[test]
    fn test_decode_path_misaligned() {
        let block = RawBlock::new(BlockType::CleanedPath, &[], vec![0u8; 13]);
        assert!(matches!(
            decode_path(&block),
            Err(Error::Parse { block_type: 3, .. })
        ));
    }

    #[test]
    fn test_decode_path() {
        let mut payload = Vec::new();
        for (x, y) in [(0i32, 0i32), (100, 50), (-20, 75)] {
            payload.extend_from_slice(&x.to_le_bytes());
            payload.extend_from_slice(&y.to_le_bytes());
        }
        let block = RawBlock::new(BlockType::CleanedPath, &[], payload);

        let path = decode_path(&block).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.points[2], PathPoint::new(-20, 75));
    }

    #[test]
    fn test_decode_zones_and_walls() {
        let mut payload = Vec::new();
        for v in [100i32, 200, 300, 400] {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        let zones =
            decode_zones(&RawBlock::new(BlockType::Zones, &[], payload.clone())).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].x2, 300);

        let walls = decode_walls(&RawBlock::new(BlockType::VirtualWalls, &[], payload)).unwrap();
        assert_eq!(walls.len(), 1);
        assert_eq!(walls[0].y2, 400);
    }

    #[test]
    fn test_decode_transform() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&(-2.0f32).to_le_bytes());
        payload.extend_from_slice(&(-1.5f32).to_le_bytes());
        payload.extend_from_slice(&0.05f32.to_le_bytes());
        let block = RawBlock::new(BlockType::Transform, &[], payload);

        let t = decode_transform(&block).unwrap();
        assert_eq!(t.resolution, 0.05);
        assert_eq!(t.world_to_cell(-2.0, -1.5), (0, 0));
    }

    #[test]
    fn test_decode_transform_rejects_zero_resolution() {
        let mut payload = vec![0u8; TRANSFORM_PAYLOAD_SIZE];
        payload[8..12].copy_from_slice(&0.0f32.to_le_bytes());
        let block = RawBlock::new(BlockType::Transform, &[], payload);
        assert!(decode_transform(&block).is_err());
    }
}
