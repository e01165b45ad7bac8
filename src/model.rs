//! In-memory map model.
//!
//! [`MapModel`] owns the parsed header, the ordered raw block sequence (for
//! round-trip fidelity) and the decoded views. It is constructed by decoding
//! a byte buffer, optionally mutated through [`grid_mut`](MapModel::grid_mut)
//! by the region editor, and consumed by [`serialize`](MapModel::serialize)
//! or the renderer. The model performs no file I/O; that belongs to the CLI
//! layer.

use crate::core::{MapTransform, Pose, TracePath, VirtualWall, Zone};
use crate::error::{Error, Result};
use crate::format::{decode, encode, BlockReader, BlockType, MapHeader, RawBlock, HEADER_SIZE};
use crate::grid::OccupancyGrid;

/// Decoded map: header, raw blocks, and typed views bound to them.
#[derive(Clone, Debug)]
pub struct MapModel {
    header: MapHeader,
    blocks: Vec<RawBlock>,
    /// Index into `blocks` of the occupancy image block
    image_index: usize,
    grid: OccupancyGrid,
    robot_pose: Option<Pose>,
    charger_pose: Option<Pose>,
    cleaned_path: Option<TracePath>,
    goto_path: Option<TracePath>,
    zones: Vec<Zone>,
    virtual_walls: Vec<VirtualWall>,
    transform: Option<MapTransform>,
}

impl MapModel {
    /// Decode a complete map file.
    ///
    /// Any reader or decoder failure aborts the whole load; no partially
    /// populated model is ever returned. A checksum mismatch is logged as a
    /// warning but does not fail the load, matching the device tooling.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let header = MapHeader::parse(bytes)?;

        let body = &bytes[HEADER_SIZE..];
        if body.len() != header.data_len as usize {
            return Err(Error::InvalidFormat(format!(
                "header declares {} data bytes but file carries {}",
                header.data_len,
                body.len()
            )));
        }
        if !header.checksum_matches(body) {
            log::warn!("map checksum mismatch: file may be corrupted");
        }

        let blocks: Vec<RawBlock> =
            BlockReader::new(bytes, HEADER_SIZE).collect::<Result<Vec<_>>>()?;
        if blocks.len() != header.block_count as usize {
            return Err(Error::InvalidFormat(format!(
                "header declares {} blocks but {} were parsed",
                header.block_count,
                blocks.len()
            )));
        }

        let mut image: Option<(usize, OccupancyGrid)> = None;
        let mut robot_pose = None;
        let mut charger_pose = None;
        let mut cleaned_path = None;
        let mut goto_path = None;
        let mut zones = Vec::new();
        let mut virtual_walls = Vec::new();
        let mut transform = None;

        for (index, block) in blocks.iter().enumerate() {
            match block.block_type {
                BlockType::Image => {
                    if image.is_some() {
                        return Err(Error::Parse {
                            block_type: block.block_type.tag(),
                            offset: block.offset,
                            reason: "duplicate occupancy image block".to_string(),
                        });
                    }
                    image = Some((index, decode::decode_image(block)?));
                }
                BlockType::RobotPose => robot_pose = Some(decode::decode_pose(block)?),
                BlockType::ChargerPose => charger_pose = Some(decode::decode_pose(block)?),
                BlockType::CleanedPath => cleaned_path = Some(decode::decode_path(block)?),
                BlockType::GotoPath => goto_path = Some(decode::decode_path(block)?),
                BlockType::Zones => zones = decode::decode_zones(block)?,
                BlockType::VirtualWalls => virtual_walls = decode::decode_walls(block)?,
                BlockType::Transform => transform = Some(decode::decode_transform(block)?),
                BlockType::Unknown(tag) => {
                    log::debug!(
                        "carrying unrecognized block {:#06x} ({} bytes) at offset {}",
                        tag,
                        block.encoded_len(),
                        block.offset
                    );
                }
            }
        }

        let (image_index, grid) = image.ok_or_else(|| {
            Error::InvalidFormat("map contains no occupancy image block".to_string())
        })?;

        Ok(Self {
            header,
            blocks,
            image_index,
            grid,
            robot_pose,
            charger_pose,
            cleaned_path,
            goto_path,
            zones,
            virtual_walls,
            transform,
        })
    }

    /// The parsed map header
    #[inline]
    pub fn header(&self) -> &MapHeader {
        &self.header
    }

    /// The live occupancy grid
    #[inline]
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Mutable access to the grid; edits are visible to a later serialize
    #[inline]
    pub fn grid_mut(&mut self) -> &mut OccupancyGrid {
        &mut self.grid
    }

    /// Robot pose, if the capture carried one
    #[inline]
    pub fn robot_pose(&self) -> Option<Pose> {
        self.robot_pose
    }

    /// Charger pose, if the capture carried one
    #[inline]
    pub fn charger_pose(&self) -> Option<Pose> {
        self.charger_pose
    }

    /// Cleaned-area path
    #[inline]
    pub fn cleaned_path(&self) -> Option<&TracePath> {
        self.cleaned_path.as_ref()
    }

    /// Goto path
    #[inline]
    pub fn goto_path(&self) -> Option<&TracePath> {
        self.goto_path.as_ref()
    }

    /// Zoned-cleaning rectangles
    #[inline]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Virtual wall segments
    #[inline]
    pub fn virtual_walls(&self) -> &[VirtualWall] {
        &self.virtual_walls
    }

    /// Map-to-world transform, if the capture carried one
    #[inline]
    pub fn transform(&self) -> Option<MapTransform> {
        self.transform
    }

    /// Raw block sequence in file order
    #[inline]
    pub fn blocks(&self) -> &[RawBlock] {
        &self.blocks
    }

    /// Re-encode the map into the original block layout.
    ///
    /// Every block except the occupancy image is written byte-for-byte from
    /// its original bytes; the image block is re-encoded from the live grid,
    /// carrying any extension bytes past the fields this build interprets.
    /// Block count, data length and checksum are recomputed; the file's own
    /// version fields are kept.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let original = &self.blocks[self.image_index];
        let tail = &original.extension()[decode::IMAGE_EXTENSION_SIZE..];
        let image = encode::encode_image_with_extension(&self.grid, tail)?;

        let mut blocks: Vec<RawBlock> = Vec::with_capacity(self.blocks.len());
        for (index, block) in self.blocks.iter().enumerate() {
            if index == self.image_index {
                blocks.push(image.clone());
            } else {
                blocks.push(block.clone());
            }
        }
        Ok(encode::assemble_versioned(
            self.header.version_major,
            self.header.version_minor,
            &blocks,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellCode;
    use crate::format::encode::{assemble, encode_image};

    fn pose_payload(x: i32, y: i32, angle: i32) -> Vec<u8> {
        let mut payload = Vec::with_capacity(12);
        payload.extend_from_slice(&x.to_le_bytes());
        payload.extend_from_slice(&y.to_le_bytes());
        payload.extend_from_slice(&angle.to_le_bytes());
        payload
    }

    fn sample_map() -> Vec<u8> {
        let mut grid = OccupancyGrid::new(3, 2);
        grid.set(1, 0, CellCode::Floor);
        grid.set(2, 1, CellCode::Wall);
        let blocks = vec![
            encode_image(&grid).unwrap(),
            RawBlock::new(BlockType::RobotPose, &[], pose_payload(100, 200, 45)),
        ];
        assemble(&blocks)
    }

    #[test]
    fn test_load_decodes_views() {
        let model = MapModel::load(&sample_map()).unwrap();
        assert_eq!(model.grid().width(), 3);
        assert_eq!(model.grid().get(1, 0), Some(CellCode::Floor));
        assert_eq!(model.robot_pose(), Some(Pose::new(100, 200, 45)));
        assert!(model.charger_pose().is_none());
        assert!(model.transform().is_none());
    }

    #[test]
    fn test_serialize_is_identity_without_edits() {
        let bytes = sample_map();
        let model = MapModel::load(&bytes).unwrap();
        assert_eq!(model.serialize().unwrap(), bytes);
    }

    #[test]
    fn test_edit_is_visible_to_serialize() {
        let bytes = sample_map();
        let mut model = MapModel::load(&bytes).unwrap();
        model.grid_mut().set(0, 0, CellCode::Wall);

        let reloaded = MapModel::load(&model.serialize().unwrap()).unwrap();
        assert_eq!(reloaded.grid().get(0, 0), Some(CellCode::Wall));
        // Non-grid blocks untouched
        assert_eq!(reloaded.robot_pose(), Some(Pose::new(100, 200, 45)));
    }

    #[test]
    fn test_serialize_keeps_file_version_fields() {
        // A capture written by newer firmware under the same major version
        let mut bytes = sample_map();
        bytes[6..8].copy_from_slice(&5u16.to_le_bytes());

        let model = MapModel::load(&bytes).unwrap();
        assert_eq!(model.header().version_minor, 5);
        assert_eq!(model.serialize().unwrap(), bytes);
    }

    #[test]
    fn test_serialize_keeps_image_extension_tail() {
        // Image header extension longer than the fields this build reads
        let grid = {
            let mut g = OccupancyGrid::new(3, 2);
            g.set(0, 0, CellCode::Wall);
            g
        };
        let trimmed = encode_image(&grid).unwrap();
        let mut extension = trimmed.extension().to_vec();
        extension.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        let image = RawBlock::new(BlockType::Image, &extension, trimmed.payload.clone());
        let bytes = assemble(&[image]);

        let mut model = MapModel::load(&bytes).unwrap();
        assert_eq!(model.serialize().unwrap(), bytes);

        // The tail survives an edit too
        model.grid_mut().set(1, 1, CellCode::Floor);
        let edited = model.serialize().unwrap();
        let reloaded = MapModel::load(&edited).unwrap();
        let ext = reloaded.blocks()[0].extension();
        assert_eq!(&ext[ext.len() - 4..], &[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(reloaded.grid().get(1, 1), Some(CellCode::Floor));
    }

    #[test]
    fn test_block_count_mismatch_is_fatal() {
        let mut bytes = sample_map();
        bytes[8..12].copy_from_slice(&9u32.to_le_bytes());
        assert!(matches!(
            MapModel::load(&bytes),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_data_len_mismatch_is_fatal() {
        let mut bytes = sample_map();
        bytes.push(0);
        assert!(matches!(
            MapModel::load(&bytes),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_missing_image_block_is_fatal() {
        let blocks = vec![RawBlock::new(
            BlockType::RobotPose,
            &[],
            pose_payload(0, 0, 0),
        )];
        let bytes = assemble(&blocks);
        assert!(matches!(
            MapModel::load(&bytes),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_duplicate_image_block_is_fatal() {
        let grid = OccupancyGrid::new(2, 2);
        let image = encode_image(&grid).unwrap();
        let bytes = assemble(&[image.clone(), image]);
        assert!(matches!(
            MapModel::load(&bytes),
            Err(Error::Parse { block_type: 2, .. })
        ));
    }

    #[test]
    fn test_truncated_block_aborts_load() {
        let mut bytes = sample_map();
        let short = bytes.len() - 5;
        bytes.truncate(short);
        // keep the header's declared length consistent so the reader, not
        // the header check, reports the failure
        let data_len = (short - HEADER_SIZE) as u32;
        bytes[12..16].copy_from_slice(&data_len.to_le_bytes());
        assert!(matches!(
            MapModel::load(&bytes),
            Err(Error::TruncatedStream { .. })
        ));
    }
}
