//! Block encoding and whole-file assembly.
//!
//! The writer is the inverse of the reader: blocks whose decoded values were
//! never mutated are emitted byte-for-byte from their [`RawBlock`], and only
//! the occupancy image block is re-encoded from the live grid. The map
//! header's block count, data length and checksum are always recomputed.

use crate::error::{Error, Result};
use crate::format::block::{BlockType, RawBlock};
use crate::format::header::{MapHeader, HEADER_SIZE, VERSION_MAJOR, VERSION_MINOR};
use crate::grid::OccupancyGrid;

/// Re-encode the occupancy grid into an image block.
///
/// Produces the same raster layout the decoder consumed: a 16-byte header
/// extension (left, top, width, height) and one cell byte per cell. Grid
/// dimensions never change under editing, so the block size matches the
/// original.
pub fn encode_image(grid: &OccupancyGrid) -> Result<RawBlock> {
    encode_image_with_extension(grid, &[])
}

/// Re-encode the occupancy grid, appending trailing header-extension bytes.
///
/// The decoder tolerates image blocks whose extension runs past the 16
/// bytes this build interprets (newer firmware appends fields); the writer
/// carries that tail verbatim so the round trip stays byte-identical.
pub fn encode_image_with_extension(grid: &OccupancyGrid, extension_tail: &[u8]) -> Result<RawBlock> {
    let expected = grid.width() as u64 * grid.height() as u64;
    if grid.cells_raw().len() as u64 != expected {
        return Err(Error::Encode(format!(
            "grid holds {} cells but dimensions are {}x{}",
            grid.cells_raw().len(),
            grid.width(),
            grid.height()
        )));
    }
    if expected > u32::MAX as u64 {
        return Err(Error::Encode(format!(
            "image payload of {} cells exceeds the format's u32 length field",
            expected
        )));
    }

    let mut extension = Vec::with_capacity(16 + extension_tail.len());
    extension.extend_from_slice(&grid.left().to_le_bytes());
    extension.extend_from_slice(&grid.top().to_le_bytes());
    extension.extend_from_slice(&grid.width().to_le_bytes());
    extension.extend_from_slice(&grid.height().to_le_bytes());
    extension.extend_from_slice(extension_tail);

    Ok(RawBlock::new(
        BlockType::Image,
        &extension,
        grid.cells_raw().to_vec(),
    ))
}

/// Assemble a complete map file from a block sequence, stamped with the
/// version this build writes.
pub fn assemble(blocks: &[RawBlock]) -> Vec<u8> {
    assemble_versioned(VERSION_MAJOR, VERSION_MINOR, blocks)
}

/// Assemble a complete map file carrying an explicit version.
///
/// Writes the blocks in order and prepends a header with freshly computed
/// block count, data length and checksum. Re-serializing a loaded map uses
/// this to keep the original file's version fields.
pub fn assemble_versioned(version_major: u16, version_minor: u16, blocks: &[RawBlock]) -> Vec<u8> {
    let body_len: usize = blocks.iter().map(RawBlock::encoded_len).sum();
    let mut body = Vec::with_capacity(body_len);
    for block in blocks {
        block.write_into(&mut body);
    }

    let header = MapHeader::with_version(version_major, version_minor, blocks.len() as u32, &body);
    let mut out = Vec::with_capacity(HEADER_SIZE + body.len());
    out.extend_from_slice(&header.encode());
    out.extend_from_slice(&body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellCode;
    use crate::format::block::BlockReader;
    use crate::format::decode::decode_image;

    #[test]
    fn test_image_encode_decode_round_trip() {
        let mut grid = OccupancyGrid::with_offset(4, 3, 10, 20);
        grid.set(0, 0, CellCode::Floor);
        grid.set(3, 2, CellCode::Wall);
        grid.set(1, 1, CellCode::Reserved(0x5C));

        let block = encode_image(&grid).unwrap();
        assert_eq!(block.block_type, BlockType::Image);
        assert_eq!(block.payload.len(), 12);

        let decoded = decode_image(&block).unwrap();
        assert_eq!(decoded, grid);
    }

    #[test]
    fn test_assemble_header_fields() {
        let blocks = vec![
            RawBlock::new(BlockType::RobotPose, &[], vec![0u8; 12]),
            RawBlock::new(BlockType::Unknown(77), &[], vec![1, 2, 3]),
        ];
        let bytes = assemble(&blocks);

        let header = MapHeader::parse(&bytes).unwrap();
        assert_eq!(header.block_count, 2);
        assert_eq!(header.data_len as usize, bytes.len() - HEADER_SIZE);
        assert!(header.checksum_matches(&bytes[HEADER_SIZE..]));

        let read: Vec<_> = BlockReader::new(&bytes, HEADER_SIZE)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(read.len(), 2);
        assert_eq!(read[1].payload, vec![1, 2, 3]);
    }
}
