//! Length-delimited block reading.
//!
//! Every block starts with an 8-byte base header: type tag (u16), header
//! length (u16, counts the base header plus any type-specific extension) and
//! payload length (u32), all little-endian. The reader walks the buffer
//! once and yields each block's bytes verbatim, without interpreting them;
//! unrecognized tags are legal and pass through opaquely.

use crate::error::{Error, Result};

/// Base block header size in bytes
pub const BLOCK_HEADER_SIZE: usize = 8;

/// Block type tags defined by the captured firmware release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// Charger dock pose (tag 1)
    ChargerPose,
    /// Occupancy image (tag 2)
    Image,
    /// Cleaned-area path (tag 3)
    CleanedPath,
    /// Goto path (tag 4)
    GotoPath,
    /// Zoned cleaning rectangles (tag 6)
    Zones,
    /// Robot pose (tag 8)
    RobotPose,
    /// Virtual wall segments (tag 10)
    VirtualWalls,
    /// Map-to-world transform (tag 12)
    Transform,
    /// Any tag this build does not recognize; carried opaquely
    Unknown(u16),
}

impl BlockType {
    /// Decode a raw type tag
    pub fn from_tag(tag: u16) -> Self {
        match tag {
            1 => BlockType::ChargerPose,
            2 => BlockType::Image,
            3 => BlockType::CleanedPath,
            4 => BlockType::GotoPath,
            6 => BlockType::Zones,
            8 => BlockType::RobotPose,
            10 => BlockType::VirtualWalls,
            12 => BlockType::Transform,
            other => BlockType::Unknown(other),
        }
    }

    /// The raw type tag
    pub fn tag(self) -> u16 {
        match self {
            BlockType::ChargerPose => 1,
            BlockType::Image => 2,
            BlockType::CleanedPath => 3,
            BlockType::GotoPath => 4,
            BlockType::Zones => 6,
            BlockType::RobotPose => 8,
            BlockType::VirtualWalls => 10,
            BlockType::Transform => 12,
            BlockType::Unknown(tag) => tag,
        }
    }
}

/// One typed, length-delimited chunk of the map file, carried verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawBlock {
    /// Decoded type tag
    pub block_type: BlockType,
    /// File offset where this block starts
    pub offset: usize,
    /// Verbatim header bytes, including the 8-byte base header
    pub header: Vec<u8>,
    /// Verbatim payload bytes
    pub payload: Vec<u8>,
}

impl RawBlock {
    /// Build a block from scratch, assembling the base header.
    ///
    /// `extension` is the type-specific header part after the base 8 bytes.
    pub fn new(block_type: BlockType, extension: &[u8], payload: Vec<u8>) -> Self {
        let header_len = BLOCK_HEADER_SIZE + extension.len();
        let mut header = Vec::with_capacity(header_len);
        header.extend_from_slice(&block_type.tag().to_le_bytes());
        header.extend_from_slice(&(header_len as u16).to_le_bytes());
        header.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        header.extend_from_slice(extension);
        Self {
            block_type,
            offset: 0,
            header,
            payload,
        }
    }

    /// Header bytes after the base 8-byte header
    #[inline]
    pub fn extension(&self) -> &[u8] {
        &self.header[BLOCK_HEADER_SIZE..]
    }

    /// Total encoded size of this block
    #[inline]
    pub fn encoded_len(&self) -> usize {
        self.header.len() + self.payload.len()
    }

    /// Append the block's verbatim bytes to an output buffer
    pub fn write_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header);
        out.extend_from_slice(&self.payload);
    }
}

/// Lazy, single-pass reader over the block region of a map buffer.
///
/// Yields `Result<RawBlock>`; iteration stops after the first error. Not
/// restartable without constructing a new reader.
pub struct BlockReader<'a> {
    buf: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> BlockReader<'a> {
    /// Create a reader starting at `offset` into `buf`.
    ///
    /// Offsets reported in blocks and errors are relative to `buf`, so
    /// passing the whole file with the header size as offset yields file
    /// offsets directly.
    pub fn new(buf: &'a [u8], offset: usize) -> Self {
        Self {
            buf,
            offset,
            failed: false,
        }
    }

    fn read_block(&mut self) -> Result<RawBlock> {
        let start = self.offset;
        let remaining = self.buf.len() - start;

        if remaining < BLOCK_HEADER_SIZE {
            return Err(Error::UnknownHeaderSize {
                offset: start,
                header_len: remaining,
            });
        }

        let base = &self.buf[start..start + BLOCK_HEADER_SIZE];
        let tag = u16::from_le_bytes([base[0], base[1]]);
        let header_len = u16::from_le_bytes([base[2], base[3]]) as usize;
        let payload_len = u32::from_le_bytes([base[4], base[5], base[6], base[7]]) as usize;

        if header_len < BLOCK_HEADER_SIZE {
            return Err(Error::UnknownHeaderSize {
                offset: start,
                header_len,
            });
        }

        let total = header_len + payload_len;
        if total > remaining {
            return Err(Error::TruncatedStream {
                offset: start,
                needed: total,
                available: remaining,
            });
        }

        let header = self.buf[start..start + header_len].to_vec();
        let payload = self.buf[start + header_len..start + total].to_vec();
        self.offset = start + total;

        Ok(RawBlock {
            block_type: BlockType::from_tag(tag),
            offset: start,
            header,
            payload,
        })
    }
}

impl Iterator for BlockReader<'_> {
    type Item = Result<RawBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.buf.len() {
            return None;
        }
        let result = self.read_block();
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}
