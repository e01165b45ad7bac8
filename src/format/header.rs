//! Map file header.
//!
//! Header (20 bytes, all multi-byte fields little-endian):
//! - Magic: "NKSH" (4 bytes)
//! - Version major: u16 (2 bytes)
//! - Version minor: u16 (2 bytes)
//! - Block count: u32 (4 bytes)
//! - Data length: u32 (4 bytes) - total size of all blocks after the header
//! - Checksum: u32 (4 bytes) - Adler-32 over the block region

use crate::error::{Error, Result};
use adler2::adler32_slice;

/// Magic bytes for the map format
pub const MAGIC: &[u8; 4] = b"NKSH";

/// Major version this build understands
pub const VERSION_MAJOR: u16 = 1;

/// Minor version this build writes
pub const VERSION_MINOR: u16 = 0;

/// Header size in bytes
pub const HEADER_SIZE: usize = 20;

/// Global metadata parsed from the leading fixed-size section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapHeader {
    /// Format major version
    pub version_major: u16,
    /// Format minor version
    pub version_minor: u16,
    /// Number of blocks following the header
    pub block_count: u32,
    /// Total length in bytes of the block region
    pub data_len: u32,
    /// Adler-32 checksum over the block region
    pub checksum: u32,
}

impl MapHeader {
    /// Build a header for a freshly encoded block region, stamped with the
    /// version this build writes
    pub fn for_blocks(block_count: u32, block_bytes: &[u8]) -> Self {
        Self::with_version(VERSION_MAJOR, VERSION_MINOR, block_count, block_bytes)
    }

    /// Build a header for a block region, carrying an explicit version.
    ///
    /// Re-encoding a loaded map must keep the file's own version fields;
    /// only the block count, data length and checksum are recomputed.
    pub fn with_version(
        version_major: u16,
        version_minor: u16,
        block_count: u32,
        block_bytes: &[u8],
    ) -> Self {
        Self {
            version_major,
            version_minor,
            block_count,
            data_len: block_bytes.len() as u32,
            checksum: adler32_slice(block_bytes),
        }
    }

    /// Parse the header from the start of a byte buffer
    pub fn parse(buf: &[u8]) -> Result<Self> {
        if buf.len() < HEADER_SIZE {
            return Err(Error::InvalidFormat(format!(
                "file too short for header: {} bytes",
                buf.len()
            )));
        }

        if &buf[0..4] != MAGIC {
            return Err(Error::InvalidFormat("invalid magic bytes".to_string()));
        }

        let version_major = u16::from_le_bytes([buf[4], buf[5]]);
        let version_minor = u16::from_le_bytes([buf[6], buf[7]]);
        if version_major != VERSION_MAJOR {
            return Err(Error::VersionMismatch {
                expected: VERSION_MAJOR,
                found_major: version_major,
                found_minor: version_minor,
            });
        }

        Ok(Self {
            version_major,
            version_minor,
            block_count: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
            data_len: u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
            checksum: u32::from_le_bytes([buf[16], buf[17], buf[18], buf[19]]),
        })
    }

    /// Encode the header to its fixed-size byte layout
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut header = [0u8; HEADER_SIZE];
        header[0..4].copy_from_slice(MAGIC);
        header[4..6].copy_from_slice(&self.version_major.to_le_bytes());
        header[6..8].copy_from_slice(&self.version_minor.to_le_bytes());
        header[8..12].copy_from_slice(&self.block_count.to_le_bytes());
        header[12..16].copy_from_slice(&self.data_len.to_le_bytes());
        header[16..20].copy_from_slice(&self.checksum.to_le_bytes());
        header
    }

    /// Check the stored checksum against the actual block region
    pub fn checksum_matches(&self, block_bytes: &[u8]) -> bool {
        adler32_slice(block_bytes) == self.checksum
    }
}
