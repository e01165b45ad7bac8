//! Error types for naksha.

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Naksha error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Buffer ends before a block's declared header or payload does
    #[error("truncated stream at offset {offset}: need {needed} bytes, {available} remain")]
    TruncatedStream {
        /// File offset of the block being read
        offset: usize,
        /// Bytes the block header declares
        needed: usize,
        /// Bytes actually remaining in the buffer
        available: usize,
    },

    /// The block header itself cannot be minimally parsed
    #[error("unparseable block header at offset {offset} (header size {header_len})")]
    UnknownHeaderSize {
        /// File offset of the block being read
        offset: usize,
        /// Declared header length, or remaining bytes if fewer than the base header
        header_len: usize,
    },

    /// A block decoder failed on its payload
    #[error("failed to parse block {block_type:#06x} at offset {offset}: {reason}")]
    Parse {
        /// Raw type tag of the offending block
        block_type: u16,
        /// File offset of the offending block
        offset: usize,
        /// What went wrong
        reason: String,
    },

    /// Map header is malformed or inconsistent with the file contents
    #[error("invalid map format: {0}")]
    InvalidFormat(String),

    /// Unsupported format version
    #[error("unsupported map version: expected {expected}.x, found {found_major}.{found_minor}")]
    VersionMismatch {
        /// Major version this build understands
        expected: u16,
        /// Major version found in the file
        found_major: u16,
        /// Minor version found in the file
        found_minor: u16,
    },

    /// Edit rectangle rejected before any cell was touched
    #[error("invalid rectangle ({x1},{y1})-({x2},{y2}) for {width}x{height} grid")]
    InvalidRectangle {
        /// Left edge in cells
        x1: i64,
        /// Top edge in cells
        y1: i64,
        /// Right edge in cells (inclusive)
        x2: i64,
        /// Bottom edge in cells (inclusive)
        y2: i64,
        /// Grid width in cells
        width: u32,
        /// Grid height in cells
        height: u32,
    },

    /// Metric edit rectangle maps outside the grid's cell quadrant
    #[error(
        "invalid metric rectangle ({wx1}, {wy1})-({wx2}, {wy2}) m: maps to cells ({x1},{y1})-({x2},{y2})"
    )]
    InvalidWorldRectangle {
        /// Left edge in meters
        wx1: f32,
        /// Top edge in meters
        wy1: f32,
        /// Right edge in meters
        wx2: f32,
        /// Bottom edge in meters
        wy2: f32,
        /// Converted left edge in cells
        x1: i64,
        /// Converted top edge in cells
        y1: i64,
        /// Converted right edge in cells
        x2: i64,
        /// Converted bottom edge in cells
        y2: i64,
    },

    /// A decoded value cannot be represented back in its original layout
    #[error("cannot re-encode map: {0}")]
    Encode(String),

    /// I/O error (CLI layer only; the core never touches files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raster output error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
