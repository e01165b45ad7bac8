//! Binary map format: header, block framing, per-type codecs.
//!
//! This module owns all byte-layout knowledge:
//!
//! - [`header`]: The 20-byte map header with version and checksum fields
//! - [`block`]: Length-delimited block framing and the lazy [`BlockReader`]
//! - [`decode`]: Per-type payload decoders into core types
//! - [`encode`]: Image block re-encoding and whole-file assembly

pub mod block;
pub mod decode;
pub mod encode;
pub mod header;

pub use block::{BlockReader, BlockType, RawBlock, BLOCK_HEADER_SIZE};
pub use header::{MapHeader, HEADER_SIZE, MAGIC, VERSION_MAJOR, VERSION_MINOR};
