//! # Naksha: Robot Vacuum Map Codec and Editor
//!
//! Decodes the block-structured binary map files captured from a robot
//! vacuum's LIDAR SLAM subsystem, exposes the occupancy grid and auxiliary
//! metadata for inspection and editing, applies bounded rectangular edits,
//! and re-encodes or rasterizes the result.
//!
//! The codec is lossless for everything it does not understand: blocks with
//! unrecognized type tags and cells with reserved codes are carried verbatim,
//! so `serialize(load(bytes))` reproduces `bytes` exactly when no edits are
//! applied.
//!
//! ## Quick Start
//!
//! ```rust
//! use naksha::{edit, MapModel, Rect};
//! # use naksha::{format::encode, grid::OccupancyGrid};
//! # let image = encode::encode_image(&OccupancyGrid::new(20, 20)).unwrap();
//! # let bytes = encode::assemble(&[image]);
//!
//! let mut map = MapModel::load(&bytes)?;
//! edit::set_floor(map.grid_mut(), Rect::new(2, 2, 5, 5))?;
//! edit::set_wall(map.grid_mut(), Rect::new(2, 2, 5, 5))?;
//! let out = map.serialize()?;
//! # assert_eq!(out.len(), bytes.len());
//! # Ok::<(), naksha::Error>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into modules:
//!
//! - [`core`]: Fundamental types (cell codes, poses, paths, the transform)
//! - [`grid`]: Occupancy grid storage over raw cell bytes
//! - [`format`]: Byte-level codec (header, block framing, per-type codecs)
//! - [`model`]: The in-memory [`MapModel`] aggregate
//! - [`edit`]: Rectangular grid edit operations
//! - [`render`]: Cell-to-color rasterization
//!
//! ## Data Flow
//!
//! ```text
//! file bytes ──► BlockReader ──► decoders ──► MapModel
//!                                               │
//!                              edits (edit::*) ─┤
//!                                               ▼
//!                        encoders/writer ──► output bytes
//!                                  render ──► raster image
//! ```
//!
//! File I/O and argument handling live in the CLI binary; the library only
//! ever operates on byte buffers.

pub mod core;
pub mod edit;
pub mod error;
pub mod format;
pub mod grid;
pub mod model;
pub mod render;

// Re-export main types at crate root
pub use crate::core::{CellCode, MapTransform, PathPoint, Pose, TracePath, VirtualWall, Zone};
pub use edit::Rect;
pub use error::{Error, Result};
pub use format::{BlockReader, BlockType, MapHeader, RawBlock};
pub use grid::OccupancyGrid;
pub use model::MapModel;
