//! Core types for the naksha map model.
//!
//! - [`CellCode`]: Grid cell state with opaque reserved codes
//! - [`Pose`]: Robot/charger position plus heading
//! - [`MapTransform`]: Metric ↔ cell coordinate conversion
//! - [`TracePath`], [`Zone`], [`VirtualWall`]: Read-only auxiliary geometry

mod cell;
mod geometry;
mod pose;
mod transform;

pub use cell::{CellCode, RAW_FLOOR, RAW_UNEXPLORED, RAW_WALL};
pub use geometry::{PathPoint, TracePath, VirtualWall, Zone};
pub use pose::Pose;
pub use transform::MapTransform;
