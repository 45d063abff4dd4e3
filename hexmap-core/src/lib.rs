//! HEXMAP Core - Hex grid geometry for the board
//!
//! This crate provides:
//! - Cube coordinates with arithmetic, rotation, distance and rounding
//! - Pointy/flat layouts converting between cells and pixels
//! - Map generation, ring traversal and ring removal
//! - JSON map configuration

pub mod config;
pub mod error;
pub mod grid;
pub mod hex;
pub mod layout;

// Re-exports for convenient access
pub use config::MapConfig;
pub use error::{GridError, Result};
pub use grid::{ring, Cell, CellKind, Grid, TerrainConfig, TerrainWeight};
pub use hex::{distance, length, FractionalHex, Hex, DIRECTIONS, MAX_COMPONENT};
pub use layout::{Layout, Orientation, OrientationKind, Point, FLAT, POINTY};
