//! **relief-core** — elevation-grid core types.
//!
//! This crate provides the foundational types used across the *relief*
//! workspace: geometry primitives, the elevation cell, a rectangular
//! elevation grid, and the heightmap text parser.

pub mod elevation;
pub mod geom;
pub mod grid;
pub mod heightmap;

pub use elevation::Elevation;
pub use geom::{Point, Range};
pub use grid::ElevationGrid;
pub use heightmap::{HeightMap, HeightMapError};
