pub mod cell;
pub mod config;
pub mod driver;
pub mod engine;
pub mod events;
pub mod grid;
pub mod io;
pub mod render;
pub mod rule_set;

/// Grid coordinates and dimensions
pub type CellOffset = usize;

/// Number of live neighbors around a cell, `0..=8`
pub type NeighborCount = u8;
