//! Simulation grid

pub mod cell_grid;

pub use cell_grid::CellGrid;
