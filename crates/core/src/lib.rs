//! Virtual Chemistry Lab Core Library
//!
//! A 2-D grid-based laboratory simulation: every cell holds a material
//! identity and physical state (temperature, pressure, velocity), evolved
//! by three coupled per-tick passes plus operator tools.
//!
//! ## Update pipeline
//!
//! [`SimulationManager::update`] runs a fixed sequence each tick:
//! spawner refresh, stochastic chemical reactions (flat-probability or
//! Arrhenius kinetics), density-driven fluid settling, conductivity-weighted
//! heat diffusion with semi-Lagrangian convection, and finally the tool
//! effects (heaters, coolers, containment).
//!
//! The crate is engine-only: rendering, input widgets and persistence live
//! in the hosting layer, which feeds paint/spawn/config mutations in
//! between ticks and reads grid, material and tool state once per frame.

// Core types and catalogs
pub mod core_types;

// Simulation grid
pub mod grid;

// Per-tick solver passes
pub mod solver;

// Operator tools and the pipeline owner
pub mod simulation;
pub mod tools;

// Re-export core types
pub use core_types::{Cell, Config, DisplayMode, Vec2, AMBIENT_PRESSURE, AMBIENT_TEMPERATURE};
pub use core_types::{CatalogError, Material, MaterialDatabase, MaterialId};
pub use core_types::{Reaction, ReactionDatabase};

// Re-export the engine surface
pub use grid::CellGrid;
pub use simulation::{SimulationManager, SimulationStats};
pub use solver::{ThermalSolver, TriggerModel};
pub use tools::{Tool, ToolKind, ToolRect};
