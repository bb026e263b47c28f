//! Per-tick solver passes
//!
//! The manager runs these in a fixed order each tick: reactions, then
//! fluid settling, then thermal diffusion/advection. Each pass assumes
//! exclusive access to the grid for its duration.

pub mod fluid;
pub mod reaction;
pub mod thermal;

pub use reaction::TriggerModel;
pub use thermal::ThermalSolver;
