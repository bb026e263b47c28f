//! Simulation-wide configuration
//!
//! The hosting layer mutates this between ticks; every solver reads it
//! through a shared reference during a tick and never writes it.

use serde::{Deserialize, Serialize};

use super::material::MaterialId;

/// What the external renderer colors cells by. Not consumed by any solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Material display color
    #[default]
    Material,
    /// Temperature ramp (cold blue to hot red)
    Temperature,
    /// Pressure grayscale
    Pressure,
}

/// Tunable simulation parameters.
///
/// `simulation_speed` deliberately compounds: [`crate::SimulationManager`]
/// scales `dt` by it once per tick, and the fluid gravity term, the thermal
/// advection offset and the expert-mode reaction rate each multiply by it
/// again. Regression tests pin that double scaling; do not normalize it
/// without revisiting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Arrhenius kinetics and stronger tools when set; flat-probability
    /// kinetics otherwise
    pub expert_mode: bool,
    /// Extra scalar on the expert-mode reaction rate and heat release
    pub reaction_precision: f32,
    /// Grid width in cells, fixed at manager construction
    pub grid_width: usize,
    /// Grid height in cells, fixed at manager construction
    pub grid_height: usize,
    /// Reserved spawner throttle; spawners currently fire every tick
    /// regardless of this value
    pub spawn_rate: f32,
    /// Material the paint brush deposits
    pub selected_material: MaterialId,
    /// Paint brush radius in cells (square footprint)
    pub brush_size: i32,
    /// Renderer color channel selection
    pub display_mode: DisplayMode,
    /// When set, `update` returns without running the pipeline
    pub paused: bool,
    /// Global time scale; see the type-level note on compounding
    pub simulation_speed: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            expert_mode: true,
            reaction_precision: 1.0,
            grid_width: 100,
            grid_height: 100,
            spawn_rate: 1.0,
            selected_material: 0,
            brush_size: 3,
            display_mode: DisplayMode::default(),
            paused: false,
            simulation_speed: 1.0,
        }
    }
}
