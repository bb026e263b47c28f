//! Stochastic chemical reaction pass
//!
//! Each tick, every cell is tested against its right and below neighbor
//! (two directions only, so each unordered pair of adjacent cells is tested
//! exactly once). A matching reaction triggers with a probability produced
//! by the active [`TriggerModel`]; on trigger the primary cell takes the
//! reaction's first product and both cells receive the enthalpy delta.

use rand::Rng;

use crate::core_types::config::Config;
use crate::core_types::reaction::{Reaction, ReactionDatabase};
use crate::grid::CellGrid;

/// Universal gas constant R (J/(mol·K)).
pub const GAS_CONSTANT: f32 = 8.314;

/// Neighbor offsets tested per cell: right, then below.
const DIRECTIONS: [(usize, usize); 2] = [(1, 0), (0, 1)];

/// Per-trial trigger probability model; simple and expert mode are two
/// implementations of the same interface rather than branches scattered
/// through the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerModel {
    /// Flat `0.1 * dt` chance per tick, temperature-independent
    FlatRate,
    /// Arrhenius kinetics: `A * exp(-Ea / (R * T_avg))`, additionally
    /// scaled by `reaction_precision * simulation_speed`
    Arrhenius,
}

impl TriggerModel {
    /// Model selected by the config's expert-mode flag.
    pub fn from_config(config: &Config) -> Self {
        if config.expert_mode {
            TriggerModel::Arrhenius
        } else {
            TriggerModel::FlatRate
        }
    }

    /// Probability in `[0, 1]` that `reaction` triggers this tick for a
    /// cell pair at temperatures `t1` and `t2` (°C).
    pub fn trigger_probability(
        self,
        reaction: &Reaction,
        t1: f32,
        t2: f32,
        config: &Config,
        dt: f32,
    ) -> f32 {
        let rate = match self {
            TriggerModel::FlatRate => 0.1,
            TriggerModel::Arrhenius => {
                let t_avg_kelvin = (t1 + t2) * 0.5 + 273.15;
                reaction.pre_exponential
                    * (-reaction.activation_energy / (GAS_CONSTANT * t_avg_kelvin)).exp()
                    * config.reaction_precision
                    * config.simulation_speed
            }
        };
        (rate * dt).min(1.0)
    }

    /// Extra scale applied to the enthalpy delta on trigger.
    fn heat_scale(self, config: &Config) -> f32 {
        match self {
            TriggerModel::FlatRate => 1.0,
            TriggerModel::Arrhenius => config.reaction_precision * config.simulation_speed,
        }
    }
}

/// Run one reaction pass over the whole grid.
///
/// Scan order is row-major; for each cell the candidate reaction list is
/// the bucket for the material the cell held on entry, while pair matching
/// re-reads the cell's current material (it may already have been converted
/// by an earlier candidate in the same visit). One uniform `[0, 1)` draw
/// per matched candidate; `rng` is injected so callers can seed for
/// determinism.
pub fn process_reactions(
    grid: &mut CellGrid,
    reactions: &ReactionDatabase,
    config: &Config,
    dt: f32,
    rng: &mut impl Rng,
) {
    let model = TriggerModel::from_config(config);
    let (w, h) = (grid.width(), grid.height());

    for y in 0..h {
        for x in 0..w {
            let entry_material = grid.get(x, y).material;
            for (dx, dy) in DIRECTIONS {
                let (nx, ny) = (x + dx, y + dy);
                if nx >= w || ny >= h {
                    continue;
                }
                for reaction in reactions.reactions_for(entry_material) {
                    let c1 = grid.get(x, y);
                    let c2 = grid.get(nx, ny);
                    if !reaction.matches(c1.material, c2.material) {
                        continue;
                    }
                    let probability = model.trigger_probability(
                        reaction,
                        c1.temperature,
                        c2.temperature,
                        config,
                        dt,
                    );
                    if rng.random::<f32>() < probability {
                        if let Some(&product) = reaction.products.first() {
                            grid.get_mut(x, y).material = product;
                        }
                        let dh = reaction.delta_h * dt * model.heat_scale(config);
                        grid.get_mut(x, y).temperature += dh;
                        grid.get_mut(nx, ny).temperature += dh;
                    }
                }
            }
        }
    }
}
