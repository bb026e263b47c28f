//! Simulation manager: owns the catalogs, the grid, the solvers and the
//! tool list, and drives the fixed per-tick pipeline.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::core_types::cell::Cell;
use crate::core_types::config::Config;
use crate::core_types::material::{CatalogError, MaterialDatabase, MaterialId};
use crate::core_types::reaction::ReactionDatabase;
use crate::grid::CellGrid;
use crate::solver::{fluid, reaction, ThermalSolver};
use crate::tools::{Tool, ToolKind, ToolRect};

/// Read-only per-tick statistics, derived on demand for hosts that want a
/// dashboard without walking the grid themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationStats {
    /// Ticks executed so far
    pub ticks: u64,
    /// Accumulated speed-scaled simulation time (s)
    pub simulation_time: f32,
    /// Mean cell temperature (°C)
    pub mean_temperature: f32,
    /// Cell count per material id, indexed by id
    pub material_counts: Vec<usize>,
}

/// Owner of the whole engine state and single entry point for the host.
///
/// The host calls [`SimulationManager::update`] once per frame and the
/// grid/config mutators between frames; the engine is single-threaded and
/// cooperative, with no internal locking.
pub struct SimulationManager {
    config: Config,
    materials: MaterialDatabase,
    reactions: ReactionDatabase,
    grid: CellGrid,
    thermal_solver: ThermalSolver,
    tools: Vec<Tool>,
    rng: StdRng,
    simulation_time: f32,
    ticks: u64,
}

impl SimulationManager {
    /// Build a manager over the built-in material and reaction catalogs,
    /// with an entropy-seeded RNG.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when catalog loading fails; this is fatal
    /// at startup, there is nothing to recover.
    pub fn new(config: Config) -> Result<Self, CatalogError> {
        let seed = rand::rng().random();
        Self::with_seed(config, seed)
    }

    /// Same as [`SimulationManager::new`] but with a caller-chosen RNG seed
    /// for reproducible runs.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when catalog loading fails.
    pub fn with_seed(config: Config, seed: u64) -> Result<Self, CatalogError> {
        let materials = MaterialDatabase::builtin()?;
        let reactions = ReactionDatabase::builtin(&materials)?;
        let grid = CellGrid::new(config.grid_width, config.grid_height);
        info!(
            "simulation ready: {}x{} grid, {} materials, {} reactions, seed {seed}",
            config.grid_width,
            config.grid_height,
            materials.len(),
            reactions.len()
        );
        Ok(SimulationManager {
            config,
            materials,
            reactions,
            grid,
            thermal_solver: ThermalSolver::new(),
            tools: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            simulation_time: 0.0,
            ticks: 0,
        })
    }

    /// Install the default starting scenario: an O2 spawner at the top
    /// center plus a heater, a cooler and a beaker. Scenario setup, not
    /// engine logic - hosts are free to skip this and build their own.
    pub fn initialize(&mut self) {
        if let Some(oxygen) = self.materials.id_of("O2") {
            let x = (self.grid.width() / 2) as i32;
            self.grid.set_spawner(x, 0, oxygen);
        } else {
            warn!("catalog has no O2 material, skipping spawner setup");
        }

        self.tools.push(Tool::new(
            ToolKind::Heater,
            "Heater",
            ToolRect {
                x: 10,
                y: 10,
                width: 5,
                height: 5,
            },
        ));
        self.tools.push(Tool::new(
            ToolKind::Cooler,
            "Cooler",
            ToolRect {
                x: 70,
                y: 70,
                width: 5,
                height: 5,
            },
        ));
        self.tools.push(Tool::new(
            ToolKind::Beaker,
            "Beaker",
            ToolRect {
                x: 40,
                y: 40,
                width: 10,
                height: 10,
            },
        ));
        debug!("installed default scenario: 1 spawner, {} tools", self.tools.len());
    }

    /// Advance the simulation by `dt` seconds. No-op while paused.
    ///
    /// `dt` is scaled by `simulation_speed` once here; the fluid gravity
    /// term, the thermal advection offset and the expert-mode reaction rate
    /// each scale by it again downstream. That compounding is intentional
    /// behavior, pinned by regression tests.
    pub fn update(&mut self, dt: f32) {
        if self.config.paused {
            return;
        }
        let dt = dt * self.config.simulation_speed;

        self.grid.update_spawners(self.config.spawn_rate);
        reaction::process_reactions(
            &mut self.grid,
            &self.reactions,
            &self.config,
            dt,
            &mut self.rng,
        );
        fluid::solve(&mut self.grid, &self.materials, &self.config, dt);
        self.thermal_solver
            .solve(&mut self.grid, &self.materials, &self.config, dt);
        for tool in &self.tools {
            tool.apply(&mut self.grid, &self.config, dt);
        }

        self.simulation_time += dt;
        self.ticks += 1;
    }

    /// Paint `material` with the given brush radius; lenient about
    /// out-of-bounds coordinates like all host-input mutators.
    pub fn paint(&mut self, x: i32, y: i32, material: MaterialId, brush_radius: i32) {
        self.grid.paint(x, y, material, brush_radius);
    }

    /// Paint the currently selected material with the configured brush.
    pub fn paint_selected(&mut self, x: i32, y: i32) {
        self.grid.paint(
            x,
            y,
            self.config.selected_material,
            self.config.brush_size,
        );
    }

    /// Mark a spawner cell; no-op out of bounds.
    pub fn set_spawner(&mut self, x: i32, y: i32, material: MaterialId) {
        self.grid.set_spawner(x, y, material);
    }

    /// Place a tool. Tools apply in placement order each tick.
    pub fn add_tool(&mut self, tool: Tool) {
        self.tools.push(tool);
    }

    /// Simulation grid, read-only boundary for renderers.
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Material catalog, e.g. for picker population and cell coloring.
    pub fn materials(&self) -> &MaterialDatabase {
        &self.materials
    }

    /// Reaction catalog.
    pub fn reactions(&self) -> &ReactionDatabase {
        &self.reactions
    }

    /// Placed tools in application order.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable configuration for the host; expected between ticks only.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Accumulated speed-scaled simulation time (s).
    pub fn simulation_time(&self) -> f32 {
        self.simulation_time
    }

    /// Ticks executed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Derive dashboard statistics from the current grid.
    pub fn stats(&self) -> SimulationStats {
        let cells = self.grid.cells();
        let mut material_counts = vec![0usize; self.materials.len()];
        let mut temperature_sum = 0.0f64;
        for cell in cells {
            material_counts[usize::from(cell.material)] += 1;
            temperature_sum += f64::from(cell.temperature);
        }
        let mean_temperature = if cells.is_empty() {
            0.0
        } else {
            (temperature_sum / cells.len() as f64) as f32
        };
        SimulationStats {
            ticks: self.ticks,
            simulation_time: self.simulation_time,
            mean_temperature,
            material_counts,
        }
    }

    /// Cell accessor mirroring [`CellGrid::get`] for host convenience.
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        self.grid.get(x, y)
    }
}
