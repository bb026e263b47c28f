//! Heat diffusion and convection pass
//!
//! Two stages per tick, each fully materialized before the next reads it:
//!
//! 1. **Diffusion** - conductivity-weighted 3x3 average of the previous
//!    tick's temperature field. A neighbor's weight is the arithmetic mean
//!    of the center cell's and that neighbor's material conductivity;
//!    out-of-bounds neighbors drop out of both sum and weight total.
//! 2. **Advection** - single nearest-neighbor semi-Lagrangian step over the
//!    diffused field: each cell samples the diffused temperature at its
//!    backward-traced source position, or keeps its own diffused value when
//!    the trace leaves the grid. No interpolation and no CFL clamp, so
//!    large velocities sample distant cells.
//!
//! Both stages are pure gathers from a fully-written input field into a
//! separate output buffer, which is what makes the row-parallel execution
//! below safe.

use rayon::prelude::*;

use crate::core_types::config::Config;
use crate::core_types::material::MaterialDatabase;
use crate::grid::CellGrid;

/// Heat diffusion + advection solver. Owns the two full-grid scratch
/// fields so repeated ticks reuse their allocations.
#[derive(Debug, Default)]
pub struct ThermalSolver {
    diffused: Vec<f32>,
    advected: Vec<f32>,
}

impl ThermalSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one thermal pass and write the resulting temperature field back
    /// into the grid.
    pub fn solve(
        &mut self,
        grid: &mut CellGrid,
        materials: &MaterialDatabase,
        config: &Config,
        dt: f32,
    ) {
        let (w, h) = (grid.width(), grid.height());
        self.diffused.resize(w * h, 0.0);
        self.advected.resize(w * h, 0.0);

        // Stage 1: conductivity-weighted diffusion, one row per task. Every
        // read goes against the pre-tick grid, every write to the scratch
        // row, so rows are independent.
        {
            let grid_ref: &CellGrid = grid;
            self.diffused
                .par_chunks_mut(w)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, out) in row.iter_mut().enumerate() {
                        *out = diffused_temperature(grid_ref, materials, x, y);
                    }
                });
        }

        // Stage 2: semi-Lagrangian backward trace over the diffused field.
        {
            let diffused = &self.diffused;
            let grid_ref: &CellGrid = grid;
            let speed = config.simulation_speed;
            self.advected
                .par_chunks_mut(w)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, out) in row.iter_mut().enumerate() {
                        let cell = grid_ref.get(x, y);
                        let sx = (x as f32 - cell.velocity.x * dt * speed).round() as i32;
                        let sy = (y as f32 - cell.velocity.y * dt * speed).round() as i32;
                        *out = if grid_ref.in_bounds(sx, sy) {
                            diffused[sy as usize * w + sx as usize]
                        } else {
                            diffused[y * w + x]
                        };
                    }
                });
        }

        for (cell, &temperature) in grid.cells_mut().iter_mut().zip(&self.advected) {
            cell.temperature = temperature;
        }
    }
}

/// Conductivity-weighted 3x3 neighborhood average for one cell, reading
/// only the pre-tick field. Zero total weight keeps the cell's own
/// temperature (cannot happen while the center contributes a non-negative
/// weight, but the guard keeps the function total).
fn diffused_temperature(
    grid: &CellGrid,
    materials: &MaterialDatabase,
    x: usize,
    y: usize,
) -> f32 {
    let center = grid.get(x, y);
    let center_conductivity = materials.get(center.material).thermal_conductivity;

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for dy in -1i32..=1 {
        for dx in -1i32..=1 {
            let (nx, ny) = (x as i32 + dx, y as i32 + dy);
            if !grid.in_bounds(nx, ny) {
                continue;
            }
            let neighbor = grid.get(nx as usize, ny as usize);
            let conductivity = (center_conductivity
                + materials.get(neighbor.material).thermal_conductivity)
                * 0.5;
            weighted_sum += neighbor.temperature * conductivity;
            weight_total += conductivity;
        }
    }

    if weight_total > 0.0 {
        weighted_sum / weight_total
    } else {
        center.temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn lab() -> MaterialDatabase {
        MaterialDatabase::builtin().unwrap()
    }

    #[test]
    fn uniform_field_is_a_fixed_point() {
        let materials = lab();
        let config = Config::default();
        let water = materials.id_of("Water").unwrap();

        let mut grid = CellGrid::new(3, 3);
        for cell in grid.cells_mut() {
            cell.material = water;
            cell.temperature = 20.0;
        }

        let mut solver = ThermalSolver::new();
        solver.solve(&mut grid, &materials, &config, 1.0);
        for cell in grid.cells() {
            assert_relative_eq!(cell.temperature, 20.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn uniform_conductivity_diffusion_averages_neighborhoods() {
        let materials = lab();
        let water = materials.id_of("Water").unwrap();

        // Same material everywhere, so every in-bounds neighbor carries an
        // equal weight and the diffused value is the plain clipped-window
        // mean of the previous temperatures.
        let mut grid = CellGrid::new(1, 3);
        for (y, temperature) in [10.0, 20.0, 30.0].into_iter().enumerate() {
            let cell = grid.get_mut(0, y);
            cell.material = water;
            cell.temperature = temperature;
        }

        assert_relative_eq!(diffused_temperature(&grid, &materials, 0, 0), 15.0, epsilon = 1e-4);
        assert_relative_eq!(diffused_temperature(&grid, &materials, 0, 1), 20.0, epsilon = 1e-4);
        assert_relative_eq!(diffused_temperature(&grid, &materials, 0, 2), 25.0, epsilon = 1e-4);
    }

    #[test]
    fn diffusion_weights_by_mean_conductivity() {
        let materials = lab();
        let water = materials.id_of("Water").unwrap();
        let iron = materials.id_of("Fe").unwrap();

        let mut grid = CellGrid::new(2, 1);
        grid.get_mut(0, 0).material = water;
        grid.get_mut(0, 0).temperature = 0.0;
        grid.get_mut(1, 0).material = iron;
        grid.get_mut(1, 0).temperature = 100.0;

        let k_water = materials.get(water).thermal_conductivity;
        let k_iron = materials.get(iron).thermal_conductivity;
        let w_self = k_water; // mean of water with itself
        let w_iron = (k_water + k_iron) * 0.5;
        let expected = (0.0 * w_self + 100.0 * w_iron) / (w_self + w_iron);

        assert_relative_eq!(
            diffused_temperature(&grid, &materials, 0, 0),
            expected,
            epsilon = 1e-4
        );
    }

    #[test]
    fn advection_samples_the_backward_traced_source() {
        let materials = lab();
        let config = Config::default();
        let water = materials.id_of("Water").unwrap();

        let mut grid = CellGrid::new(1, 3);
        for (y, temperature) in [10.0, 20.0, 30.0].into_iter().enumerate() {
            let cell = grid.get_mut(0, y);
            cell.material = water;
            cell.temperature = temperature;
        }
        // Cell (0, 2) traces back two rows to (0, 0); the others stay put.
        grid.get_mut(0, 2).velocity.y = 2.0;

        let mut solver = ThermalSolver::new();
        solver.solve(&mut grid, &materials, &config, 1.0);

        // Diffused column is [15, 20, 25]; advection rewrites only (0, 2)
        // with the diffused value from its source cell (0, 0).
        assert_relative_eq!(grid.get(0, 0).temperature, 15.0, epsilon = 1e-4);
        assert_relative_eq!(grid.get(0, 1).temperature, 20.0, epsilon = 1e-4);
        assert_relative_eq!(grid.get(0, 2).temperature, 15.0, epsilon = 1e-4);
    }

    #[test]
    fn out_of_bounds_trace_keeps_the_diffused_value() {
        let materials = lab();
        let config = Config::default();
        let water = materials.id_of("Water").unwrap();

        let mut grid = CellGrid::new(1, 2);
        for cell in grid.cells_mut() {
            cell.material = water;
            cell.temperature = 40.0;
        }
        // Traces far outside the grid
        grid.get_mut(0, 1).velocity.y = 1000.0;

        let mut solver = ThermalSolver::new();
        solver.solve(&mut grid, &materials, &config, 1.0);
        assert_relative_eq!(grid.get(0, 1).temperature, 40.0, epsilon = 1e-4);
    }
}
