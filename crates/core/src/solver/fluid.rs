//! Density-driven fluid motion pass
//!
//! There is no momentum equation here. Gravity accumulates into every
//! cell's vertical velocity (consumed later by the thermal advection
//! stage), and a single bubble-sort-like sweep exchanges vertically
//! adjacent cells by material density. One sweep per tick: full density
//! stratification emerges over multiple ticks, not within one.

use crate::core_types::config::Config;
use crate::core_types::material::MaterialDatabase;
use crate::grid::CellGrid;

/// Gravitational acceleration (m/s²), accumulated into `velocity.y`.
pub const GRAVITY: f32 = 9.81;

/// Run one fluid pass over the whole grid.
///
/// Stage 1 adds `GRAVITY * dt * simulation_speed` to every cell's vertical
/// velocity, unconditionally (the incoming `dt` was already speed-scaled by
/// the manager; the compounding is intentional and regression-pinned).
///
/// Stage 2 sweeps rows bottom-up (`h-1` down to `1`), columns left to
/// right, swapping the full state of cell `(x, y)` with `(x, y-1)` whenever
/// the material at `(x, y)` is denser than the one directly above it. The
/// sweep order decides which swaps happen within a tick and must not
/// change; a grid with no such adjacent inversion is a fixed point.
pub fn solve(grid: &mut CellGrid, materials: &MaterialDatabase, config: &Config, dt: f32) {
    let gravity_step = GRAVITY * dt * config.simulation_speed;
    for cell in grid.cells_mut() {
        cell.velocity.y += gravity_step;
    }

    let (w, h) = (grid.width(), grid.height());
    for y in (1..h).rev() {
        for x in 0..w {
            let density_here = materials.get(grid.get(x, y).material).density;
            let density_above = materials.get(grid.get(x, y - 1).material).density;
            if density_here > density_above {
                grid.swap_cells((x, y), (x, y - 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lab() -> MaterialDatabase {
        MaterialDatabase::builtin().unwrap()
    }

    #[test]
    fn inverted_column_pair_swaps_in_one_pass() {
        let materials = lab();
        let gold = materials.id_of("Au").unwrap();
        let oxygen = materials.id_of("O2").unwrap();
        let config = Config::default();

        // Denser cell on the high-y row, lighter above it: one pass swaps
        // the pair's entire state.
        let mut grid = CellGrid::new(1, 2);
        grid.get_mut(0, 0).material = oxygen;
        grid.get_mut(0, 0).temperature = -50.0;
        grid.get_mut(0, 1).material = gold;
        grid.get_mut(0, 1).temperature = 600.0;

        solve(&mut grid, &materials, &config, 1.0);

        assert_eq!(grid.get(0, 0).material, gold);
        assert_eq!(grid.get(0, 0).temperature, 600.0, "swap carries full cell state");
        assert_eq!(grid.get(0, 1).material, oxygen);
        assert_eq!(grid.get(0, 1).temperature, -50.0);
    }

    #[test]
    fn settled_column_is_a_fixed_point() {
        let materials = lab();
        let gold = materials.id_of("Au").unwrap();
        let iron = materials.id_of("Fe").unwrap();
        let oxygen = materials.id_of("O2").unwrap();
        let config = Config::default();

        let mut grid = CellGrid::new(1, 3);
        grid.get_mut(0, 0).material = gold;
        grid.get_mut(0, 1).material = iron;
        grid.get_mut(0, 2).material = oxygen;

        solve(&mut grid, &materials, &config, 1.0);
        assert_eq!(grid.get(0, 0).material, gold);
        assert_eq!(grid.get(0, 1).material, iron);
        assert_eq!(grid.get(0, 2).material, oxygen);

        // Repeated passes stay put as well
        for _ in 0..10 {
            solve(&mut grid, &materials, &config, 1.0);
        }
        assert_eq!(grid.get(0, 2).material, oxygen);
    }

    #[test]
    fn bottom_up_sweep_carries_a_dense_cell_through_a_light_column() {
        let materials = lab();
        let gold = materials.id_of("Au").unwrap();
        let oxygen = materials.id_of("O2").unwrap();
        let config = Config::default();

        // Dense cell at the bottom of a light 1x4 column. The bottom-up
        // sweep carries it the whole way in one pass (each row visit sees
        // the value just swapped upward), so the pass behaves like one
        // bubble-sort sweep, not a converged sort.
        let mut grid = CellGrid::new(1, 4);
        for y in 0..3 {
            grid.get_mut(0, y).material = oxygen;
        }
        grid.get_mut(0, 3).material = gold;

        solve(&mut grid, &materials, &config, 1.0);
        assert_eq!(grid.get(0, 0).material, gold);
    }

    #[test]
    fn gravity_accumulates_into_vertical_velocity() {
        let materials = lab();
        let config = Config::default();
        let mut grid = CellGrid::new(2, 2);

        solve(&mut grid, &materials, &config, 0.5);
        for cell in grid.cells() {
            assert_eq!(cell.velocity.y, GRAVITY * 0.5);
            assert_eq!(cell.velocity.x, 0.0);
        }

        // speed multiplies the accumulation again on top of the scaled dt
        let fast = Config {
            simulation_speed: 2.0,
            ..Config::default()
        };
        let mut grid = CellGrid::new(1, 1);
        solve(&mut grid, &materials, &fast, 0.5);
        assert_eq!(grid.cells()[0].velocity.y, GRAVITY);
    }
}
