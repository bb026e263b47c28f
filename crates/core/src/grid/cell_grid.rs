//! Fixed-size 2-D cell grid and its basic mutators
//!
//! The grid is the single shared mutable resource of the engine. It is
//! created once at simulation start, mutated every tick by the solvers and
//! tools, and by host-driven paint/spawn calls between ticks. Row-major
//! layout, y grows downward (row 0 renders at the top).

use crate::core_types::cell::{Cell, AMBIENT_TEMPERATURE};
use crate::core_types::material::MaterialId;

/// Dense `width x height` array of [`Cell`] in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Create a grid of default cells. Dimensions are fixed for the grid's
    /// lifetime; there is no resize.
    pub fn new(width: usize, height: usize) -> Self {
        CellGrid {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// True iff `(x, y)` addresses a cell.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Cell at `(x, y)`.
    ///
    /// Fast path used by the solver inner loops: bounds are the caller's
    /// responsibility (pre-check with [`CellGrid::in_bounds`]), verified in
    /// debug builds only.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &Cell {
        debug_assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of bounds");
        &self.cells[self.index(x, y)]
    }

    /// Mutable cell at `(x, y)`; same bounds contract as [`CellGrid::get`].
    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        debug_assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of bounds");
        let index = self.index(x, y);
        &mut self.cells[index]
    }

    /// All cells, row-major. Read-only boundary for renderers.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Swap the entire state of two cells (material, temperature, velocity,
    /// flags). Used by the fluid settling pass.
    pub(crate) fn swap_cells(&mut self, a: (usize, usize), b: (usize, usize)) {
        let ia = self.index(a.0, a.1);
        let ib = self.index(b.0, b.1);
        self.cells.swap(ia, ib);
    }

    /// Mark a cell as a spawner for `material`. Silently ignored when
    /// `(x, y)` is out of bounds, matching the lenient host-input contract.
    pub fn set_spawner(&mut self, x: i32, y: i32, material: MaterialId) {
        if self.in_bounds(x, y) {
            let cell = self.get_mut(x as usize, y as usize);
            cell.is_spawner = true;
            cell.spawn_material = material;
        }
    }

    /// Reset every spawner cell to its spawn material at ambient
    /// temperature. Runs unconditionally each tick; `_spawn_rate` is a
    /// reserved throttle with no effect yet.
    pub fn update_spawners(&mut self, _spawn_rate: f32) {
        for cell in &mut self.cells {
            if cell.is_spawner {
                cell.material = cell.spawn_material;
                cell.temperature = AMBIENT_TEMPERATURE;
            }
        }
    }

    /// Paint `material` over the square neighborhood of radius
    /// `brush_radius` centered on `(x, y)`, clipped to the grid. Painted
    /// cells reset to ambient temperature. Out-of-bounds portions are
    /// silently dropped.
    pub fn paint(&mut self, x: i32, y: i32, material: MaterialId, brush_radius: i32) {
        for dy in -brush_radius..=brush_radius {
            for dx in -brush_radius..=brush_radius {
                let (nx, ny) = (x + dx, y + dy);
                if self.in_bounds(nx, ny) {
                    let cell = self.get_mut(nx as usize, ny as usize);
                    cell.material = material;
                    cell.temperature = AMBIENT_TEMPERATURE;
                }
            }
        }
    }
}
