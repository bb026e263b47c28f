//! Operator tools: rectangular external perturbations
//!
//! Tools sit on the grid as axis-aligned rectangles and run after the
//! solvers every tick, in list order - when two tools overlap, the later
//! one applies on top of the earlier one within the same tick. They only
//! ever touch temperature; material identity is solver territory.

use serde::{Deserialize, Serialize};

use crate::core_types::config::Config;
use crate::grid::CellGrid;

/// Axis-aligned tool footprint in grid coordinates, `[x, x+width) x
/// [y, y+height)`, clipped to the grid when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Effect variant. The set is closed and small, so a tagged enum with one
/// dispatch function replaces a trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    /// Adds 20 °C/s (expert) or 10 °C/s to its footprint
    Heater,
    /// Removes 10 °C/s (expert) or 5 °C/s from its footprint
    Cooler,
    /// Containment walls; placeholder with a renderable footprint and no
    /// effect yet
    Beaker,
}

/// A placed tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Display name shown by the host UI
    pub name: String,
    pub rect: ToolRect,
    pub kind: ToolKind,
}

impl Tool {
    pub fn new(kind: ToolKind, name: impl Into<String>, rect: ToolRect) -> Self {
        Tool {
            name: name.into(),
            rect,
            kind,
        }
    }

    /// Apply one tick's worth of this tool's effect to every in-bounds cell
    /// of its footprint. Never alters material identity.
    pub fn apply(&self, grid: &mut CellGrid, config: &Config, dt: f32) {
        let rate = match self.kind {
            ToolKind::Heater => {
                if config.expert_mode {
                    20.0
                } else {
                    10.0
                }
            }
            ToolKind::Cooler => {
                if config.expert_mode {
                    -10.0
                } else {
                    -5.0
                }
            }
            ToolKind::Beaker => return,
        };

        for y in self.rect.y..self.rect.y + self.rect.height {
            for x in self.rect.x..self.rect.x + self.rect.width {
                if grid.in_bounds(x, y) {
                    grid.get_mut(x as usize, y as usize).temperature += rate * dt;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i32, y: i32, width: i32, height: i32) -> ToolRect {
        ToolRect {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn heater_rate_depends_on_expert_mode() {
        let mut grid = CellGrid::new(2, 2);
        let heater = Tool::new(ToolKind::Heater, "Heater", rect(0, 0, 1, 1));

        let expert = Config::default();
        heater.apply(&mut grid, &expert, 0.5);
        assert_eq!(grid.get(0, 0).temperature, 30.0); // 20 ambient + 20 * 0.5

        let simple = Config {
            expert_mode: false,
            ..Config::default()
        };
        heater.apply(&mut grid, &simple, 0.5);
        assert_eq!(grid.get(0, 0).temperature, 35.0); // + 10 * 0.5
    }

    #[test]
    fn cooler_subtracts_within_footprint_only() {
        let mut grid = CellGrid::new(3, 3);
        let cooler = Tool::new(ToolKind::Cooler, "Cooler", rect(1, 1, 1, 1));
        let config = Config::default();

        cooler.apply(&mut grid, &config, 1.0);
        assert_eq!(grid.get(1, 1).temperature, 10.0);
        assert_eq!(grid.get(0, 0).temperature, 20.0);
        assert_eq!(grid.get(2, 2).temperature, 20.0);
    }

    #[test]
    fn footprint_clips_to_grid_bounds() {
        let mut grid = CellGrid::new(3, 3);
        let heater = Tool::new(ToolKind::Heater, "Heater", rect(-2, -2, 4, 4));
        let config = Config::default();

        heater.apply(&mut grid, &config, 1.0);
        // Only the overlapping 2x2 corner heats up
        for y in 0..3 {
            for x in 0..3 {
                let expected = if x <= 1 && y <= 1 { 40.0 } else { 20.0 };
                assert_eq!(grid.get(x, y).temperature, expected, "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn beaker_has_no_effect() {
        let mut grid = CellGrid::new(3, 3);
        let before = grid.clone();
        let beaker = Tool::new(ToolKind::Beaker, "Beaker", rect(0, 0, 3, 3));
        beaker.apply(&mut grid, &Config::default(), 1.0);
        assert_eq!(grid, before);
    }

    #[test]
    fn tools_never_alter_material() {
        let mut grid = CellGrid::new(2, 2);
        grid.get_mut(0, 0).material = 7;
        let heater = Tool::new(ToolKind::Heater, "Heater", rect(0, 0, 2, 2));
        heater.apply(&mut grid, &Config::default(), 1.0);
        assert_eq!(grid.get(0, 0).material, 7);
    }
}
