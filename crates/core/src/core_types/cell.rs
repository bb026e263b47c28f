//! Per-cell simulation state

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::material::MaterialId;

/// 2-D vector type used for per-cell velocity (grid cells per second).
pub type Vec2 = Vector2<f32>;

/// Ambient temperature every painted or spawned cell starts at (°C).
pub const AMBIENT_TEMPERATURE: f32 = 20.0;

/// Ambient pressure at sea level (Pa). Pressure is advisory: it is carried
/// and rendered but no solver mutates it yet.
pub const AMBIENT_PRESSURE: f32 = 101325.0;

/// State of one grid cell.
///
/// `material` is always a valid index into the material database; every
/// mutation path (paint, spawn, reaction products) writes ids that came from
/// the database. Temperature is unbounded in both directions - nothing
/// clamps it to physical limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Material occupying this cell
    pub material: MaterialId,
    /// Temperature (°C), unbounded
    pub temperature: f32,
    /// Pressure (Pa), display-only for now
    pub pressure: f32,
    /// Velocity in grid cells per second; only consumed by the thermal
    /// advection stage
    pub velocity: Vec2,
    /// Reserved flag for UI reaction highlighting, never set today
    pub recently_reacted: bool,
    /// When set, this cell re-emits `spawn_material` every tick
    pub is_spawner: bool,
    /// Material a spawner cell resets to
    pub spawn_material: MaterialId,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            material: 0,
            temperature: AMBIENT_TEMPERATURE,
            pressure: AMBIENT_PRESSURE,
            velocity: Vec2::zeros(),
            recently_reacted: false,
            is_spawner: false,
            spawn_material: 0,
        }
    }
}
