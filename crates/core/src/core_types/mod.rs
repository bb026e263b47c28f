//! Core types and catalogs

pub mod cell;
pub mod config;
pub mod material;
pub mod reaction;

pub use cell::{Cell, Vec2, AMBIENT_PRESSURE, AMBIENT_TEMPERATURE};
pub use config::{Config, DisplayMode};
pub use material::{CatalogError, Material, MaterialDatabase, MaterialId};
pub use reaction::{Reaction, ReactionDatabase};
