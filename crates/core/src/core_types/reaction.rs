//! Pairwise reaction catalog indexed by reactant id
//!
//! Each reaction names an unordered reactant pair, a product list and the
//! Arrhenius parameters used in expert mode. The database keeps a per-material
//! bucket of reaction indices so the engine can fetch every candidate
//! reaction for a cell's material in O(1).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::material::{CatalogError, MaterialDatabase, MaterialId};

/// One pairwise chemical reaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    /// First reactant; the pair is unordered, matching is symmetric
    pub reactant1: MaterialId,
    /// Second reactant
    pub reactant2: MaterialId,
    /// Products; only `products[0]` is applied to the primary cell today,
    /// the remaining entries are reserved for multi-product reactions
    pub products: Vec<MaterialId>,
    /// Arrhenius pre-exponential factor A (1/s)
    pub pre_exponential: f32,
    /// Activation energy Ea (J/mol)
    pub activation_energy: f32,
    /// Enthalpy change, applied directly as a signed temperature delta (°C)
    /// rather than true Joules. The bundled exothermic reactions carry
    /// negative values, so triggering them lowers the pair's temperature.
    pub delta_h: f32,
}

impl Reaction {
    /// True when `{a, b}` equals this reaction's unordered reactant pair.
    #[inline]
    pub fn matches(&self, a: MaterialId, b: MaterialId) -> bool {
        (self.reactant1 == a && self.reactant2 == b)
            || (self.reactant2 == a && self.reactant1 == b)
    }
}

/// Reaction catalog with a material-id index over an insertion-ordered arena.
#[derive(Debug, Clone, Default)]
pub struct ReactionDatabase {
    reactions: Vec<Reaction>,
    by_material: FxHashMap<MaterialId, Vec<usize>>,
}

impl ReactionDatabase {
    /// Empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the built-in reaction set against a loaded material catalog:
    /// NaOH + H2SO4 -> Water and Ethanol + O2 -> CO2.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownMaterial`] when the catalog is missing
    /// one of the materials the built-in reactions reference.
    pub fn builtin(materials: &MaterialDatabase) -> Result<Self, CatalogError> {
        let id = |name: &str| {
            materials
                .id_of(name)
                .ok_or_else(|| CatalogError::UnknownMaterial(name.to_string()))
        };

        let mut db = Self::new();
        db.add_reaction(Reaction {
            reactant1: id("NaOH")?,
            reactant2: id("H2SO4")?,
            products: vec![id("Water")?],
            pre_exponential: 0.01,
            activation_energy: 50000.0,
            delta_h: -500.0,
        });
        db.add_reaction(Reaction {
            reactant1: id("Ethanol")?,
            reactant2: id("O2")?,
            products: vec![id("CO2")?],
            pre_exponential: 0.05,
            activation_energy: 80000.0,
            delta_h: -800.0,
        });
        info!("loaded reaction catalog: {} reactions", db.len());
        Ok(db)
    }

    /// Register a reaction under both reactants' buckets.
    ///
    /// A self-reaction (`reactant1 == reactant2`) is registered twice in the
    /// same bucket, so lookups yield it twice per tick. That mirrors the
    /// original behavior and is kept as-is; see DESIGN.md.
    pub fn add_reaction(&mut self, reaction: Reaction) {
        let index = self.reactions.len();
        for key in [reaction.reactant1, reaction.reactant2] {
            self.by_material.entry(key).or_default().push(index);
        }
        self.reactions.push(reaction);
    }

    /// Every reaction in which `material` participates as either reactant,
    /// in insertion order. Empty for materials with no reactions.
    pub fn reactions_for(&self, material: MaterialId) -> impl Iterator<Item = &Reaction> {
        self.by_material
            .get(&material)
            .into_iter()
            .flatten()
            .map(|&index| &self.reactions[index])
    }

    /// Number of registered reactions.
    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    /// True when no reactions are registered.
    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }
}
