//! Material catalog: physical properties for every substance the lab can hold
//!
//! Materials are loaded once at startup and referenced by dense integer id
//! everywhere else. The database is read-only after construction, so all
//! solvers can share it without synchronization.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Dense index into the [`MaterialDatabase`], assigned in catalog order.
///
/// Id 0 always exists and is the default material every grid cell starts
/// with ("Water" in the built-in catalog).
pub type MaterialId = u16;

/// Built-in catalog, same schema accepted by [`MaterialDatabase::from_json`].
const BUILTIN_CATALOG: &str = include_str!("catalog.json");

/// Physical properties of one substance.
///
/// `melting_point`, `boiling_point` and `electrical_conductivity` are not
/// consumed by any solver yet; they are kept for phase-change and
/// electrolysis work and for UI display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    /// Unique display name, also the catalog key
    pub name: String,
    /// Density (kg/m³) - drives the fluid settling pass
    pub density: f32,
    /// Specific heat capacity (J/(kg·K))
    pub specific_heat: f32,
    /// Thermal conductivity (W/(m·K)) - drives the diffusion weights
    pub thermal_conductivity: f32,
    /// Electrical conductivity (S/m, relative scale)
    pub electrical_conductivity: f32,
    /// Melting point (°C)
    pub melting_point: f32,
    /// Boiling point (°C)
    pub boiling_point: f32,
    /// Normalized RGB display color
    pub color: [f32; 3],
}

#[derive(Debug, Deserialize)]
struct Catalog {
    materials: Vec<Material>,
}

/// Failure while loading the material or reaction catalog.
///
/// Catalog loading happens once at startup; any of these aborts
/// initialization. There are no recoverable load errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog text is not valid JSON for the expected schema
    #[error("material catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two catalog entries share a name; ids are assigned by name lookup,
    /// so duplicates would shadow each other
    #[error("duplicate material name {0:?} in catalog")]
    DuplicateName(String),
    /// Id 0 must exist as the default cell material
    #[error("material catalog is empty; a default material at id 0 is required")]
    EmptyCatalog,
    /// A reaction names a material the catalog does not contain
    #[error("reaction references unknown material {0:?}")]
    UnknownMaterial(String),
}

/// Ordered, read-only material catalog with a name index.
#[derive(Debug, Clone)]
pub struct MaterialDatabase {
    materials: Vec<Material>,
    name_to_id: FxHashMap<String, MaterialId>,
}

impl MaterialDatabase {
    /// Build a database from an already-parsed material list.
    ///
    /// Ids are assigned densely in list order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyCatalog`] for an empty list and
    /// [`CatalogError::DuplicateName`] when two entries share a name.
    pub fn load(materials: Vec<Material>) -> Result<Self, CatalogError> {
        if materials.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        let mut name_to_id = FxHashMap::default();
        for (id, material) in materials.iter().enumerate() {
            let previous = name_to_id.insert(material.name.clone(), id as MaterialId);
            if previous.is_some() {
                return Err(CatalogError::DuplicateName(material.name.clone()));
            }
        }
        info!("loaded material catalog: {} materials", materials.len());
        Ok(Self {
            materials,
            name_to_id,
        })
    }

    /// Parse a JSON catalog (`{"materials": [...]}`) and build a database.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] on malformed JSON, otherwise the same
    /// failures as [`MaterialDatabase::load`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        Self::load(catalog.materials)
    }

    /// Load the built-in 14-material catalog.
    ///
    /// # Errors
    ///
    /// Propagates [`CatalogError`] from the shared loader; the embedded
    /// catalog is known-good, so failure here indicates a build problem.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Look up a material by id.
    ///
    /// The id is trusted to be in range: every id stored in the grid comes
    /// from this database, so an out-of-range id is a programming error,
    /// not a runtime condition. Checked in debug builds only.
    #[inline]
    pub fn get(&self, id: MaterialId) -> &Material {
        debug_assert!(
            usize::from(id) < self.materials.len(),
            "material id {id} out of range"
        );
        &self.materials[usize::from(id)]
    }

    /// Id for a material name, if present.
    pub fn id_of(&self, name: &str) -> Option<MaterialId> {
        self.name_to_id.get(name).copied()
    }

    /// Number of materials in the catalog.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// True when the catalog holds no materials (never the case after a
    /// successful load).
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterate `(id, material)` in catalog order, e.g. to populate a
    /// material picker.
    pub fn entries(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(id, material)| (id as MaterialId, material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads_with_water_as_default() {
        let db = MaterialDatabase::builtin().unwrap();
        assert_eq!(db.len(), 14);
        assert_eq!(db.get(0).name, "Water");
        assert_eq!(db.id_of("Au"), Some(7));
        assert_eq!(db.get(7).density, 19300.0);
    }

    #[test]
    fn ids_follow_catalog_order() {
        let db = MaterialDatabase::builtin().unwrap();
        for (id, material) in db.entries() {
            assert_eq!(db.id_of(&material.name), Some(id));
        }
    }

    #[test]
    fn duplicate_name_fails_to_load() {
        let json = r#"{"materials": [
            {"name": "X", "density": 1, "specificHeat": 1, "thermalConductivity": 1,
             "electricalConductivity": 0, "meltingPoint": 0, "boilingPoint": 100,
             "color": [0, 0, 0]},
            {"name": "X", "density": 2, "specificHeat": 1, "thermalConductivity": 1,
             "electricalConductivity": 0, "meltingPoint": 0, "boilingPoint": 100,
             "color": [0, 0, 0]}
        ]}"#;
        let err = MaterialDatabase::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName(name) if name == "X"));
    }

    #[test]
    fn empty_catalog_fails_to_load() {
        let err = MaterialDatabase::from_json(r#"{"materials": []}"#).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyCatalog));
    }

    #[test]
    fn malformed_json_fails_to_load() {
        assert!(matches!(
            MaterialDatabase::from_json("not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
