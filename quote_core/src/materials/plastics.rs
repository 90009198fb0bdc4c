//! Molding Resins
//!
//! Thermoplastic materials offered for quoting. The catalog is ordered: its
//! first entry doubles as the fallback for unknown material names.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{QuoteError, QuoteResult};

/// A single resin entry.
///
/// `factor` is carried with the catalog data but the cost formula does not
/// read it yet. Whether it was meant to scale processing cost is unresolved,
/// so it is kept as data only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Unique catalog key (e.g., "ABS")
    pub name: String,
    /// Density in g/cm³
    pub density: f64,
    /// Resin price per kilogram
    pub price_per_kg: f64,
    /// Processing factor (currently unused by the cost formula)
    #[serde(default = "default_factor")]
    pub factor: f64,
}

fn default_factor() -> f64 {
    1.0
}

impl Material {
    pub fn new(name: impl Into<String>, density: f64, price_per_kg: f64, factor: f64) -> Self {
        Material {
            name: name.into(),
            density,
            price_per_kg,
            factor,
        }
    }

    /// Validate physical properties.
    pub fn validate(&self) -> QuoteResult<()> {
        if self.name.trim().is_empty() {
            return Err(QuoteError::invalid_input(
                "materials.name",
                &self.name,
                "Material name must not be empty",
            ));
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(QuoteError::invalid_input(
                format!("materials[{}].density", self.name),
                self.density.to_string(),
                "Density must be positive",
            ));
        }
        if !self.price_per_kg.is_finite() || self.price_per_kg < 0.0 {
            return Err(QuoteError::invalid_input(
                format!("materials[{}].price_per_kg", self.name),
                self.price_per_kg.to_string(),
                "Price cannot be negative",
            ));
        }
        Ok(())
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Ordered, non-empty material catalog with unique names.
///
/// Serializes as a plain array of [`Material`]; deserialization re-runs the
/// same validation as [`MaterialCatalog::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Material>", into = "Vec<Material>")]
pub struct MaterialCatalog {
    materials: Vec<Material>,
}

impl MaterialCatalog {
    /// Build a catalog, rejecting empty lists, invalid entries and duplicate names.
    pub fn new(materials: Vec<Material>) -> QuoteResult<Self> {
        if materials.is_empty() {
            return Err(QuoteError::invalid_input(
                "materials",
                "[]",
                "Catalog must contain at least one material",
            ));
        }
        for (i, material) in materials.iter().enumerate() {
            material.validate()?;
            if materials[..i].iter().any(|m| m.name == material.name) {
                return Err(QuoteError::invalid_input(
                    "materials.name",
                    &material.name,
                    "Duplicate material name",
                ));
            }
        }
        Ok(MaterialCatalog { materials })
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Exact-name lookup that reports a missing material as an error.
    pub fn require(&self, name: &str) -> QuoteResult<&Material> {
        self.get(name).ok_or_else(|| QuoteError::material_not_found(name))
    }

    /// Lookup used by the calculator: unknown names fall back to the first
    /// catalog entry instead of failing.
    pub fn resolve(&self, name: &str) -> &Material {
        match self.get(name) {
            Some(material) => material,
            None => {
                let fallback = self.first();
                warn!(
                    requested = name,
                    fallback = %fallback.name,
                    "Unknown material, quoting with catalog default"
                );
                fallback
            }
        }
    }

    /// The default (first) material.
    pub fn first(&self) -> &Material {
        &self.materials[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.materials.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl TryFrom<Vec<Material>> for MaterialCatalog {
    type Error = QuoteError;

    fn try_from(materials: Vec<Material>) -> QuoteResult<Self> {
        MaterialCatalog::new(materials)
    }
}

impl From<MaterialCatalog> for Vec<Material> {
    fn from(catalog: MaterialCatalog) -> Self {
        catalog.materials
    }
}

impl Default for MaterialCatalog {
    /// The built-in catalog shipped with the crate.
    fn default() -> Self {
        crate::catalog_config::CatalogConfig::builtin().materials.clone()
    }
}
