//! # Catalog Configuration
//!
//! Material and machine catalogs are versioned configuration data, stored as
//! TOML. The crate embeds a default catalog at compile time; a shop can point
//! the host at its own file with the same layout:
//!
//! ```toml
//! version = "1.0.0"
//!
//! [[materials]]
//! name = "ABS"
//! density = 1.05
//! price_per_kg = 3.50
//! factor = 1.0
//!
//! [[machines]]
//! size_label = "Small"
//! rate_per_hour = 45.0
//! max_mold_size = 300.0
//! ```
//!
//! A user catalog replaces the built-in one wholesale; entries are not merged.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{QuoteError, QuoteResult};
use crate::materials::{MachineCatalog, MaterialCatalog};

/// Catalog shipped with the crate
const BUILTIN_CATALOG_TOML: &str = include_str!("../data/catalog.toml");

static BUILTIN: Lazy<CatalogConfig> = Lazy::new(|| {
    CatalogConfig::from_toml_str(BUILTIN_CATALOG_TOML)
        .unwrap_or_else(|e| panic!("embedded catalog.toml is invalid: {e}"))
});

/// Both catalogs plus the version tag of the document they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog revision, recorded so quotes can be traced to price lists
    pub version: String,
    pub materials: MaterialCatalog,
    pub machines: MachineCatalog,
}

impl CatalogConfig {
    /// The embedded default catalog.
    pub fn builtin() -> &'static CatalogConfig {
        &BUILTIN
    }

    /// Parse a catalog document. Catalog validation (non-empty, unique keys,
    /// ascending tiers) runs as part of deserialization.
    pub fn from_toml_str(contents: &str) -> QuoteResult<Self> {
        let config: CatalogConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Render the catalog as TOML, e.g. as a starting point for a shop file.
    pub fn to_toml_string(&self) -> QuoteResult<String> {
        toml::to_string_pretty(self).map_err(|e| QuoteError::serialization(e.to_string()))
    }

    /// Load a catalog file from disk.
    pub fn load(path: &Path) -> QuoteResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| QuoteError::file_error("read catalog", path.display().to_string(), e.to_string()))?;
        let config = Self::from_toml_str(&contents).map_err(|e| match e {
            QuoteError::SerializationError { reason } => {
                QuoteError::serialization(format!("Invalid catalog in {}: {}", path.display(), reason))
            }
            other => other,
        })?;
        info!(
            path = %path.display(),
            version = %config.version,
            materials = config.materials.len(),
            machines = config.machines.len(),
            "Loaded catalog"
        );
        Ok(config)
    }

    /// Load `path` when given, otherwise fall back to the built-in catalog.
    pub fn load_or_builtin(path: Option<&Path>) -> QuoteResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                debug!(version = %BUILTIN.version, "Using built-in catalog");
                Ok(Self::builtin().clone())
            }
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
