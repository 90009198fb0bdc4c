//! Injection Molding Presses
//!
//! Machine tiers ordered by the largest mold they accept. The tier decides
//! both the hourly machine rate and (through the mold cost proxy) the tooling
//! estimate.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{QuoteError, QuoteResult};
use crate::units::Millimeters;

/// A press size class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineTier {
    /// Unique catalog key (e.g., "Small")
    pub size_label: String,
    /// Machine time rate per hour
    pub rate_per_hour: f64,
    /// Largest mold edge this press accepts, in mm
    pub max_mold_size: f64,
}

impl MachineTier {
    pub fn new(size_label: impl Into<String>, rate_per_hour: f64, max_mold_size: f64) -> Self {
        MachineTier {
            size_label: size_label.into(),
            rate_per_hour,
            max_mold_size,
        }
    }

    /// Whether a mold of this size fits the press.
    pub fn accepts(&self, mold_size: Millimeters) -> bool {
        self.max_mold_size >= mold_size.0
    }

    fn validate(&self) -> QuoteResult<()> {
        if self.size_label.trim().is_empty() {
            return Err(QuoteError::invalid_input(
                "machines.size_label",
                &self.size_label,
                "Size label must not be empty",
            ));
        }
        if !self.rate_per_hour.is_finite() || self.rate_per_hour <= 0.0 {
            return Err(QuoteError::invalid_input(
                format!("machines[{}].rate_per_hour", self.size_label),
                self.rate_per_hour.to_string(),
                "Hourly rate must be positive",
            ));
        }
        if !self.max_mold_size.is_finite() || self.max_mold_size <= 0.0 {
            return Err(QuoteError::invalid_input(
                format!("machines[{}].max_mold_size", self.size_label),
                self.max_mold_size.to_string(),
                "Max mold size must be positive",
            ));
        }
        Ok(())
    }
}

impl std::fmt::Display for MachineTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (≤ {:.0} mm)", self.size_label, self.max_mold_size)
    }
}

/// Non-empty machine catalog in strictly ascending capacity order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MachineTier>", into = "Vec<MachineTier>")]
pub struct MachineCatalog {
    tiers: Vec<MachineTier>,
}

impl MachineCatalog {
    /// Build a catalog. Tiers must be unique and listed smallest first; an
    /// out-of-order catalog is rejected rather than sorted so the file stays
    /// the single source of truth for tier order.
    pub fn new(tiers: Vec<MachineTier>) -> QuoteResult<Self> {
        if tiers.is_empty() {
            return Err(QuoteError::invalid_input(
                "machines",
                "[]",
                "Catalog must contain at least one machine tier",
            ));
        }
        for (i, tier) in tiers.iter().enumerate() {
            tier.validate()?;
            if tiers[..i].iter().any(|t| t.size_label == tier.size_label) {
                return Err(QuoteError::invalid_input(
                    "machines.size_label",
                    &tier.size_label,
                    "Duplicate size label",
                ));
            }
            if i > 0 && tiers[i - 1].max_mold_size >= tier.max_mold_size {
                return Err(QuoteError::invalid_input(
                    format!("machines[{}].max_mold_size", tier.size_label),
                    tier.max_mold_size.to_string(),
                    "Tiers must be listed in ascending max_mold_size order",
                ));
            }
        }
        Ok(MachineCatalog { tiers })
    }

    /// Smallest tier that accepts the mold, or the largest tier when the mold
    /// exceeds every press.
    pub fn select_for_mold(&self, mold_size: Millimeters) -> &MachineTier {
        match self.tiers.iter().find(|t| t.accepts(mold_size)) {
            Some(tier) => tier,
            None => {
                let largest = self.largest();
                warn!(
                    mold_size_mm = mold_size.0,
                    tier = %largest.size_label,
                    max_mold_size = largest.max_mold_size,
                    "Mold exceeds every press, quoting on largest tier"
                );
                largest
            }
        }
    }

    pub fn get(&self, size_label: &str) -> Option<&MachineTier> {
        self.tiers.iter().find(|t| t.size_label == size_label)
    }

    /// The highest-capacity tier.
    pub fn largest(&self) -> &MachineTier {
        &self.tiers[self.tiers.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &MachineTier> {
        self.tiers.iter()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl TryFrom<Vec<MachineTier>> for MachineCatalog {
    type Error = QuoteError;

    fn try_from(tiers: Vec<MachineTier>) -> QuoteResult<Self> {
        MachineCatalog::new(tiers)
    }
}

impl From<MachineCatalog> for Vec<MachineTier> {
    fn from(catalog: MachineCatalog) -> Self {
        catalog.tiers
    }
}

impl Default for MachineCatalog {
    /// The built-in press lineup shipped with the crate.
    fn default() -> Self {
        crate::catalog_config::CatalogConfig::builtin().machines.clone()
    }
}
