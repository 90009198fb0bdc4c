//! # Unit Types
//!
//! Type-safe wrappers for the units a molding quote passes through. These are
//! plain `f64` newtypes that serialize as bare numbers.
//!
//! ## Metric Units
//!
//! The geometry collaborator reports in the units molders quote in:
//! - Length: millimeters (mm)
//! - Volume: cubic centimeters (cm³)
//! - Mass: grams (g), kilograms (kg)
//! - Time: seconds (s)
//!
//! ## Example
//!
//! ```rust
//! use quote_core::units::{mass_of, CubicCentimeters, Kilograms};
//!
//! let shot: Kilograms = mass_of(CubicCentimeters(187.35), 1.05).into();
//! assert!((shot.0 - 0.1967175).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl Millimeters {
    /// Larger of two lengths. Like `f64::max`, a NaN operand is ignored in
    /// favor of the other one.
    pub fn max(self, other: Millimeters) -> Millimeters {
        Millimeters(self.0.max(other.0))
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in cubic centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicCentimeters(pub f64);

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in grams
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grams(pub f64);

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

impl From<Grams> for Kilograms {
    fn from(g: Grams) -> Self {
        Kilograms(g.0 / 1000.0)
    }
}

/// Mass of a volume at a given density in g/cm³
pub fn mass_of(volume: CubicCentimeters, density_g_cm3: f64) -> Grams {
    Grams(volume.0 * density_g_cm3)
}

// ============================================================================
// Time Units
// ============================================================================

/// Duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seconds(pub f64);
