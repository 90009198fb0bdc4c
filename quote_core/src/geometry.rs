//! # Part Geometry
//!
//! The geometric properties a CAD analysis returns for a single part. The
//! quote engine only reads these values; it never parses CAD files itself.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "volume": 187.35,
//!   "dimensions": { "length": 65.0, "width": 42.0, "height": 75.0 },
//!   "wall_thickness": 1.8,
//!   "surface_area": null,
//!   "accuracy": "mocked"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, QuoteResult};
use crate::units::{CubicCentimeters, Millimeters};

/// Confidence in the geometry source.
///
/// Informational only: the cost formula never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accuracy {
    /// Exact B-rep analysis
    High,
    /// Tessellated or approximated analysis
    Medium,
    /// Blueprint values substituted by a mock analyzer
    #[default]
    Mocked,
    /// No analysis backed these numbers
    None,
}

impl Accuracy {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Accuracy::High => "High",
            Accuracy::Medium => "Medium",
            Accuracy::Mocked => "Mocked",
            Accuracy::None => "None",
        }
    }
}

impl std::fmt::Display for Accuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Bounding-box dimensions in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Dimensions { length, width, height }
    }

    /// Largest footprint edge (length or width). Height is the draw direction
    /// and does not size the mold plate.
    pub fn max_footprint(&self) -> Millimeters {
        Millimeters(self.length).max(Millimeters(self.width))
    }
}

/// Geometric properties of a molded part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Part volume in cm³
    pub volume: f64,

    /// Bounding-box dimensions in mm
    pub dimensions: Dimensions,

    /// Nominal wall thickness in mm
    pub wall_thickness: f64,

    /// Surface area in cm², when the analyzer reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_area: Option<f64>,

    /// Confidence tag for the source of these numbers
    #[serde(default)]
    pub accuracy: Accuracy,
}

/// Placeholder volume (cm³) used when analysis is unavailable
pub const PLACEHOLDER_VOLUME: f64 = 187.35;
/// Placeholder bounding box (mm)
pub const PLACEHOLDER_DIMENSIONS: Dimensions = Dimensions {
    length: 65.0,
    width: 42.0,
    height: 75.0,
};
/// Placeholder wall thickness (mm)
pub const PLACEHOLDER_WALL_THICKNESS: f64 = 1.8;

impl Geometry {
    pub fn new(volume: f64, dimensions: Dimensions, wall_thickness: f64, accuracy: Accuracy) -> Self {
        Geometry {
            volume,
            dimensions,
            wall_thickness,
            surface_area: None,
            accuracy,
        }
    }

    /// Fixed blueprint geometry the host substitutes when analysis fails, so
    /// the calculator still has something to quote.
    ///
    /// ```rust
    /// use quote_core::geometry::{Accuracy, Geometry};
    ///
    /// let g = Geometry::placeholder();
    /// assert_eq!(g.accuracy, Accuracy::Mocked);
    /// assert!(g.volume > 0.0);
    /// ```
    pub fn placeholder() -> Self {
        Geometry::new(
            PLACEHOLDER_VOLUME,
            PLACEHOLDER_DIMENSIONS,
            PLACEHOLDER_WALL_THICKNESS,
            Accuracy::Mocked,
        )
    }

    pub fn with_surface_area(mut self, surface_area_cm2: f64) -> Self {
        self.surface_area = Some(surface_area_cm2);
        self
    }

    /// Volume as a typed unit
    pub fn volume_cm3(&self) -> CubicCentimeters {
        CubicCentimeters(self.volume)
    }

    /// Strict validation for data arriving from outside (analysis results,
    /// CLI input, saved files).
    ///
    /// The calculator does not call this; it applies its own narrower
    /// "computable" checks and reports `None` instead of an error.
    pub fn validate(&self) -> QuoteResult<()> {
        check_positive("volume", self.volume)?;
        self.validate_measurements()
    }

    /// Like [`Geometry::validate`] but leaves `volume` to the calculator,
    /// which reports a non-positive volume as not computable.
    pub fn validate_measurements(&self) -> QuoteResult<()> {
        check_positive("dimensions.length", self.dimensions.length)?;
        check_positive("dimensions.width", self.dimensions.width)?;
        check_positive("dimensions.height", self.dimensions.height)?;
        check_positive("wall_thickness", self.wall_thickness)?;
        if let Some(area) = self.surface_area {
            check_positive("surface_area", area)?;
        }
        Ok(())
    }
}

fn check_positive(field: &str, value: f64) -> QuoteResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(QuoteError::invalid_input(
            field,
            value.to_string(),
            "Must be a positive, finite number",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_valid() {
        let g = Geometry::placeholder();
        assert!(g.validate().is_ok());
        assert_eq!(g.dimensions.length, 65.0);
        assert_eq!(g.wall_thickness, 1.8);
    }

    #[test]
    fn test_max_footprint_ignores_height() {
        let dims = Dimensions::new(65.0, 42.0, 75.0);
        assert_eq!(dims.max_footprint(), Millimeters(65.0));
        let dims = Dimensions::new(30.0, 90.0, 500.0);
        assert_eq!(dims.max_footprint(), Millimeters(90.0));
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        let mut g = Geometry::placeholder();
        g.wall_thickness = 0.0;
        let err = g.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let mut g = Geometry::placeholder();
        g.dimensions.width = f64::NAN;
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_measurements_leave_volume_alone() {
        let mut g = Geometry::placeholder();
        g.volume = 0.0;
        assert!(g.validate().is_err());
        assert!(g.validate_measurements().is_ok());

        g.dimensions.height = -1.0;
        let err = g.validate_measurements().unwrap_err();
        assert!(err.to_string().contains("dimensions.height"));
    }

    #[test]
    fn test_accuracy_serialization() {
        assert_eq!(serde_json::to_string(&Accuracy::High).unwrap(), "\"high\"");
        let parsed: Accuracy = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(parsed, Accuracy::None);
    }

    #[test]
    fn test_geometry_json_defaults() {
        let json = r#"{
            "volume": 10.0,
            "dimensions": { "length": 1.0, "width": 2.0, "height": 3.0 },
            "wall_thickness": 2.0
        }"#;
        let g: Geometry = serde_json::from_str(json).unwrap();
        assert_eq!(g.accuracy, Accuracy::Mocked);
        assert!(g.surface_area.is_none());
    }
}
