//! # Injection Molding Quote
//!
//! Turns part geometry, a resin, a press lineup and the customer's process
//! parameters into an itemized per-part cost and a total for the run.
//!
//! ## Cost Model
//!
//! Per part, in this order:
//!
//! 1. **Material**: `weight = volume × density`, priced per kg, plus a flat
//!    color premium of [`COLOR_PREMIUM_RATE`] on the resin cost.
//! 2. **Cycle time**: `BASE_CYCLE_TIME + wall_thickness × THICKNESS_FACTOR`.
//!    Cooling dominates, and it grows with wall thickness.
//! 3. **Throughput**: `3600 / cycle_time × cavities` parts per hour.
//! 4. **Press**: mold edge is `max(length, width) × MOLD_BASE_MULTIPLIER`;
//!    the smallest press that takes it is used, the largest if none does.
//! 5. **Machine time**: press rate divided by throughput.
//! 6. **Tooling**: `FIXED_MOLD_BASE + press rate × MOLD_RATE_MULTIPLIER`,
//!    spread over the whole run.
//! 7. **Scrap**: [`SCRAP_RATE`] on top of everything above.
//!
//! ## Not Computable
//!
//! [`calculate`] returns `None` (never panics, never yields NaN/∞) when the
//! volume is not positive, a priced length is not finite, the quantity or
//! cavity count is zero, or the throughput degenerates. [`try_calculate`] returns the same breakdown but
//! says why a quote could not be made.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculations::quote::{calculate, ProcessParameters};
//! use quote_core::geometry::{Accuracy, Dimensions, Geometry};
//! use quote_core::materials::{MachineCatalog, MaterialCatalog};
//!
//! let geometry = Geometry::new(187.35, Dimensions::new(65.0, 42.0, 75.0), 1.8, Accuracy::High);
//! let params = ProcessParameters::new("ABS", 1000, 1);
//!
//! let quote = calculate(
//!     &geometry,
//!     &params,
//!     &MaterialCatalog::default(),
//!     &MachineCatalog::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(quote.recommended_machine.size_label, "Small");
//! assert!((quote.total_per_part - 16.1225).abs() < 0.001);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{QuoteError, QuoteResult};
use crate::geometry::Geometry;
use crate::materials::{MachineCatalog, MachineTier, MaterialCatalog};
use crate::units::{mass_of, Kilograms, Millimeters, Seconds};

/// Premium on resin cost for colorant, applied to every color option
pub const COLOR_PREMIUM_RATE: f64 = 0.02;
/// Fixed part of the cycle (injection, hold, ejection), seconds
pub const BASE_CYCLE_TIME: f64 = 5.0;
/// Cooling time added per millimeter of wall, seconds
pub const THICKNESS_FACTOR: f64 = 4.0;
/// Mold plate edge as a multiple of the part's largest footprint edge
pub const MOLD_BASE_MULTIPLIER: f64 = 2.8;
/// Fixed tooling cost floor
pub const FIXED_MOLD_BASE: f64 = 10_000.0;
/// Tooling cost added per unit of press hourly rate
pub const MOLD_RATE_MULTIPLIER: f64 = 100.0;
/// Fraction of parts scrapped (and paid for) during production
pub const SCRAP_RATE: f64 = 0.05;
/// Throughput at or below this many parts per hour is treated as degenerate
pub const MIN_PARTS_PER_HOUR: f64 = 1e-6;

/// Part color.
///
/// No option changes the price: the color premium is flat. `Black` and
/// `Custom` are kept so saved quotes record the customer's choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    #[default]
    Natural,
    Black,
    Custom,
}

impl ColorOption {
    /// All color options for UI selection
    pub const ALL: [ColorOption; 3] = [ColorOption::Natural, ColorOption::Black, ColorOption::Custom];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> QuoteResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "natural" | "clear" | "none" => Ok(ColorOption::Natural),
            "black" => Ok(ColorOption::Black),
            "custom" | "match" | "pantone" => Ok(ColorOption::Custom),
            _ => Err(QuoteError::invalid_input(
                "color",
                s,
                "Expected one of: natural, black, custom",
            )),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ColorOption::Natural => "Natural",
            ColorOption::Black => "Black",
            ColorOption::Custom => "Custom",
        }
    }
}

impl std::fmt::Display for ColorOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Customer-chosen manufacturing parameters.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material_id": "ABS",
///   "quantity": 1000,
///   "cavities": 1,
///   "color": "natural"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessParameters {
    /// Material catalog key; unknown names quote with the catalog default
    pub material_id: String,

    /// Production run size (parts)
    pub quantity: u32,

    /// Parts produced per machine cycle
    pub cavities: u32,

    /// Part color (does not affect price)
    #[serde(default)]
    pub color: ColorOption,
}

impl ProcessParameters {
    pub fn new(material_id: impl Into<String>, quantity: u32, cavities: u32) -> Self {
        ProcessParameters {
            material_id: material_id.into(),
            quantity,
            cavities,
            color: ColorOption::default(),
        }
    }

    pub fn with_color(mut self, color: ColorOption) -> Self {
        self.color = color;
        self
    }
}

impl Default for ProcessParameters {
    fn default() -> Self {
        ProcessParameters::new("ABS", 1000, 1)
    }
}

/// Itemized cost of one quote. All money values are per part except
/// `total_quote`.
///
/// `material_cost` already includes `color_premium`; the premium is broken
/// out so it can be shown on its own line. The line items satisfy
/// `material_cost + machine_cost + mold_cost + scrap_cost == total_per_part`
/// up to floating-point rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Resin plus color premium, per part
    pub material_cost: f64,

    /// Press time, per part
    pub machine_cost: f64,

    /// Tooling amortized over the run, per part
    pub mold_cost: f64,

    /// Colorant premium (included in `material_cost`), per part
    pub color_premium: f64,

    /// Scrap allowance, per part
    pub scrap_cost: f64,

    /// Everything above plus scrap, per part
    pub total_per_part: f64,

    /// `total_per_part × quantity`
    pub total_quote: f64,

    /// Seconds per machine cycle
    pub cycle_time: f64,

    /// Parts per hour across all cavities
    pub parts_per_hour: f64,

    /// Press the part is quoted on
    pub recommended_machine: MachineTier,

    /// Resin cost before color premium, per part
    pub raw_material_cost: f64,

    /// Shot weight of one part in grams
    pub part_weight_g: f64,

    /// Estimated mold plate edge in mm
    pub mold_size_mm: f64,

    /// Total tooling estimate before amortization
    pub mold_estimate: f64,
}

impl CostBreakdown {
    /// Per-part cost before the scrap allowance.
    pub fn cost_before_scrap(&self) -> f64 {
        self.material_cost + self.machine_cost + self.mold_cost
    }

    /// Whether every number in the breakdown is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.material_cost,
            self.machine_cost,
            self.mold_cost,
            self.color_premium,
            self.scrap_cost,
            self.total_per_part,
            self.total_quote,
            self.cycle_time,
            self.parts_per_hour,
            self.raw_material_cost,
            self.part_weight_g,
            self.mold_size_mm,
            self.mold_estimate,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Compute a quote, or `None` when the inputs do not admit one.
///
/// Equivalent to `try_calculate(..).ok()`.
pub fn calculate(
    geometry: &Geometry,
    parameters: &ProcessParameters,
    materials: &MaterialCatalog,
    machines: &MachineCatalog,
) -> Option<CostBreakdown> {
    try_calculate(geometry, parameters, materials, machines).ok()
}

/// Compute a quote, explaining a missing result with
/// [`QuoteError::NotComputable`].
pub fn try_calculate(
    geometry: &Geometry,
    parameters: &ProcessParameters,
    materials: &MaterialCatalog,
    machines: &MachineCatalog,
) -> QuoteResult<CostBreakdown> {
    if !(geometry.volume.is_finite() && geometry.volume > 0.0) {
        return Err(QuoteError::not_computable(format!(
            "part volume must be positive (got {})",
            geometry.volume
        )));
    }
    let priced_lengths = [
        ("length", geometry.dimensions.length),
        ("width", geometry.dimensions.width),
        ("wall thickness", geometry.wall_thickness),
    ];
    if let Some((field, value)) = priced_lengths.iter().find(|(_, v)| !v.is_finite()) {
        return Err(QuoteError::not_computable(format!(
            "part {field} must be finite (got {value})"
        )));
    }
    if parameters.quantity == 0 {
        return Err(QuoteError::not_computable("quantity must be at least 1"));
    }
    if parameters.cavities == 0 {
        return Err(QuoteError::not_computable("cavity count must be at least 1"));
    }

    let material = materials.resolve(&parameters.material_id);

    // 1. Material
    let weight_g = mass_of(geometry.volume_cm3(), material.density);
    let weight_kg: Kilograms = weight_g.into();
    let raw_material_cost = weight_kg.0 * material.price_per_kg;
    let color_premium = raw_material_cost * COLOR_PREMIUM_RATE;
    let total_material_cost = raw_material_cost + color_premium;

    // 2. Cycle time
    let cycle_time = Seconds(BASE_CYCLE_TIME + geometry.wall_thickness * THICKNESS_FACTOR);
    if !cycle_time.0.is_finite() || cycle_time.0 <= 0.0 {
        return Err(QuoteError::not_computable(format!(
            "cycle time {} s is not a usable duration",
            cycle_time.0
        )));
    }

    // 3. Throughput
    let parts_per_shot = f64::from(parameters.cavities);
    let parts_per_minute = (60.0 / cycle_time.0) * parts_per_shot;
    let parts_per_hour = parts_per_minute * 60.0;
    if !parts_per_hour.is_finite() || parts_per_hour <= MIN_PARTS_PER_HOUR {
        return Err(QuoteError::not_computable(format!(
            "throughput of {parts_per_hour:e} parts/hour is degenerate"
        )));
    }

    // 4. Press
    let mold_size = Millimeters(geometry.dimensions.max_footprint().0 * MOLD_BASE_MULTIPLIER);
    let machine = machines.select_for_mold(mold_size);

    // 5. Machine time
    let machine_cost = machine.rate_per_hour / parts_per_hour;

    // 6. Tooling
    let quantity = f64::from(parameters.quantity);
    let mold_estimate = FIXED_MOLD_BASE + machine.rate_per_hour * MOLD_RATE_MULTIPLIER;
    let mold_cost = mold_estimate / quantity;

    // 7. Scrap and totals
    let cost_before_scrap = total_material_cost + machine_cost + mold_cost;
    let scrap_cost = cost_before_scrap * SCRAP_RATE;
    let total_per_part = cost_before_scrap * (1.0 + SCRAP_RATE);
    let total_quote = total_per_part * quantity;

    let breakdown = CostBreakdown {
        material_cost: total_material_cost,
        machine_cost,
        mold_cost,
        color_premium,
        scrap_cost,
        total_per_part,
        total_quote,
        cycle_time: cycle_time.0,
        parts_per_hour,
        recommended_machine: machine.clone(),
        raw_material_cost,
        part_weight_g: weight_g.0,
        mold_size_mm: mold_size.0,
        mold_estimate,
    };

    if !breakdown.is_finite() {
        return Err(QuoteError::not_computable("cost breakdown overflowed"));
    }

    debug!(
        material = %material.name,
        machine = %machine.size_label,
        quantity = parameters.quantity,
        cavities = parameters.cavities,
        total_per_part,
        total_quote,
        "Computed quote"
    );

    Ok(breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Accuracy, Dimensions};
    use crate::materials::{Material, MachineTier};
    use proptest::prelude::*;

    fn bracket() -> Geometry {
        Geometry::new(187.35, Dimensions::new(65.0, 42.0, 75.0), 1.8, Accuracy::High)
    }

    fn quote(geometry: &Geometry, params: &ProcessParameters) -> Option<CostBreakdown> {
        calculate(
            geometry,
            params,
            &MaterialCatalog::default(),
            &MachineCatalog::default(),
        )
    }

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_abs_bracket_worked_example() {
        let q = quote(&bracket(), &ProcessParameters::new("ABS", 1000, 1)).unwrap();

        // cycle = 5 + 1.8 * 4
        assert_close(q.cycle_time, 12.2, 1e-9);
        // (60 / 12.2) * 1 * 60
        assert_close(q.parts_per_hour, 295.0820, 1e-3);
        // max(65, 42) * 2.8
        assert_close(q.mold_size_mm, 182.0, 1e-9);
        assert_eq!(q.recommended_machine.size_label, "Small");
        assert_close(q.machine_cost, 0.1525, 1e-4);

        assert_close(q.part_weight_g, 196.7175, 1e-9);
        assert_close(q.raw_material_cost, 0.6885, 1e-4);
        assert_close(q.color_premium, 0.01377, 1e-5);
        assert_close(q.material_cost, 0.7023, 1e-4);

        assert_close(q.mold_estimate, 14_500.0, 1e-9);
        assert_close(q.mold_cost, 14.5, 1e-12);

        assert_close(q.cost_before_scrap(), 15.3548, 1e-3);
        assert_close(q.total_per_part, 16.1225, 1e-3);
        assert_close(q.total_quote, 16_122.5, 1.0);
    }

    #[test]
    fn test_zero_volume_not_computable() {
        let mut g = bracket();
        g.volume = 0.0;
        assert!(quote(&g, &ProcessParameters::default()).is_none());
        g.volume = -3.0;
        assert!(quote(&g, &ProcessParameters::default()).is_none());
        g.volume = f64::NAN;
        assert!(quote(&g, &ProcessParameters::default()).is_none());
    }

    #[test]
    fn test_zero_quantity_or_cavities_not_computable() {
        assert!(quote(&bracket(), &ProcessParameters::new("ABS", 0, 1)).is_none());
        assert!(quote(&bracket(), &ProcessParameters::new("ABS", 1000, 0)).is_none());
    }

    #[test]
    fn test_try_calculate_explains_none() {
        let err = try_calculate(
            &bracket(),
            &ProcessParameters::new("ABS", 0, 1),
            &MaterialCatalog::default(),
            &MachineCatalog::default(),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "NOT_COMPUTABLE");
        assert!(err.to_string().contains("quantity"));
    }

    #[test]
    fn test_degenerate_throughput_not_computable() {
        let mut g = bracket();
        g.wall_thickness = f64::INFINITY;
        assert!(quote(&g, &ProcessParameters::default()).is_none());

        g.wall_thickness = f64::MAX;
        assert!(quote(&g, &ProcessParameters::default()).is_none());

        // Negative thickness drives the cycle time through zero
        g.wall_thickness = -1.25;
        assert!(quote(&g, &ProcessParameters::default()).is_none());
    }

    #[test]
    fn test_vanishing_throughput_not_computable() {
        // Finite cycle time, but far below one part per million hours
        let mut g = bracket();
        g.wall_thickness = 1e300;
        let err = try_calculate(
            &g,
            &ProcessParameters::default(),
            &MaterialCatalog::default(),
            &MachineCatalog::default(),
        )
        .unwrap_err();

        match err {
            QuoteError::NotComputable { reason } => {
                assert!(reason.starts_with("throughput of "), "{reason}");
                assert!(reason.contains("e-"), "{reason}");
                assert!(reason.len() < 80, "{reason}");
            }
            other => panic!("expected NotComputable, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_footprint_not_computable() {
        let mut g = bracket();
        g.dimensions.length = f64::NAN;
        assert!(quote(&g, &ProcessParameters::default()).is_none());

        let mut g = bracket();
        g.dimensions.width = f64::INFINITY;
        assert!(quote(&g, &ProcessParameters::default()).is_none());

        let mut g = bracket();
        g.wall_thickness = f64::NAN;
        let err = try_calculate(
            &g,
            &ProcessParameters::default(),
            &MaterialCatalog::default(),
            &MachineCatalog::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("wall thickness"));
    }

    #[test]
    fn test_unknown_material_uses_first_entry() {
        let known = quote(&bracket(), &ProcessParameters::new("ABS", 1000, 1)).unwrap();
        let unknown = quote(&bracket(), &ProcessParameters::new("Unobtainium", 1000, 1)).unwrap();
        assert_eq!(known, unknown);
    }

    #[test]
    fn test_other_material_changes_only_material_cost() {
        let abs = quote(&bracket(), &ProcessParameters::new("ABS", 1000, 1)).unwrap();
        let pc = quote(&bracket(), &ProcessParameters::new("PC", 1000, 1)).unwrap();
        assert!(pc.material_cost > abs.material_cost);
        assert_eq!(pc.machine_cost, abs.machine_cost);
        assert_eq!(pc.mold_cost, abs.mold_cost);
    }

    #[test]
    fn test_color_does_not_affect_price() {
        let natural = quote(&bracket(), &ProcessParameters::default()).unwrap();
        for color in ColorOption::ALL {
            let params = ProcessParameters::default().with_color(color);
            assert_eq!(quote(&bracket(), &params).unwrap(), natural);
        }
    }

    #[test]
    fn test_material_factor_is_inert() {
        let machines = MachineCatalog::default();
        let plain = MaterialCatalog::new(vec![Material::new("ABS", 1.05, 3.50, 1.0)]).unwrap();
        let scaled = MaterialCatalog::new(vec![Material::new("ABS", 1.05, 3.50, 7.5)]).unwrap();
        let params = ProcessParameters::default();
        assert_eq!(
            calculate(&bracket(), &params, &plain, &machines),
            calculate(&bracket(), &params, &scaled, &machines)
        );
    }

    #[test]
    fn test_oversized_part_quotes_on_largest_press() {
        let mut g = bracket();
        g.dimensions = Dimensions::new(900.0, 400.0, 120.0);
        let q = quote(&g, &ProcessParameters::default()).unwrap();
        assert_eq!(q.recommended_machine.size_label, "X-Large");
        assert_close(q.mold_estimate, 10_000.0 + 140.0 * 100.0, 1e-9);
    }

    #[test]
    fn test_cavities_scale_throughput() {
        let one = quote(&bracket(), &ProcessParameters::new("ABS", 1000, 1)).unwrap();
        let four = quote(&bracket(), &ProcessParameters::new("ABS", 1000, 4)).unwrap();
        assert_close(four.parts_per_hour, one.parts_per_hour * 4.0, 1e-9);
        assert!(four.machine_cost < one.machine_cost);
        assert_eq!(four.cycle_time, one.cycle_time);
    }

    #[test]
    fn test_custom_machine_catalog() {
        let machines = MachineCatalog::new(vec![MachineTier::new("Shop", 80.0, 2000.0)]).unwrap();
        let q = calculate(
            &bracket(),
            &ProcessParameters::default(),
            &MaterialCatalog::default(),
            &machines,
        )
        .unwrap();
        assert_eq!(q.recommended_machine.size_label, "Shop");
        assert_close(q.mold_estimate, 18_000.0, 1e-9);
    }

    #[test]
    fn test_breakdown_serialization() {
        let q = quote(&bracket(), &ProcessParameters::default()).unwrap();
        let json = serde_json::to_string(&q).unwrap();
        assert!(json.contains("\"recommended_machine\""));
        let roundtrip: CostBreakdown = serde_json::from_str(&json).unwrap();
        assert_eq!(q, roundtrip);
    }

    #[test]
    fn test_parameters_json_defaults_color() {
        let params: ProcessParameters =
            serde_json::from_str(r#"{"material_id":"PP","quantity":500,"cavities":2}"#).unwrap();
        assert_eq!(params.color, ColorOption::Natural);
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!(ColorOption::from_str_flexible("Black").unwrap(), ColorOption::Black);
        assert_eq!(ColorOption::from_str_flexible(" custom ").unwrap(), ColorOption::Custom);
        assert!(ColorOption::from_str_flexible("chartreuse").is_err());
    }

    fn geometry_strategy() -> impl Strategy<Value = Geometry> {
        (0.1f64..5_000.0, 1.0f64..1_500.0, 1.0f64..1_500.0, 1.0f64..500.0, 0.3f64..12.0).prop_map(
            |(volume, length, width, height, wall)| {
                Geometry::new(volume, Dimensions::new(length, width, height), wall, Accuracy::Medium)
            },
        )
    }

    fn material_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["ABS", "PP", "PC", "Nylon PA6", "POM", "HDPE", "unknown"])
            .prop_map(str::to_string)
    }

    proptest! {
        #[test]
        fn prop_total_quote_is_per_part_times_quantity(
            g in geometry_strategy(),
            material in material_strategy(),
            quantity in 1u32..1_000_000,
            cavities in 1u32..64,
        ) {
            let q = quote(&g, &ProcessParameters::new(material, quantity, cavities)).unwrap();
            prop_assert_eq!(q.total_quote, q.total_per_part * f64::from(quantity));
        }

        #[test]
        fn prop_scrap_identities(
            g in geometry_strategy(),
            quantity in 1u32..1_000_000,
            cavities in 1u32..64,
        ) {
            let q = quote(&g, &ProcessParameters::new("ABS", quantity, cavities)).unwrap();
            let before = q.cost_before_scrap();
            let tol = 1e-9 * before.max(1.0);
            prop_assert!((q.scrap_cost - before * SCRAP_RATE).abs() <= tol);
            prop_assert!((q.total_per_part - before * (1.0 + SCRAP_RATE)).abs() <= tol);
            prop_assert!((q.total_per_part - q.scrap_cost - before).abs() <= tol);
            prop_assert!(q.is_finite());
        }

        #[test]
        fn prop_larger_runs_dilute_tooling(
            g in geometry_strategy(),
            quantity in 1u32..500_000,
            extra in 1u32..500_000,
        ) {
            let small = quote(&g, &ProcessParameters::new("PP", quantity, 2)).unwrap();
            let large = quote(&g, &ProcessParameters::new("PP", quantity + extra, 2)).unwrap();
            prop_assert!(large.mold_cost < small.mold_cost);
            prop_assert_eq!(large.material_cost, small.material_cost);
            prop_assert_eq!(large.machine_cost, small.machine_cost);
        }

        #[test]
        fn prop_thicker_walls_slow_the_cycle(
            g in geometry_strategy(),
            delta in 0.01f64..10.0,
            cavities in 1u32..64,
        ) {
            let params = ProcessParameters::new("ABS", 1000, cavities);
            let thin = quote(&g, &params).unwrap();
            let mut thick_geometry = g.clone();
            thick_geometry.wall_thickness += delta;
            let thick = quote(&thick_geometry, &params).unwrap();
            prop_assert!(thick.cycle_time > thin.cycle_time);
            prop_assert!(thick.parts_per_hour < thin.parts_per_hour);
        }

        #[test]
        fn prop_press_is_minimal_fitting_tier(g in geometry_strategy()) {
            let machines = MachineCatalog::default();
            let q = quote(&g, &ProcessParameters::default()).unwrap();
            let mold = Millimeters(q.mold_size_mm);
            let position = machines
                .iter()
                .position(|t| *t == q.recommended_machine)
                .unwrap();
            prop_assert!(machines.iter().take(position).all(|t| !t.accepts(mold)));
            prop_assert!(q.recommended_machine.accepts(mold) || q.recommended_machine == *machines.largest());
        }

        #[test]
        fn prop_idempotent(
            g in geometry_strategy(),
            material in material_strategy(),
            quantity in 1u32..1_000_000,
            cavities in 1u32..64,
        ) {
            let params = ProcessParameters::new(material, quantity, cavities);
            prop_assert_eq!(quote(&g, &params), quote(&g, &params));
        }
    }
}
