//! # Catalogs
//!
//! Static lookup data the quote engine prices against:
//!
//! - **Resins** ([`plastics`]): density and price per kilogram, keyed by name
//! - **Presses** ([`machines`]): hourly rate and mold capacity, ordered by size
//!
//! Both catalogs are ordered and non-empty by construction. The built-in
//! versions come from the embedded TOML document in
//! [`crate::catalog_config`]; a shop can replace them with its own file.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::materials::{MachineCatalog, MaterialCatalog};
//! use quote_core::units::Millimeters;
//!
//! let materials = MaterialCatalog::default();
//! let abs = materials.resolve("ABS");
//! assert_eq!(abs.price_per_kg, 3.50);
//!
//! let machines = MachineCatalog::default();
//! let press = machines.select_for_mold(Millimeters(182.0));
//! assert_eq!(press.size_label, "Small");
//! ```

pub mod machines;
pub mod plastics;

pub use machines::{MachineCatalog, MachineTier};
pub use plastics::{Material, MaterialCatalog};
