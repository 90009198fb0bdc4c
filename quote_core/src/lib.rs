//! # quote_core - Injection Molding Quote Engine
//!
//! `quote_core` prices injection-molded plastic parts. Given the geometry of
//! a part (from an external CAD analysis), a resin and the customer's run
//! parameters, it produces an itemized per-part cost and a total for the run.
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless core**: the calculator is a pure function, recomputed on
//!   every change
//! - **JSON-First**: all records implement Serialize/Deserialize
//! - **No surprises**: insufficient input yields `None`, never NaN or a panic
//! - **Explicit seams**: the analysis service, job tracking and quote history
//!   are ordinary values the host owns
//!
//! ## Quick Start
//!
//! ```rust
//! use quote_core::calculations::quote::{calculate, ProcessParameters};
//! use quote_core::geometry::Geometry;
//! use quote_core::materials::{MachineCatalog, MaterialCatalog};
//!
//! let quote = calculate(
//!     &Geometry::placeholder(),
//!     &ProcessParameters::new("PP", 10_000, 2),
//!     &MaterialCatalog::default(),
//!     &MachineCatalog::default(),
//! )
//! .expect("placeholder geometry is quotable");
//!
//! let json = serde_json::to_string_pretty(&quote).unwrap();
//! assert!(json.contains("total_quote"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The quote calculator and its input/output records
//! - [`geometry`] - Part geometry as reported by CAD analysis
//! - [`materials`] - Resin and press catalogs
//! - [`catalog_config`] - TOML catalog loading
//! - [`analysis`] - Analysis service seam and job-status store
//! - [`session`] - Upload/recompute sequencing for a host UI
//! - [`history`] - Saved quotes with change subscriptions
//! - [`file_io`] - Atomic, locked history files
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod analysis;
pub mod calculations;
pub mod catalog_config;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod geometry;
pub mod history;
pub mod materials;
pub mod session;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, try_calculate, CostBreakdown, ProcessParameters};
pub use catalog_config::CatalogConfig;
pub use errors::{QuoteError, QuoteResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_history, load_history_or_default, save_history, FileLock};
pub use geometry::Geometry;
pub use history::{QuoteHistory, QuoteStore, SavedQuote};
pub use session::QuoteSession;
