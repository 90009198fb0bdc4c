//! # Quote Calculations
//!
//! Each calculation follows the pattern:
//!
//! - Input records (JSON-serializable)
//! - A result record (JSON-serializable)
//! - A pure calculation function with no I/O and no hidden state
//!
//! ## Available Calculations
//!
//! - [`quote`] - Injection molding cost breakdown

pub mod quote;

// Re-export commonly used types
pub use quote::{
    calculate, try_calculate, ColorOption, CostBreakdown, ProcessParameters,
};
