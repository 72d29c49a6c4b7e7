//! Calculations SDK
//!
//! This crate provides the public API contract for the calculations module:
//!
//! - `CalculationsApi` - API trait exposed to other modules
//! - `Calculation`, `CalculationKind` - the persisted record and its operator
//! - `CalculationError` - transport-agnostic error type
//!
//! ## Usage
//!
//! ```ignore
//! use calculations_sdk::{CalculationsApi, NewCalculation};
//!
//! let calc = client
//!     .create_calculation(owner_id, NewCalculation::new("addition", 1.0, 2.0))
//!     .await?;
//! assert_eq!(calc.result()?, 3.0);
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod error;
pub mod models;

pub use api::CalculationsApi;
pub use error::CalculationError;
pub use models::{Calculation, CalculationKind, CalculationPatch, NewCalculation, compute};
