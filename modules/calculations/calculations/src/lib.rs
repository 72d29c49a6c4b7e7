//! Calculations module.
//!
//! Persists arithmetic calculations owned by users and validates incoming
//! payloads before they reach the domain. The public API is defined in
//! `cf-calculations-sdk` and re-exported here.

#![forbid(unsafe_code)]

pub use calculations_sdk::{
    Calculation, CalculationError, CalculationKind, CalculationPatch, CalculationsApi,
    NewCalculation, compute,
};

pub mod module;
pub use module::CalculationsModule;

pub mod config;
pub mod local_client;
pub mod logging;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
