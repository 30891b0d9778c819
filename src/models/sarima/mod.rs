//! Seasonal ARIMA models with fixed orders.
//!
//! This module provides:
//! - `SARIMASpec`, the fixed (p, d, q)x(P, D, Q, s) configuration
//! - `SARIMA`, fitted by conditional sum of squares with 95% (or any level)
//!   prediction intervals from the model's psi-weights
//! - lag-polynomial helpers for differencing and integration

mod model;
pub mod polynomial;
mod spec;

pub use model::{Coefficients, SARIMA};
pub use spec::{ARIMASpec, SARIMASpec, SeasonalSpec};
