//! Forecasting models.

mod traits;

pub mod sarima;

pub use sarima::{ARIMASpec, SARIMASpec, SeasonalSpec, SARIMA};
pub use traits::{BoxedForecaster, Forecaster};
