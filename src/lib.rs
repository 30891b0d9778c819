//! # ledger-forecast
//!
//! Forecasting for dealership accounting records.
//!
//! Two series are supported: daily bank-transaction totals, forecast 30 days
//! ahead with a weekly seasonal ARIMA model, and the monthly exception
//! resolution rate, forecast 6 months ahead with an ARIMA model. Each request
//! is a JSON document; each response carries the recent history, point
//! forecasts with 95% intervals and the model descriptor.
//!
//! ```
//! use ledger_forecast::pipeline::run_document;
//!
//! let response = run_document(
//!     r#"{"type": "bank_transactions",
//!         "data": [{"date": "2024-01-01", "amount": 100},
//!                  {"date": "2024-01-03", "amount": 50}]}"#,
//! );
//! let report = response.report().unwrap();
//! assert_eq!(report.historical.values, vec![100.0, 0.0, 50.0]);
//! assert_eq!(report.forecast.dates.len(), 30);
//! assert_eq!(report.forecast.dates[0], "2024-01-04");
//! ```

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod series;
pub mod synth;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{Forecast, Frequency, TimeSeries};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{Forecaster, SARIMASpec, SARIMA};
    pub use crate::pipeline::{run, run_document, ForecastKind, KindConfig, Request, Response};
}
