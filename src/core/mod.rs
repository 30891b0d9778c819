//! Core data structures for calendar time series forecasting.

mod forecast;
mod time_series;

pub use forecast::Forecast;
pub use time_series::{Frequency, TimeSeries, TimeSeriesBuilder};
