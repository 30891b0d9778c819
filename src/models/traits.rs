//! Forecaster trait defining the common interface for all models.

use crate::core::{Forecast, TimeSeries};
use crate::error::Result;

/// Common interface for forecasting models.
///
/// A model is bound to the series passed to [`Forecaster::fit`]; forecasts
/// continue that series. This trait is object-safe and can be used with
/// `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Fit the model to the time series data.
    fn fit(&mut self, series: &TimeSeries) -> Result<()>;

    /// Generate point predictions for the specified horizon.
    fn predict(&self, horizon: usize) -> Result<Forecast>;

    /// Generate predictions with a two-sided interval at `level`.
    ///
    /// Point predictions and bounds come from the same fitted state.
    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        let _ = level;
        self.predict(horizon)
    }

    /// Get the fitted values (in-sample predictions).
    fn fitted_values(&self) -> Option<&[f64]>;

    /// Get the residuals (actual - fitted).
    fn residuals(&self) -> Option<&[f64]>;

    /// Descriptor of the configured model, e.g. `ARIMA(1,0,0)`.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}

/// Type alias for boxed forecaster trait objects.
///
/// # Example
///
/// ```
/// use ledger_forecast::models::{BoxedForecaster, Forecaster, SARIMA};
///
/// let model: BoxedForecaster = Box::new(SARIMA::arima(1, 0, 0));
/// assert_eq!(model.name(), "ARIMA(1,0,0)");
/// assert!(!model.is_fitted());
/// ```
pub type BoxedForecaster = Box<dyn Forecaster>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SARIMA;
    use chrono::{Duration, NaiveDate};

    fn make_test_series(n: usize) -> TimeSeries {
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let timestamps = (0..n).map(|i| base + Duration::days(i as i64)).collect();
        let values = (0..n).map(|i| 10.0 + (i as f64 * 0.7).sin()).collect();
        TimeSeries::daily(timestamps, values).unwrap()
    }

    #[test]
    fn test_boxed_forecaster_fit_predict() {
        let mut model: BoxedForecaster = Box::new(SARIMA::arima(1, 0, 0));
        let ts = make_test_series(20);

        assert!(model.fit(&ts).is_ok());
        assert!(model.is_fitted());

        let forecast = model.predict(5).unwrap();
        assert_eq!(forecast.horizon(), 5);
    }

    #[test]
    fn test_boxed_forecaster_with_intervals() {
        let mut model: BoxedForecaster = Box::new(SARIMA::arima(1, 0, 0));
        model.fit(&make_test_series(20)).unwrap();

        let forecast = model.predict_with_intervals(5, 0.95).unwrap();
        assert_eq!(forecast.horizon(), 5);
        assert!(forecast.has_lower());
        assert!(forecast.has_upper());
    }

    #[test]
    fn test_forecaster_trait_methods() {
        let mut model = SARIMA::arima(1, 0, 0);

        assert!(!model.is_fitted());
        assert!(model.fitted_values().is_none());
        assert!(model.residuals().is_none());

        model.fit(&make_test_series(20)).unwrap();
        assert!(model.is_fitted());
        assert_eq!(model.residuals().unwrap().len(), 20);
    }
}
