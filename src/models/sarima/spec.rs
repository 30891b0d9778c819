//! Fixed model orders for (seasonal) ARIMA models.

use crate::error::{ForecastError, Result};
use std::fmt;

/// Non-seasonal ARIMA order (p, d, q).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ARIMASpec {
    /// AR order (p)
    pub p: usize,
    /// Differencing order (d)
    pub d: usize,
    /// MA order (q)
    pub q: usize,
}

impl ARIMASpec {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

/// Seasonal order (P, D, Q) at season length `period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonalSpec {
    pub p: usize,
    pub d: usize,
    pub q: usize,
    /// Season length in observations (7 for weekly seasonality of daily data).
    pub period: usize,
}

impl SeasonalSpec {
    pub fn new(p: usize, d: usize, q: usize, period: usize) -> Self {
        Self { p, d, q, period }
    }
}

/// Full model configuration: orders plus whether a mean term is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SARIMASpec {
    pub order: ARIMASpec,
    pub seasonal: Option<SeasonalSpec>,
    /// Estimate a mean for the (differenced) series. Without it the model
    /// reverts towards zero.
    pub include_mean: bool,
}

impl SARIMASpec {
    /// Plain ARIMA(p, d, q). A mean is estimated when no differencing is applied.
    pub fn arima(p: usize, d: usize, q: usize) -> Self {
        Self {
            order: ARIMASpec::new(p, d, q),
            seasonal: None,
            include_mean: d == 0,
        }
    }

    /// Seasonal ARIMA(p, d, q)x(P, D, Q, s), without a mean term.
    pub fn seasonal(order: ARIMASpec, seasonal: SeasonalSpec) -> Self {
        Self {
            order,
            seasonal: Some(seasonal),
            include_mean: false,
        }
    }

    pub fn with_mean(mut self, include_mean: bool) -> Self {
        self.include_mean = include_mean;
        self
    }

    /// Seasonal orders, or all-zero when the model has no seasonal part.
    pub fn seasonal_or_zero(&self) -> SeasonalSpec {
        self.seasonal.unwrap_or(SeasonalSpec::new(0, 0, 0, 0))
    }

    /// Number of estimated coefficients (AR, MA, seasonal AR/MA, mean).
    pub fn num_params(&self) -> usize {
        let s = self.seasonal_or_zero();
        self.order.p + self.order.q + s.p + s.q + usize::from(self.include_mean)
    }

    /// Observations consumed by differencing.
    pub fn differencing_lag(&self) -> usize {
        let s = self.seasonal_or_zero();
        self.order.d + s.d * s.period
    }

    /// Reject configurations that cannot describe a model.
    pub fn validate(&self) -> Result<()> {
        if let Some(s) = self.seasonal {
            if s.period < 2 {
                return Err(ForecastError::ModelFit(format!(
                    "seasonal period must be at least 2, got {}",
                    s.period
                )));
            }
            if s.p + s.d + s.q == 0 {
                return Err(ForecastError::ModelFit(
                    "seasonal component has no terms".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for SARIMASpec {
    fn default() -> Self {
        Self::arima(1, 0, 0)
    }
}

impl fmt::Display for SARIMASpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.order;
        match self.seasonal {
            Some(s) => write!(
                f,
                "SARIMA({},{},{})x({},{},{},{})",
                o.p, o.d, o.q, s.p, s.d, s.q, s.period
            ),
            None => write!(f, "ARIMA({},{},{})", o.p, o.d, o.q),
        }
    }
}
