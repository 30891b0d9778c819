//! Seasonal ARIMA model fitted by conditional sum of squares.

use crate::core::{Forecast, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::sarima::polynomial;
use crate::models::sarima::spec::SARIMASpec;
use crate::models::Forecaster;
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};
use crate::utils::stats::{max_abs, mean, two_sided_z};

/// Bound on every AR/MA coefficient during estimation.
const COEFFICIENT_BOUND: f64 = 0.99;

/// Estimated coefficients, grouped by role.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coefficients {
    pub mean: f64,
    pub ar: Vec<f64>,
    pub ma: Vec<f64>,
    pub seasonal_ar: Vec<f64>,
    pub seasonal_ma: Vec<f64>,
}

impl Coefficients {
    /// Split an optimizer parameter vector laid out as
    /// `[mean?, ar.., ma.., seasonal_ar.., seasonal_ma..]`.
    fn unpack(spec: &SARIMASpec, params: &[f64]) -> Self {
        let s = spec.seasonal_or_zero();
        let mut rest = params;
        let mut take = |n: usize| {
            let (head, tail) = rest.split_at(n);
            rest = tail;
            head.to_vec()
        };

        let mean = if spec.include_mean { take(1)[0] } else { 0.0 };
        Self {
            mean,
            ar: take(spec.order.p),
            ma: take(spec.order.q),
            seasonal_ar: take(s.p),
            seasonal_ma: take(s.q),
        }
    }

    /// Combined AR and MA lag polynomials of the stationary part.
    fn polynomials(&self, period: usize) -> (Vec<f64>, Vec<f64>) {
        let ar = polynomial::multiply(
            &polynomial::autoregressive(&self.ar, 1),
            &polynomial::autoregressive(&self.seasonal_ar, period.max(1)),
        );
        let ma = polynomial::multiply(
            &polynomial::moving_average(&self.ma, 1),
            &polynomial::moving_average(&self.seasonal_ma, period.max(1)),
        );
        (ar, ma)
    }
}

/// Seasonal ARIMA forecasting model.
///
/// SARIMA(p, d, q)x(P, D, Q, s) models
/// `phi(B) Phi(B^s) (1-B)^d (1-B^s)^D (y_t - mu) = theta(B) Theta(B^s) e_t`
/// with multiplicative seasonal polynomials. With no seasonal component this
/// is a plain ARIMA(p, d, q).
///
/// Estimation minimises the conditional sum of squares of the differenced
/// series. Long series condition on their first observations; series too
/// short for that take pre-sample values and innovations as zero, so even a
/// handful of observations can be fitted.
#[derive(Debug, Clone)]
pub struct SARIMA {
    spec: SARIMASpec,
    descriptor: String,
    optimizer: NelderMeadConfig,
    coefficients: Coefficients,
    /// Stationary AR polynomial (non-seasonal x seasonal).
    ar_poly: Vec<f64>,
    /// MA polynomial (non-seasonal x seasonal).
    ma_poly: Vec<f64>,
    /// Differencing polynomial.
    diff_poly: Vec<f64>,
    /// Original observations.
    history: Option<Vec<f64>>,
    /// Differenced observations.
    differenced: Option<Vec<f64>>,
    /// In-sample one-step predictions, aligned with the differenced series.
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    residual_variance: Option<f64>,
    aic: Option<f64>,
    bic: Option<f64>,
}

impl SARIMA {
    pub fn new(spec: SARIMASpec) -> Self {
        let s = spec.seasonal_or_zero();
        Self {
            descriptor: spec.to_string(),
            spec,
            optimizer: NelderMeadConfig::default(),
            coefficients: Coefficients::default(),
            ar_poly: vec![1.0],
            ma_poly: vec![1.0],
            diff_poly: polynomial::differencing(spec.order.d, s.d, s.period),
            history: None,
            differenced: None,
            fitted: None,
            residuals: None,
            residual_variance: None,
            aic: None,
            bic: None,
        }
    }

    /// Create a plain ARIMA(p, d, q) model.
    pub fn arima(p: usize, d: usize, q: usize) -> Self {
        Self::new(SARIMASpec::arima(p, d, q))
    }

    /// Override the optimizer settings used by [`Forecaster::fit`].
    pub fn with_optimizer(mut self, config: NelderMeadConfig) -> Self {
        self.optimizer = config;
        self
    }

    pub fn spec(&self) -> SARIMASpec {
        self.spec
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// Innovation variance estimated from the in-sample residuals.
    pub fn residual_variance(&self) -> Option<f64> {
        self.residual_variance
    }

    pub fn aic(&self) -> Option<f64> {
        self.aic
    }

    pub fn bic(&self) -> Option<f64> {
        self.bic
    }

    /// Conditional residuals of `series` (already differenced) for the
    /// given mean and lag polynomials.
    ///
    /// Residuals before `start` are zero. From `start` on, lags that reach
    /// before the first observation contribute zero.
    fn conditional_residuals(
        series: &[f64],
        start: usize,
        mean: f64,
        ar: &[f64],
        ma: &[f64],
    ) -> Vec<f64> {
        let mut residuals = vec![0.0; series.len()];
        for t in start..series.len() {
            let mut e = series[t] - mean;
            for k in 1..ar.len().min(t + 1) {
                e += ar[k] * (series[t - k] - mean);
            }
            for k in 1..ma.len().min(t + 1) {
                e -= ma[k] * residuals[t - k];
            }
            residuals[t] = e;
        }
        residuals
    }

    /// Condition on the first `max AR lag` observations when enough remain
    /// to estimate every parameter; otherwise use the whole series with a
    /// zero pre-sample.
    fn conditioning_start(&self, n: usize, needed: usize) -> usize {
        let s = self.spec.seasonal_or_zero();
        let max_lag = self.spec.order.p + s.p * s.period;
        match n.checked_sub(max_lag) {
            Some(remaining) if remaining >= needed => max_lag,
            _ => 0,
        }
    }

    fn estimate(&self, differenced: &[f64], start: usize) -> Result<(Coefficients, usize)> {
        let period = self.spec.seasonal_or_zero().period;
        let scale = max_abs(differenced);
        if !scale.is_finite() {
            return Err(ForecastError::ModelFit(
                "series magnitude overflows floating point after differencing".to_string(),
            ));
        }
        if scale == 0.0 {
            return Err(ForecastError::ModelFit(
                "singular series: all values are zero after differencing".to_string(),
            ));
        }
        let scaled: Vec<f64> = differenced.iter().map(|v| v / scale).collect();

        let n_params = self.spec.num_params();
        let mut initial = Vec::with_capacity(n_params);
        let mut bounds = Vec::with_capacity(n_params);
        if self.spec.include_mean {
            initial.push(mean(&scaled));
            bounds.push((f64::NEG_INFINITY, f64::INFINITY));
        }
        let s = self.spec.seasonal_or_zero();
        for order in [self.spec.order.p, self.spec.order.q, s.p, s.q] {
            for i in 0..order {
                initial.push(0.1 / (i + 1) as f64);
                bounds.push((-COEFFICIENT_BOUND, COEFFICIENT_BOUND));
            }
        }

        if initial.is_empty() {
            return Ok((Coefficients::default(), 0));
        }

        let spec = self.spec;
        let n = (scaled.len() - start) as f64;
        let result = nelder_mead(
            |params| {
                let c = Coefficients::unpack(&spec, params);
                let (ar, ma) = c.polynomials(period);
                let residuals = Self::conditional_residuals(&scaled, start, c.mean, &ar, &ma);
                residuals.iter().map(|e| e * e).sum::<f64>() / n
            },
            &initial,
            Some(&bounds),
            self.optimizer.clone(),
        );

        if !result.optimal_value.is_finite() {
            return Err(ForecastError::ModelFit(
                "conditional sum of squares is not finite".to_string(),
            ));
        }
        if !result.converged {
            return Err(ForecastError::ModelFit(format!(
                "optimizer did not converge after {} iterations",
                result.iterations
            )));
        }

        let mut coefficients = Coefficients::unpack(&spec, &result.optimal_point);
        coefficients.mean *= scale;
        Ok((coefficients, result.iterations))
    }
}

impl Default for SARIMA {
    fn default() -> Self {
        Self::new(SARIMASpec::default())
    }
}

impl Forecaster for SARIMA {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        self.spec.validate()?;

        let values = series.values();
        if series.has_missing_values() {
            return Err(ForecastError::ModelFit(
                "series contains non-finite values".to_string(),
            ));
        }

        let needed = self.spec.num_params().max(2);
        let available = values.len().saturating_sub(self.spec.differencing_lag());
        if available < needed {
            return Err(ForecastError::ModelFit(format!(
                "too few observations for {}: need at least {} after differencing, got {}",
                self.descriptor, needed, available
            )));
        }

        let differenced = polynomial::apply(values, &self.diff_poly);

        let start = self.conditioning_start(differenced.len(), needed);
        let (coefficients, iterations) = self.estimate(&differenced, start)?;
        let (ar_poly, ma_poly) = coefficients.polynomials(self.spec.seasonal_or_zero().period);

        let residuals = Self::conditional_residuals(
            &differenced,
            start,
            coefficients.mean,
            &ar_poly,
            &ma_poly,
        );
        let fitted: Vec<f64> = differenced
            .iter()
            .zip(&residuals)
            .enumerate()
            .map(|(t, (w, e))| if t < start { f64::NAN } else { w - e })
            .collect();

        let n = (residuals.len() - start) as f64;
        let variance = residuals[start..].iter().map(|e| e * e).sum::<f64>() / n;
        if !variance.is_finite() {
            return Err(ForecastError::ModelFit(
                "residual variance is not finite".to_string(),
            ));
        }

        if variance > 0.0 {
            let k = self.spec.num_params() as f64;
            let ll = -0.5 * n * (1.0 + variance.ln() + (2.0 * std::f64::consts::PI).ln());
            self.aic = Some(-2.0 * ll + 2.0 * k);
            self.bic = Some(-2.0 * ll + k * n.ln());
        } else {
            self.aic = None;
            self.bic = None;
        }

        tracing::debug!(
            model = %self.descriptor,
            observations = values.len(),
            mean = coefficients.mean,
            ar = ?coefficients.ar,
            seasonal_ar = ?coefficients.seasonal_ar,
            sigma2 = variance,
            iterations,
            conditioning = start,
            "fitted model"
        );

        self.coefficients = coefficients;
        self.ar_poly = ar_poly;
        self.ma_poly = ma_poly;
        self.history = Some(values.to_vec());
        self.differenced = Some(differenced);
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        self.residual_variance = Some(variance);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let history = self.history.as_ref().ok_or(ForecastError::FitRequired)?;
        let differenced = self
            .differenced
            .as_ref()
            .ok_or(ForecastError::FitRequired)?;
        let residuals = self.residuals.as_ref().ok_or(ForecastError::FitRequired)?;

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        let mu = self.coefficients.mean;
        let mut deviations: Vec<f64> = differenced.iter().map(|w| w - mu).collect();
        let mut innovations = residuals.clone();

        for _ in 0..horizon {
            let t = deviations.len();
            let mut pred = 0.0;
            for k in 1..self.ar_poly.len().min(t + 1) {
                pred -= self.ar_poly[k] * deviations[t - k];
            }
            for k in 1..self.ma_poly.len().min(t + 1) {
                pred += self.ma_poly[k] * innovations[t - k];
            }
            deviations.push(pred);
            innovations.push(0.0);
        }

        let continuation: Vec<f64> = deviations[differenced.len()..]
            .iter()
            .map(|z| z + mu)
            .collect();
        let predictions = polynomial::integrate(&continuation, history, &self.diff_poly);

        Ok(Forecast::from_values(predictions))
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        if !(level > 0.0 && level < 1.0) {
            return Err(ForecastError::ModelFit(format!(
                "confidence level must lie strictly between 0 and 1, got {}",
                level
            )));
        }

        let forecast = self.predict(horizon)?;
        if horizon == 0 {
            return Ok(forecast);
        }
        let variance = self
            .residual_variance
            .ok_or(ForecastError::FitRequired)?;

        let full_ar = polynomial::multiply(&self.ar_poly, &self.diff_poly);
        let psi = polynomial::psi_weights(&full_ar, &self.ma_poly, horizon);
        let z = two_sided_z(level);

        let mut cumulative = 0.0;
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);
        for (point, weight) in forecast.point().iter().zip(&psi) {
            cumulative += weight * weight;
            let half_width = z * (variance * cumulative).sqrt();
            lower.push(point - half_width);
            upper.push(point + half_width);
        }

        Ok(Forecast::from_values_with_intervals(
            forecast.point().to_vec(),
            lower,
            upper,
        ))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        &self.descriptor
    }
}
