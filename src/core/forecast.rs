//! Forecast result structure for holding predictions.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;

/// A univariate forecast: point predictions plus optional interval bounds
/// and the calendar dates they refer to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    point: Vec<f64>,
    lower: Option<Vec<f64>>,
    upper: Option<Vec<f64>>,
    timestamps: Option<Vec<NaiveDate>>,
}

impl Forecast {
    /// Create an empty forecast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forecast from point predictions.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self {
            point: values,
            ..Self::default()
        }
    }

    /// Create a forecast with prediction intervals.
    pub fn from_values_with_intervals(values: Vec<f64>, lower: Vec<f64>, upper: Vec<f64>) -> Self {
        Self {
            point: values,
            lower: Some(lower),
            upper: Some(upper),
            timestamps: None,
        }
    }

    /// Attach the dates of each forecast step.
    pub fn with_timestamps(mut self, timestamps: Vec<NaiveDate>) -> Result<Self> {
        if timestamps.len() != self.horizon() {
            return Err(ForecastError::ModelFit(format!(
                "forecast has {} steps but {} timestamps",
                self.horizon(),
                timestamps.len()
            )));
        }
        self.timestamps = Some(timestamps);
        Ok(self)
    }

    /// Get the forecast horizon (number of steps).
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    /// Point predictions.
    pub fn point(&self) -> &[f64] {
        &self.point
    }

    pub fn has_lower(&self) -> bool {
        self.lower.is_some()
    }

    pub fn has_upper(&self) -> bool {
        self.upper.is_some()
    }

    pub fn lower(&self) -> Option<&[f64]> {
        self.lower.as_deref()
    }

    pub fn upper(&self) -> Option<&[f64]> {
        self.upper.as_deref()
    }

    pub fn timestamps(&self) -> Option<&[NaiveDate]> {
        self.timestamps.as_deref()
    }

    /// First step whose point or bound is NaN or infinite.
    pub fn first_non_finite(&self) -> Option<usize> {
        let bad = |values: Option<&[f64]>| -> Option<usize> {
            values.and_then(|v| v.iter().position(|x| !x.is_finite()))
        };
        [bad(Some(self.point.as_slice())), bad(self.lower()), bad(self.upper())]
            .into_iter()
            .flatten()
            .min()
    }

    /// Apply `f` to every point prediction and bound.
    pub fn map_values<F>(mut self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        for v in self.point.iter_mut() {
            *v = f(*v);
        }
        for bound in [self.lower.as_mut(), self.upper.as_mut()].into_iter().flatten() {
            for v in bound.iter_mut() {
                *v = f(*v);
            }
        }
        self
    }
}
