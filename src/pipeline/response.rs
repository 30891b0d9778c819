//! Response Assembler: clamped, formatted output documents.

use super::kind::KindConfig;
use crate::core::{Forecast, TimeSeries};
use crate::error::{ForecastError, Result};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Historical context returned with a forecast.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HistoricalSection {
    pub dates: Vec<String>,
    pub values: Vec<f64>,
}

/// Future dates with point forecasts and interval bounds.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ForecastSection {
    pub dates: Vec<String>,
    pub values: Vec<f64>,
    pub lower_bound: Vec<f64>,
    pub upper_bound: Vec<f64>,
}

/// Body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReport {
    pub historical: HistoricalSection,
    pub forecast: ForecastSection,
    /// Descriptor of the fitted model, e.g. `ARIMA(1,0,0)`.
    pub model_type: String,
}

impl ForecastReport {
    /// Clamp the forecast into the kind's range and format both sections.
    ///
    /// `forecast` must carry timestamps and both bounds, and all its values
    /// must be finite; anything else is a fit failure.
    pub fn assemble(
        series: &TimeSeries,
        forecast: Forecast,
        model_type: &str,
        config: &KindConfig,
    ) -> Result<Self> {
        if let Some(step) = forecast.first_non_finite() {
            return Err(ForecastError::ModelFit(format!(
                "model produced a non-finite forecast at step {}",
                step + 1
            )));
        }

        let forecast = forecast.map_values(|v| config.clamp.apply(v));
        let incomplete =
            || ForecastError::ModelFit("forecast is missing intervals or dates".to_string());
        let dates: Vec<String> = forecast
            .timestamps()
            .ok_or_else(incomplete)?
            .iter()
            .map(|d| config.frequency.format(*d))
            .collect();
        let lower_bound = forecast.lower().ok_or_else(incomplete)?.to_vec();
        let upper_bound = forecast.upper().ok_or_else(incomplete)?.to_vec();

        let history = match config.history_window {
            Some(window) => series.tail(window),
            None => series.clone(),
        };

        Ok(Self {
            historical: HistoricalSection {
                dates: history.formatted_timestamps(),
                values: history.values().to_vec(),
            },
            forecast: ForecastSection {
                dates,
                values: forecast.point().to_vec(),
                lower_bound,
                upper_bound,
            },
            model_type: model_type.to_string(),
        })
    }
}

/// The single document written for every request.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Success(ForecastReport),
    Failure { error: String },
}

impl Response {
    pub fn failure(err: &ForecastError) -> Self {
        Response::Failure {
            error: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    pub fn report(&self) -> Option<&ForecastReport> {
        match self {
            Response::Success(report) => Some(report),
            Response::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Response::Success(_) => None,
            Response::Failure { error } => Some(error),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<Result<ForecastReport>> for Response {
    fn from(outcome: Result<ForecastReport>) -> Self {
        match outcome {
            Ok(report) => Response::Success(report),
            Err(err) => {
                tracing::warn!(kind = err.kind(), error = %err, "forecast request failed");
                Response::failure(&err)
            }
        }
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Response::Success(report) => {
                let mut s = serializer.serialize_struct("Response", 4)?;
                s.serialize_field("success", &true)?;
                s.serialize_field("historical", &report.historical)?;
                s.serialize_field("forecast", &report.forecast)?;
                s.serialize_field("model_type", &report.model_type)?;
                s.end()
            }
            Response::Failure { error } => {
                let mut s = serializer.serialize_struct("Response", 2)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("error", error)?;
                s.end()
            }
        }
    }
}
