//! Error types for the ledger-forecast pipeline.

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur anywhere in the forecasting pipeline.
///
/// Every variant is converted into a failure response at the pipeline
/// boundary; none escapes the process without a response document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// A date, amount or status field (or the request document itself)
    /// could not be parsed.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Not enough records or periods to build a series worth fitting.
    #[error("insufficient data: need at least {needed} {unit}, got {got}")]
    InsufficientData {
        needed: usize,
        got: usize,
        unit: &'static str,
    },

    /// The model could not be fitted, or produced non-finite output.
    #[error("model fit failed: {0}")]
    ModelFit(String),

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// The request named a forecast type this pipeline does not know.
    #[error("Unknown forecast type: {0}")]
    UnknownRequestKind(String),
}

impl ForecastError {
    /// Short machine-friendly tag for the error kind, used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            ForecastError::MalformedInput(_) => "malformed_input",
            ForecastError::InsufficientData { .. } => "insufficient_data",
            ForecastError::ModelFit(_) => "model_fit",
            ForecastError::FitRequired => "fit_required",
            ForecastError::UnknownRequestKind(_) => "unknown_request_kind",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = ForecastError::MalformedInput("record 2: invalid date \"2024-13-01\"".to_string());
        assert_eq!(
            err.to_string(),
            "malformed input: record 2: invalid date \"2024-13-01\""
        );

        let err = ForecastError::InsufficientData {
            needed: 2,
            got: 1,
            unit: "monthly periods",
        };
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 2 monthly periods, got 1"
        );

        let err = ForecastError::ModelFit("optimizer did not converge".to_string());
        assert_eq!(err.to_string(), "model fit failed: optimizer did not converge");
    }

    #[test]
    fn unknown_kind_message_names_the_type() {
        let err = ForecastError::UnknownRequestKind("unknown_kind".to_string());
        assert_eq!(err.to_string(), "Unknown forecast type: unknown_kind");
        assert_eq!(err.kind(), "unknown_request_kind");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = ForecastError::ModelFit("singular series".to_string());
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
