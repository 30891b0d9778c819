//! The forecasting pipeline: records in, one response document out.
//!
//! Series Builder -> Model Fitter -> Forecaster -> Response Assembler, for
//! whichever [`ForecastKind`] the request names. Every failure becomes a
//! [`Response::Failure`]; nothing is shared between invocations.

mod kind;
mod request;
mod response;

pub use kind::{ClampRange, ForecastKind, KindConfig};
pub use request::Request;
pub use response::{ForecastReport, ForecastSection, HistoricalSection, Response};

use crate::core::{Forecast, TimeSeries};
use crate::error::Result;
use crate::series::{daily_totals, monthly_resolution_rate, parse_exceptions, parse_transactions};
use serde_json::Value;

/// Parse raw records of `kind` and regularize them into a series.
pub fn build_series(kind: ForecastKind, data: &[Value]) -> Result<TimeSeries> {
    let series = match kind {
        ForecastKind::BankTransactions => daily_totals(&parse_transactions(data)?)?,
        ForecastKind::ExceptionResolution => monthly_resolution_rate(&parse_exceptions(data)?)?,
    };
    tracing::debug!(
        kind = %kind,
        records = data.len(),
        observations = series.len(),
        frequency = %series.frequency(),
        "built series"
    );
    Ok(series)
}

/// Fit the configured model and forecast `config.horizon` dated steps.
///
/// Returns the model descriptor alongside the raw (unclamped) forecast.
pub fn forecast_series(series: &TimeSeries, config: &KindConfig) -> Result<(Forecast, String)> {
    let mut model = config.build_model();
    model.fit(series)?;
    let forecast = model
        .predict_with_intervals(config.horizon, config.level)?
        .with_timestamps(series.future_timestamps(config.horizon)?)?;
    Ok((forecast, model.name().to_string()))
}

/// Run one request through the whole pipeline.
pub fn run(request: &Request) -> Result<ForecastReport> {
    let kind = request.forecast_kind()?;
    let config = KindConfig::for_kind(kind);
    let series = build_series(kind, &request.data)?;
    let (forecast, model_type) = forecast_series(&series, &config)?;
    ForecastReport::assemble(&series, forecast, &model_type, &config)
}

/// Decode a request document and run it, converting any failure into a
/// failure response.
pub fn run_document(document: &str) -> Response {
    Response::from(Request::from_json(document).and_then(|request| run(&request)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;
    use serde_json::json;

    #[test]
    fn build_series_dispatches_on_kind() {
        let data = vec![
            json!({"date": "2024-01-01", "amount": 100}),
            json!({"date": "2024-01-03", "amount": 50}),
        ];
        let series = build_series(ForecastKind::BankTransactions, &data).unwrap();
        assert_eq!(series.values(), &[100.0, 0.0, 50.0]);

        let err = build_series(ForecastKind::ExceptionResolution, &data).unwrap_err();
        assert!(matches!(err, ForecastError::MalformedInput(_)));
    }

    #[test]
    fn forecast_series_dates_follow_history() {
        let data = vec![
            json!({"date": "2024-01-05", "status": "RESOLVED"}),
            json!({"date": "2024-01-20", "status": "PENDING"}),
            json!({"date": "2024-02-10", "status": "RESOLVED"}),
        ];
        let series = build_series(ForecastKind::ExceptionResolution, &data).unwrap();
        let config = KindConfig::for_kind(ForecastKind::ExceptionResolution);

        let (forecast, model_type) = forecast_series(&series, &config).unwrap();
        assert_eq!(model_type, "ARIMA(1,0,0)");
        assert_eq!(forecast.horizon(), 6);
        let dates = forecast.timestamps().unwrap();
        assert_eq!(dates[0], chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(dates[5], chrono::NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
    }

    #[test]
    fn run_reports_unknown_kind_before_touching_data() {
        let request = Request {
            kind: Some("unknown_kind".to_string()),
            data: vec![json!("garbage")],
        };
        assert_eq!(
            run(&request).unwrap_err(),
            ForecastError::UnknownRequestKind("unknown_kind".to_string())
        );
    }

    #[test]
    fn run_document_never_fails_without_a_response() {
        let response = run_document("{ not json");
        assert!(!response.is_success());
        assert!(response.error().unwrap().starts_with("malformed input"));

        let response = run_document(r#"{"type": "bank_transactions", "data": []}"#);
        assert_eq!(
            response.error(),
            Some("insufficient data: need at least 1 record, got 0")
        );
    }
}
