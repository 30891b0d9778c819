//! Forecast kinds and their fixed configuration.

use crate::core::Frequency;
use crate::error::ForecastError;
use crate::models::{ARIMASpec, BoxedForecaster, SARIMASpec, SeasonalSpec, SARIMA};
use std::fmt;
use std::str::FromStr;

/// The two series this pipeline knows how to forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastKind {
    /// Daily totals of bank transaction amounts.
    BankTransactions,
    /// Monthly percentage of reconciliation exceptions resolved.
    ExceptionResolution,
}

impl ForecastKind {
    /// Request `type` used when the field is absent.
    pub const DEFAULT: ForecastKind = ForecastKind::BankTransactions;

    pub fn all() -> [ForecastKind; 2] {
        [ForecastKind::BankTransactions, ForecastKind::ExceptionResolution]
    }

    /// Wire name used in the request `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            ForecastKind::BankTransactions => "bank_transactions",
            ForecastKind::ExceptionResolution => "exception_resolution",
        }
    }

    /// Human-readable name for dashboards and reports.
    pub fn display_name(self) -> &'static str {
        match self {
            ForecastKind::BankTransactions => "Bank Transactions",
            ForecastKind::ExceptionResolution => "Exception Resolution Rate",
        }
    }
}

impl fmt::Display for ForecastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForecastKind {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ForecastKind::all()
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ForecastError::UnknownRequestKind(s.to_string()))
    }
}

/// Closed interval forecast values are clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampRange {
    pub min: f64,
    pub max: f64,
}

impl ClampRange {
    /// Floor at zero, no ceiling.
    pub fn non_negative() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
        }
    }

    /// `[0, 100]`.
    pub fn percentage() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// Everything that differs between forecast kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct KindConfig {
    pub kind: ForecastKind,
    /// Fixed model orders. Reduced on purpose to keep fitting time bounded;
    /// orders are not searched.
    pub model: SARIMASpec,
    /// Number of future steps.
    pub horizon: usize,
    /// Two-sided confidence level of the forecast interval.
    pub level: f64,
    /// Most recent observations returned as history; `None` returns all.
    pub history_window: Option<usize>,
    pub clamp: ClampRange,
    pub frequency: Frequency,
}

impl KindConfig {
    pub fn for_kind(kind: ForecastKind) -> Self {
        match kind {
            ForecastKind::BankTransactions => Self {
                kind,
                model: SARIMASpec::seasonal(ARIMASpec::new(1, 0, 0), SeasonalSpec::new(1, 0, 0, 7)),
                horizon: 30,
                level: 0.95,
                history_window: Some(60),
                clamp: ClampRange::non_negative(),
                frequency: Frequency::Daily,
            },
            ForecastKind::ExceptionResolution => Self {
                kind,
                model: SARIMASpec::arima(1, 0, 0),
                horizon: 6,
                level: 0.95,
                history_window: None,
                clamp: ClampRange::percentage(),
                frequency: Frequency::Monthly,
            },
        }
    }

    /// A fresh, unfitted model for this kind.
    pub fn build_model(&self) -> BoxedForecaster {
        Box::new(SARIMA::new(self.model))
    }
}

impl From<ForecastKind> for KindConfig {
    fn from(kind: ForecastKind) -> Self {
        Self::for_kind(kind)
    }
}
