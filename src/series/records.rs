//! Raw accounting records and their wire representation.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Status value that marks an exception as resolved.
pub const RESOLVED_MARKER: &str = "RESOLVED";

/// One bank transaction: a calendar date and a signed amount.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Lifecycle status of a reconciliation exception.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExceptionStatus {
    Resolved,
    Open,
    /// Any other upstream status; counted as unresolved.
    Other(String),
}

impl ExceptionStatus {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ExceptionStatus::Resolved)
    }
}

impl From<&str> for ExceptionStatus {
    fn from(s: &str) -> Self {
        match s {
            RESOLVED_MARKER => ExceptionStatus::Resolved,
            "OPEN" => ExceptionStatus::Open,
            other => ExceptionStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ExceptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExceptionStatus::Resolved => f.write_str(RESOLVED_MARKER),
            ExceptionStatus::Open => f.write_str("OPEN"),
            ExceptionStatus::Other(s) => f.write_str(s),
        }
    }
}

/// One reconciliation exception: a calendar date and its status.
#[derive(Debug, Clone, PartialEq)]
pub struct ExceptionRecord {
    pub date: NaiveDate,
    pub status: ExceptionStatus,
}

/// Amounts arrive either as JSON numbers or as numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireAmount {
    Number(f64),
    Text(String),
}

/// Transaction record as it appears in a request document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct WireTransaction {
    pub date: String,
    pub amount: WireAmount,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Exception record as it appears in a request document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct WireException {
    pub date: String,
    pub status: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<WireAmount>,
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DD[T ]HH:MM:SS`;
/// only the date part is kept.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let s = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.date_naive());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, pattern) {
            return Ok(ts.date());
        }
    }
    Err(ForecastError::MalformedInput(format!(
        "invalid date {:?}",
        raw
    )))
}

fn parse_amount(amount: &WireAmount) -> Result<f64> {
    let value = match amount {
        WireAmount::Number(v) => *v,
        WireAmount::Text(s) => s.trim().parse::<f64>().map_err(|_| {
            ForecastError::MalformedInput(format!("invalid amount {:?}", s))
        })?,
    };
    if !value.is_finite() {
        return Err(ForecastError::MalformedInput(format!(
            "amount {} is not a finite number",
            value
        )));
    }
    Ok(value)
}

fn at_record(index: usize, err: ForecastError) -> ForecastError {
    match err {
        ForecastError::MalformedInput(msg) => {
            ForecastError::MalformedInput(format!("record {}: {}", index, msg))
        }
        other => other,
    }
}

fn decode<T: for<'de> Deserialize<'de>>(index: usize, value: &Value) -> Result<T> {
    T::deserialize(value)
        .map_err(|e| ForecastError::MalformedInput(format!("record {}: {}", index, e)))
}

impl TransactionRecord {
    fn from_wire(wire: &WireTransaction) -> Result<Self> {
        Ok(Self {
            date: parse_date(&wire.date)?,
            amount: parse_amount(&wire.amount)?,
        })
    }

    pub(crate) fn to_wire(&self) -> WireTransaction {
        WireTransaction {
            date: self.date.format("%Y-%m-%d").to_string(),
            amount: WireAmount::Number(self.amount),
            kind: Some("CREDIT".to_string()),
        }
    }
}

impl ExceptionRecord {
    fn from_wire(wire: &WireException) -> Result<Self> {
        Ok(Self {
            date: parse_date(&wire.date)?,
            status: ExceptionStatus::from(wire.status.as_str()),
        })
    }
}

/// Decode the `data` array of a transaction request.
pub fn parse_transactions(data: &[Value]) -> Result<Vec<TransactionRecord>> {
    data.iter()
        .enumerate()
        .map(|(i, value)| {
            let wire: WireTransaction = decode(i, value)?;
            TransactionRecord::from_wire(&wire).map_err(|e| at_record(i, e))
        })
        .collect()
}

/// Decode the `data` array of an exception-resolution request.
pub fn parse_exceptions(data: &[Value]) -> Result<Vec<ExceptionRecord>> {
    data.iter()
        .enumerate()
        .map(|(i, value)| {
            let wire: WireException = decode(i, value)?;
            ExceptionRecord::from_wire(&wire).map_err(|e| at_record(i, e))
        })
        .collect()
}
