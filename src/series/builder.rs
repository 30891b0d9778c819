//! Regularize raw records into evenly spaced series.

use super::records::{ExceptionRecord, TransactionRecord};
use crate::core::{Frequency, TimeSeries, TimeSeriesBuilder};
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Minimum number of months a resolution-rate series must cover.
pub const MIN_MONTHLY_PERIODS: usize = 2;

fn no_records() -> ForecastError {
    ForecastError::InsufficientData {
        needed: 1,
        got: 0,
        unit: "record",
    }
}

/// Sum transaction amounts per calendar day.
///
/// The result covers every day from the earliest to the latest record;
/// days without transactions are zero.
pub fn daily_totals(records: &[TransactionRecord]) -> Result<TimeSeries> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.date).or_insert(0.0) += record.amount;
    }

    let (first, last) = match (totals.first_key_value(), totals.last_key_value()) {
        (Some((first, _)), Some((last, _))) => (*first, *last),
        _ => return Err(no_records()),
    };

    let timestamps: Vec<NaiveDate> = first.iter_days().take_while(|d| *d <= last).collect();
    let values = timestamps
        .iter()
        .map(|d| totals.get(d).copied().unwrap_or(0.0))
        .collect();

    TimeSeriesBuilder::new(Frequency::Daily)
        .timestamps(timestamps)
        .values(values)
        .label("daily transaction total")
        .build()
}

#[derive(Default)]
struct MonthTally {
    resolved: usize,
    total: usize,
}

/// Percentage of exceptions resolved, per month that has records.
///
/// Months with no exceptions are absent rather than zero-filled.
pub fn monthly_resolution_rate(records: &[ExceptionRecord]) -> Result<TimeSeries> {
    if records.is_empty() {
        return Err(no_records());
    }

    let mut months: BTreeMap<NaiveDate, MonthTally> = BTreeMap::new();
    for record in records {
        let tally = months
            .entry(Frequency::Monthly.period_start(record.date))
            .or_default();
        tally.total += 1;
        if record.status.is_resolved() {
            tally.resolved += 1;
        }
    }

    if months.len() < MIN_MONTHLY_PERIODS {
        return Err(ForecastError::InsufficientData {
            needed: MIN_MONTHLY_PERIODS,
            got: months.len(),
            unit: "monthly periods",
        });
    }

    let (timestamps, values): (Vec<NaiveDate>, Vec<f64>) = months
        .into_iter()
        .map(|(month, t)| (month, t.resolved as f64 / t.total as f64 * 100.0))
        .unzip();

    TimeSeriesBuilder::new(Frequency::Monthly)
        .timestamps(timestamps)
        .values(values)
        .label("exception resolution rate")
        .build()
}
