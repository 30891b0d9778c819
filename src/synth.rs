//! Seeded synthetic accounting history for demos and benchmarks.
//!
//! Six months of bank transactions with a weekday/weekend rhythm and a
//! month-end bump, plus six months of reconciliation exceptions whose
//! resolution rate improves month over month.

use crate::error::{ForecastError, Result};
use crate::pipeline::{ForecastKind, Request};
use crate::series::{ExceptionRecord, ExceptionStatus, TransactionRecord, WireException};
use chrono::{Datelike, Days, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Months of history generated before the end date.
pub const HISTORY_MONTHS: u32 = 6;

fn out_of_range(end: NaiveDate) -> ForecastError {
    ForecastError::MalformedInput(format!("end date {} is out of range", end))
}

fn history_start(end: NaiveDate) -> Result<NaiveDate> {
    end.checked_sub_months(Months::new(HISTORY_MONTHS))
        .ok_or_else(|| out_of_range(end))
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Bank transactions for every day of the six months ending at `end`.
///
/// Weekdays carry 10 to 24 transactions, weekends 2 to 6. Amounts are
/// 50 to 550, 30% higher from the 25th of the month and 10% higher
/// Tuesday through Thursday.
pub fn generate_bank_transactions(end: NaiveDate, seed: u64) -> Result<Vec<TransactionRecord>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = history_start(end)?;

    let mut records = Vec::new();
    for date in start.iter_days().take_while(|d| *d <= end) {
        let weekday = date.weekday().number_from_monday();
        let count = if weekday <= 5 {
            rng.gen_range(0..15) + 10
        } else {
            rng.gen_range(0..5) + 2
        };

        for _ in 0..count {
            let mut amount = 50.0 + rng.gen::<f64>() * 500.0;
            if date.day() >= 25 {
                amount *= 1.3;
            }
            if (2..=4).contains(&weekday) {
                amount *= 1.1;
            }
            records.push(TransactionRecord {
                date,
                amount: round_cents(amount),
            });
        }
    }

    tracing::debug!(records = records.len(), %start, %end, "generated bank transactions");
    Ok(records)
}

/// Reconciliation exceptions for the six months starting six months
/// before `end`.
///
/// Each month has 15 to 25 exceptions on a random day among its first 28;
/// month `m` (0-based) resolves each with probability `0.60 + 0.05 * m`.
pub fn generate_exceptions(end: NaiveDate, seed: u64) -> Result<Vec<ExceptionRecord>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = history_start(end)?;

    let mut records = Vec::new();
    for month in 0..HISTORY_MONTHS {
        let anchor = start
            .checked_add_months(Months::new(month))
            .ok_or_else(|| out_of_range(end))?;
        let count = rng.gen_range(0..11) + 15;
        let resolution_rate = 0.60 + f64::from(month) * 0.05;

        for _ in 0..count {
            let date = anchor
                .checked_add_days(Days::new(rng.gen_range(0..28)))
                .ok_or_else(|| out_of_range(end))?;
            let status = if rng.gen::<f64>() < resolution_rate {
                ExceptionStatus::Resolved
            } else {
                ExceptionStatus::Open
            };
            records.push(ExceptionRecord { date, status });
        }
    }

    tracing::debug!(records = records.len(), %start, %end, "generated exceptions");
    Ok(records)
}

fn to_value<T: serde::Serialize>(wire: T) -> Result<Value> {
    serde_json::to_value(wire)
        .map_err(|e| ForecastError::MalformedInput(format!("cannot encode record: {}", e)))
}

/// A ready-to-run request of `kind` filled with synthetic history.
pub fn demo_request(kind: ForecastKind, end: NaiveDate, seed: u64) -> Result<Request> {
    let data = match kind {
        ForecastKind::BankTransactions => generate_bank_transactions(end, seed)?
            .iter()
            .map(|r| to_value(r.to_wire()))
            .collect::<Result<Vec<_>>>()?,
        ForecastKind::ExceptionResolution => generate_exceptions(end, seed)?
            .iter()
            .map(|r| {
                to_value(WireException {
                    date: r.date.format("%Y-%m-%d").to_string(),
                    status: r.status.to_string(),
                    kind: Some("UNMATCHED".to_string()),
                    amount: None,
                })
            })
            .collect::<Result<Vec<_>>>()?,
    };
    Ok(Request::new(kind, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::collections::BTreeMap;

    fn end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn transactions_cover_every_day() {
        let records = generate_bank_transactions(end(), DEFAULT_SEED).unwrap();
        let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for r in &records {
            *per_day.entry(r.date).or_default() += 1;
        }

        let start = NaiveDate::from_ymd_opt(2023, 12, 30).unwrap();
        assert_eq!(per_day.keys().next(), Some(&start));
        assert_eq!(per_day.keys().next_back(), Some(&end()));
        assert_eq!(per_day.len() as i64, (end() - start).num_days() + 1);

        for (date, count) in per_day {
            match date.weekday() {
                Weekday::Sat | Weekday::Sun => assert!((2..=6).contains(&count)),
                _ => assert!((10..=24).contains(&count)),
            }
        }
    }

    #[test]
    fn transaction_amounts_stay_in_range() {
        for r in generate_bank_transactions(end(), 7).unwrap() {
            assert!(r.amount >= 50.0);
            assert!(r.amount <= 550.0 * 1.3 * 1.1 + 0.01);
            assert_eq!(round_cents(r.amount), r.amount);
        }
    }

    #[test]
    fn exceptions_span_six_months() {
        let records = generate_exceptions(end(), DEFAULT_SEED).unwrap();
        assert!(records.len() >= 6 * 15 && records.len() <= 6 * 25);
        assert!(records.iter().any(|r| r.status.is_resolved()));
        assert!(records.iter().any(|r| !r.status.is_resolved()));

        let first = records.iter().map(|r| r.date).min().unwrap();
        assert!(first >= NaiveDate::from_ymd_opt(2023, 12, 30).unwrap());
    }

    #[test]
    fn generation_is_reproducible() {
        assert_eq!(
            generate_bank_transactions(end(), 3).unwrap(),
            generate_bank_transactions(end(), 3).unwrap()
        );
        assert_ne!(
            generate_exceptions(end(), 3).unwrap(),
            generate_exceptions(end(), 4).unwrap()
        );
    }

    #[test]
    fn demo_request_carries_wire_records() {
        let request = demo_request(ForecastKind::ExceptionResolution, end(), DEFAULT_SEED).unwrap();
        assert_eq!(request.kind.as_deref(), Some("exception_resolution"));
        let first = &request.data[0];
        assert_eq!(first["type"], "UNMATCHED");
        assert!(first["status"] == "RESOLVED" || first["status"] == "OPEN");
        assert!(first.get("amount").is_none());

        let request = demo_request(ForecastKind::BankTransactions, end(), DEFAULT_SEED).unwrap();
        assert_eq!(request.data[0]["date"], "2023-12-30");
    }
}
