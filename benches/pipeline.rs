//! Benchmarks for the full forecasting pipeline.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ledger_forecast::core::TimeSeries;
use ledger_forecast::models::{Forecaster, SARIMA};
use ledger_forecast::pipeline::{build_series, run_document, ForecastKind, KindConfig};
use ledger_forecast::synth::{demo_request, DEFAULT_SEED};

fn end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

fn demo_document(kind: ForecastKind) -> String {
    let request = demo_request(kind, end_date(), DEFAULT_SEED).unwrap();
    serde_json::to_string(&request).unwrap()
}

fn bench_run_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_document");

    for kind in ForecastKind::all() {
        let document = demo_document(kind);
        group.bench_with_input(BenchmarkId::new("kind", kind), &document, |b, doc| {
            b.iter(|| run_document(black_box(doc)))
        });
    }

    group.finish();
}

fn bench_model_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_fit");
    let request = demo_request(ForecastKind::BankTransactions, end_date(), DEFAULT_SEED).unwrap();
    let series = build_series(ForecastKind::BankTransactions, &request.data).unwrap();
    let spec = KindConfig::for_kind(ForecastKind::BankTransactions).model;

    for size in [30, 60, 120, 180].iter() {
        let window: TimeSeries = series.tail(*size);
        group.bench_with_input(BenchmarkId::new("weekly_sarima", size), &window, |b, ts| {
            b.iter(|| {
                let mut model = SARIMA::new(spec);
                model.fit(black_box(ts)).unwrap();
                model.predict_with_intervals(30, 0.95).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_run_document, bench_model_fit);
criterion_main!(benches);
