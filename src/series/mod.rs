//! Turning raw accounting records into regular time series.

mod builder;
mod records;

pub use builder::{daily_totals, monthly_resolution_rate, MIN_MONTHLY_PERIODS};
pub use records::{
    parse_date, parse_exceptions, parse_transactions, ExceptionRecord, ExceptionStatus,
    TransactionRecord, RESOLVED_MARKER,
};
pub(crate) use records::WireException;
