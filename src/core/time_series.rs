//! TimeSeries data structure for regular calendar series.

use crate::error::{ForecastError, Result};
use chrono::{Datelike, Days, Months, NaiveDate};
use std::fmt;

/// Calendar step between consecutive observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// One calendar day.
    Daily,
    /// One calendar month. Timestamps are the first day of the month.
    Monthly,
}

impl Frequency {
    /// Advance `date` by `steps` calendar steps.
    ///
    /// Monthly steps use calendar-month arithmetic, not a fixed day count.
    pub fn advance(self, date: NaiveDate, steps: u32) -> Result<NaiveDate> {
        let next = match self {
            Frequency::Daily => date.checked_add_days(Days::new(u64::from(steps))),
            Frequency::Monthly => date.checked_add_months(Months::new(steps)),
        };
        next.ok_or_else(|| {
            ForecastError::MalformedInput(format!(
                "date {} cannot be advanced by {} {} step(s)",
                date, steps, self
            ))
        })
    }

    /// Normalize a date to the start of the period containing it.
    pub fn period_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Daily => date,
            Frequency::Monthly => date.with_day(1).unwrap_or(date),
        }
    }

    /// `strftime` pattern used when rendering timestamps of this frequency.
    pub fn date_format(self) -> &'static str {
        match self {
            Frequency::Daily => "%Y-%m-%d",
            Frequency::Monthly => "%Y-%m",
        }
    }

    /// Render a timestamp as `YYYY-MM-DD` (daily) or `YYYY-MM` (monthly).
    pub fn format(self, date: NaiveDate) -> String {
        date.format(self.date_format()).to_string()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Monthly => write!(f, "monthly"),
        }
    }
}

/// A univariate series indexed by calendar dates at a fixed frequency.
///
/// Timestamps are strictly increasing and aligned to their frequency
/// (monthly timestamps fall on the first of the month). A series is not
/// required to be contiguous; see [`TimeSeries::is_contiguous`].
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<NaiveDate>,
    values: Vec<f64>,
    frequency: Frequency,
    label: Option<String>,
}

/// Builder for constructing TimeSeries.
#[derive(Debug, Clone)]
pub struct TimeSeriesBuilder {
    timestamps: Vec<NaiveDate>,
    values: Vec<f64>,
    frequency: Frequency,
    label: Option<String>,
}

impl TimeSeriesBuilder {
    pub fn new(frequency: Frequency) -> Self {
        Self {
            timestamps: Vec::new(),
            values: Vec::new(),
            frequency,
            label: None,
        }
    }

    pub fn timestamps(mut self, timestamps: Vec<NaiveDate>) -> Self {
        self.timestamps = timestamps;
        self
    }

    pub fn values(mut self, values: Vec<f64>) -> Self {
        self.values = values;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn build(self) -> Result<TimeSeries> {
        let mut series = TimeSeries::new(self.timestamps, self.values, self.frequency)?;
        series.label = self.label;
        Ok(series)
    }
}

impl TimeSeries {
    /// Create a new series, validating ordering, alignment and lengths.
    pub fn new(timestamps: Vec<NaiveDate>, values: Vec<f64>, frequency: Frequency) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ForecastError::MalformedInput(format!(
                "series has {} timestamps but {} values",
                timestamps.len(),
                values.len()
            )));
        }

        for pair in timestamps.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ForecastError::MalformedInput(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }

        if let Some(date) = timestamps
            .iter()
            .find(|d| frequency.period_start(**d) != **d)
        {
            return Err(ForecastError::MalformedInput(format!(
                "timestamp {} is not aligned to a {} period",
                date, frequency
            )));
        }

        Ok(Self {
            timestamps,
            values,
            frequency,
            label: None,
        })
    }

    /// Create a daily series.
    pub fn daily(timestamps: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        Self::new(timestamps, values, Frequency::Daily)
    }

    /// Create a monthly series; timestamps must be first-of-month dates.
    pub fn monthly(timestamps: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        Self::new(timestamps, values, Frequency::Monthly)
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[NaiveDate] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Last timestamp, if any.
    pub fn last_timestamp(&self) -> Option<NaiveDate> {
        self.timestamps.last().copied()
    }

    /// True when every consecutive pair is exactly one step apart.
    pub fn is_contiguous(&self) -> bool {
        self.timestamps.windows(2).all(|pair| {
            self.frequency
                .advance(pair[0], 1)
                .map(|next| next == pair[1])
                .unwrap_or(false)
        })
    }

    /// Check if series has missing values (NaN or Inf).
    pub fn has_missing_values(&self) -> bool {
        self.values.iter().any(|v| !v.is_finite())
    }

    /// The most recent `n` observations (or the whole series if shorter).
    pub fn tail(&self, n: usize) -> TimeSeries {
        let start = self.len().saturating_sub(n);
        TimeSeries {
            timestamps: self.timestamps[start..].to_vec(),
            values: self.values[start..].to_vec(),
            frequency: self.frequency,
            label: self.label.clone(),
        }
    }

    /// Timestamps of the `horizon` steps that follow the last observation.
    pub fn future_timestamps(&self, horizon: usize) -> Result<Vec<NaiveDate>> {
        let last = self.last_timestamp().ok_or(ForecastError::InsufficientData {
            needed: 1,
            got: 0,
            unit: "observation",
        })?;

        (1..=horizon)
            .map(|step| {
                let step = u32::try_from(step).map_err(|_| {
                    ForecastError::MalformedInput(format!("horizon {} is too large", horizon))
                })?;
                self.frequency.advance(last, step)
            })
            .collect()
    }

    /// Timestamps rendered with the series' date format.
    pub fn formatted_timestamps(&self) -> Vec<String> {
        self.timestamps
            .iter()
            .map(|d| self.frequency.format(*d))
            .collect()
    }
}
