//! Reshapes the observation table into the column layout the forecasting
//! model consumes.
//!
//! The dataset schema (`date`/`temp`) and the model schema (`ds`/`y`) are
//! independently versioned external contracts; the mapping between them lives
//! here and nowhere else.

use crate::model::error::ForecastModelError;
use crate::types::history_frame::{HistoryFrame, COL_DATE, COL_TEMP};
use chrono::{DateTime, Utc};
use polars::prelude::*;

pub const COL_DS: &str = "ds";
pub const COL_Y: &str = "y";

/// The reshaped series: one timestamp and one value per observation, sorted
/// ascending by time.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInput {
    pub timestamps: Vec<DateTime<Utc>>,
    pub values: Vec<f64>,
}

impl ModelInput {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamps.last().copied()
    }
}

/// Renames `date`/`temp` to the `ds`/`y` pair the model expects, dropping
/// every other column and sorting ascending by `ds`.
pub fn to_model_frame(history: &HistoryFrame) -> LazyFrame {
    history
        .frame
        .clone()
        .select([
            col(COL_DATE)
                .cast(DataType::Datetime(TimeUnit::Milliseconds, None))
                .alias(COL_DS),
            col(COL_TEMP).alias(COL_Y),
        ])
        .sort([COL_DS], SortMultipleOptions::default())
}

/// Collects the reshaped frame into plain vectors for the model.
pub fn collect_model_input(frame: LazyFrame) -> Result<ModelInput, ForecastModelError> {
    let df = frame.collect()?;

    let ds = df.column(COL_DS)?.datetime()?;
    let y = df.column(COL_Y)?.f64()?;

    let mut timestamps = Vec::with_capacity(df.height());
    for value in ds.into_iter() {
        let millis = value.ok_or(ForecastModelError::InvalidTimestamp)?;
        let timestamp = DateTime::from_timestamp_millis(millis)
            .ok_or(ForecastModelError::InvalidTimestamp)?;
        timestamps.push(timestamp);
    }

    // The frame is built from plain f64 columns, so nulls cannot occur here.
    let values: Vec<f64> = y.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect();

    Ok(ModelInput { timestamps, values })
}
