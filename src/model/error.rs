use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastModelError {
    #[error("No historical observations for city '{0}'")]
    EmptySeries(String),

    #[error("Failed processing observation frame")]
    Frame(#[from] PolarsError),

    #[error("Observation timestamps could not be reconstructed from the frame")]
    InvalidTimestamp,

    #[error("Model fit failed: {0}")]
    Fit(String),

    #[error("Model prediction failed: {0}")]
    Predict(String),
}
