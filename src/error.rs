use crate::geocoding::error::GeocodingError;
use crate::model::error::ForecastModelError;
use crate::weather_api::error::WeatherApiError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeathercastError {
    #[error(transparent)]
    Geocoding(#[from] GeocodingError),

    #[error(transparent)]
    WeatherApi(#[from] WeatherApiError),

    #[error(transparent)]
    ForecastModel(#[from] ForecastModelError),

    #[error("No API key configured; set the OWM_API_KEY environment variable")]
    MissingApiKey,

    #[error("Failed to write dataset file '{0}'")]
    DatasetWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to read dataset file '{0}'")]
    DatasetRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode dataset file '{0}'")]
    DatasetEncode(PathBuf, #[source] serde_json::Error),

    #[error("Failed to decode dataset file '{0}'")]
    DatasetDecode(PathBuf, #[source] serde_json::Error),

    #[error("Failed processing observation frame")]
    Frame(#[from] PolarsError),
}
