mod dataset;
mod error;
mod geocoding;
mod model;
mod types;
mod weather_api;
mod weathercast;

pub use error::WeathercastError;
pub use weathercast::*;

pub use dataset::{city_slug, forecast_path, read_observations, write_forecast, write_observations};

pub use types::history_frame::HistoryFrame;
pub use types::observation::{ForecastPoint, WeatherObservation};
pub use types::outcome::{DayFailure, HistoryFetch};

pub use geocoding::error::GeocodingError;
pub use geocoding::geocoder::Geocoder;

pub use weather_api::client::WeatherApi;
pub use weather_api::error::WeatherApiError;
pub use weather_api::models::{ForecastEntry, ForecastMain, RainVolume, TimeMachinePoint};

pub use model::adapter::{collect_model_input, to_model_frame, ModelInput};
pub use model::error::ForecastModelError;
pub use model::seasonal::SeasonalForecaster;
