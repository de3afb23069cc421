//! Thin client over the two OpenWeatherMap weather endpoints the fetchers
//! use: the One Call time machine (one past day per request) and the
//! 5-day/3-hour forecast.

use crate::weather_api::error::WeatherApiError;
use crate::weather_api::models::{ForecastEntry, ForecastResponse, TimeMachinePoint, TimeMachineResponse};
use crate::weathercast::LatLon;
use log::warn;
use reqwest::{Client, Response};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const UNITS: &str = "metric";

pub struct WeatherApi {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherApi {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_BASE_URL)
    }

    /// Points the client at a different host, e.g. a mock server in tests.
    pub fn with_base_url(
        client: Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Fetches the single observation the time-machine endpoint reports for
    /// `timestamp` (unix seconds) at `location`.
    pub async fn time_machine(
        &self,
        location: LatLon,
        timestamp: i64,
    ) -> Result<TimeMachinePoint, WeatherApiError> {
        let url = format!("{}/data/3.0/onecall/timemachine", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", location.0.to_string()),
                ("lon", location.1.to_string()),
                ("dt", timestamp.to_string()),
                ("appid", self.api_key.clone()),
                ("units", UNITS.to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherApiError::NetworkRequest(url.clone(), e))?;
        let response = check_status(response, &url)?;

        let payload: TimeMachineResponse = response
            .json()
            .await
            .map_err(|e| WeatherApiError::Decode(url, e))?;

        payload
            .data
            .into_iter()
            .next()
            .ok_or(WeatherApiError::MissingData {
                lat: location.0,
                lon: location.1,
                timestamp,
            })
    }

    /// Fetches the fixed-cadence forecast list for `location` (eight 3-hour
    /// points per day, five days).
    pub async fn five_day_forecast(
        &self,
        location: LatLon,
    ) -> Result<Vec<ForecastEntry>, WeatherApiError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", location.0.to_string()),
                ("lon", location.1.to_string()),
                ("appid", self.api_key.clone()),
                ("units", UNITS.to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherApiError::NetworkRequest(url.clone(), e))?;
        let response = check_status(response, &url)?;

        let payload: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherApiError::Decode(url, e))?;
        Ok(payload.list)
    }
}

fn check_status(response: Response, url: &str) -> Result<Response, WeatherApiError> {
    match response.error_for_status() {
        Ok(resp) => Ok(resp),
        Err(e) => {
            warn!("HTTP error for {}: {:?}", url, e);
            Err(if let Some(status) = e.status() {
                WeatherApiError::HttpStatus {
                    url: url.to_string(),
                    status,
                    source: e,
                }
            } else {
                WeatherApiError::NetworkRequest(url.to_string(), e)
            })
        }
    }
}
