//! This module provides the main entry point for collecting OpenWeatherMap
//! data. It resolves city names to coordinates, walks backwards through the
//! time-machine endpoint one day per request, and reduces the 3-hour forecast
//! feed to daily points.

use crate::error::WeathercastError;
use crate::geocoding::geocoder::Geocoder;
use crate::types::observation::{ForecastPoint, WeatherObservation};
use crate::types::outcome::{DayFailure, HistoryFetch};
use crate::weather_api::client::WeatherApi;
use bon::bon;
use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use reqwest::Client;
use std::time::Duration as StdDuration;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second
/// (index 1). Both values are represented as `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// Environment variable the CLI (and [`Weathercast::from_env`]) reads the
/// API key from.
pub const API_KEY_ENV: &str = "OWM_API_KEY";

/// The 5-day forecast endpoint reports one entry every 3 hours.
const FORECAST_POINTS_PER_DAY: usize = 8;
/// Flat pause between consecutive requests, to stay under the API rate limit.
const DEFAULT_PACING: StdDuration = StdDuration::from_millis(100);
const DEFAULT_HISTORY_DAYS: u32 = 365;
const DEFAULT_FORECAST_DAYS: usize = 5;

/// The main client for fetching OpenWeatherMap data.
///
/// Holds the API credential and the shared HTTP client; both outbound
/// surfaces (geocoding and weather) are reached through it, so nothing in
/// this crate keeps credential state globally.
///
/// # Examples
///
/// ```no_run
/// # use weathercast::{Weathercast, WeathercastError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), WeathercastError> {
/// let client = Weathercast::new("my-api-key")?;
/// let fetch = client.fetch_history().city("London").days(30).call().await?;
/// println!(
///     "{} observations, {} failed days",
///     fetch.observations.len(),
///     fetch.failure_count()
/// );
/// # Ok(())
/// # }
/// ```
pub struct Weathercast {
    geocoder: Geocoder,
    weather: WeatherApi,
}

#[bon]
impl Weathercast {
    /// Creates a client that talks to the production OpenWeatherMap hosts.
    ///
    /// # Errors
    ///
    /// Returns [`WeathercastError::MissingApiKey`] when `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, WeathercastError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(WeathercastError::MissingApiKey);
        }
        let client = Client::new();
        Ok(Self {
            geocoder: Geocoder::new(client.clone(), api_key.clone()),
            weather: WeatherApi::new(client, api_key),
        })
    }

    /// Creates a client from the `OWM_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`WeathercastError::MissingApiKey`] when the variable is
    /// absent or empty, which is fatal for every subcommand that talks to
    /// the API.
    pub fn from_env() -> Result<Self, WeathercastError> {
        let api_key =
            std::env::var(API_KEY_ENV).map_err(|_| WeathercastError::MissingApiKey)?;
        Self::new(api_key)
    }

    /// Creates a client with overridden base URLs, for tests against a mock
    /// server.
    pub fn with_base_urls(
        api_key: impl Into<String>,
        geo_base_url: impl Into<String>,
        weather_base_url: impl Into<String>,
    ) -> Result<Self, WeathercastError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(WeathercastError::MissingApiKey);
        }
        let client = Client::new();
        Ok(Self {
            geocoder: Geocoder::with_base_url(client.clone(), api_key.clone(), geo_base_url),
            weather: WeatherApi::with_base_url(client, api_key, weather_base_url),
        })
    }

    /// Resolves a city name to coordinates via the geocoding endpoint.
    pub async fn geocode(&self, city: &str) -> Result<LatLon, WeathercastError> {
        self.geocoder.resolve(city).await.map_err(WeathercastError::from)
    }

    /// Fetches per-day historical observations for one city.
    ///
    /// The city is geocoded once; a geocoding failure aborts the whole call.
    /// After that, one time-machine query is issued per past calendar day
    /// (today first, walking backwards), and every day lands in the returned
    /// [`HistoryFetch`] as either an observation or a tagged failure; a bad
    /// day never aborts the remaining days. A flat pacing sleep follows every
    /// request, successful or not.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.city(&str)`: **Required.** The city name to fetch for.
    /// * `.days(u32)`: Optional. How many past days to query. Defaults to `365`.
    /// * `.pacing(Duration)`: Optional. The pause after each request. Defaults to 100 ms.
    ///
    /// # Errors
    ///
    /// Returns [`WeathercastError::Geocoding`] when the city cannot be
    /// resolved. Per-day weather errors do not surface here; they are
    /// collected in [`HistoryFetch::failures`].
    #[builder]
    pub async fn fetch_history(
        &self,
        city: &str,
        days: Option<u32>,
        pacing: Option<StdDuration>,
    ) -> Result<HistoryFetch, WeathercastError> {
        let days = days.unwrap_or(DEFAULT_HISTORY_DAYS);
        let pacing = pacing.unwrap_or(DEFAULT_PACING);

        let location = self.geocoder.resolve(city).await?;
        let started = Utc::now();

        let mut fetch = HistoryFetch::default();
        for offset in 0..days {
            let queried_at = started - Duration::days(offset as i64);
            match self
                .weather
                .time_machine(location, queried_at.timestamp())
                .await
            {
                Ok(point) => {
                    fetch.observations.push(WeatherObservation {
                        date: queried_at,
                        city: city.to_string(),
                        temperature: point.temp,
                        humidity: point.humidity,
                        precipitation: point.precipitation(),
                    });
                }
                Err(error) => {
                    warn!("History fetch failed for {}, day {}: {}", city, offset, error);
                    fetch.failures.push(DayFailure {
                        day_offset: offset,
                        queried_at,
                        error,
                    });
                }
            }
            tokio::time::sleep(pacing).await;
        }

        info!(
            "Fetched {} of {} days for {}",
            fetch.observations.len(),
            days,
            city
        );
        Ok(fetch)
    }

    /// Fetches the direct API forecast for one city, reduced to one point
    /// per calendar day.
    ///
    /// The 3-hour forecast feed is subsampled by taking every eighth entry,
    /// up to `days` points. The whole call is a single API request after
    /// geocoding, so any failure aborts the entire city's forecast.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.city(&str)`: **Required.** The city name to fetch for.
    /// * `.days(usize)`: Optional. How many daily points to keep. Defaults to `5`.
    #[builder]
    pub async fn fetch_forecast(
        &self,
        city: &str,
        days: Option<usize>,
    ) -> Result<Vec<ForecastPoint>, WeathercastError> {
        let days = days.unwrap_or(DEFAULT_FORECAST_DAYS);

        let location = self.geocoder.resolve(city).await?;
        let entries = self.weather.five_day_forecast(location).await?;

        let points: Vec<ForecastPoint> = entries
            .iter()
            .step_by(FORECAST_POINTS_PER_DAY)
            .take(days)
            .map(|entry| ForecastPoint {
                date: DateTime::from_timestamp(entry.dt, 0).unwrap_or_default(),
                predicted: entry.main.temp,
                lower: None,
                upper: None,
            })
            .collect();

        info!("Fetched {} forecast days for {}", points.len(), city);
        Ok(points)
    }
}
