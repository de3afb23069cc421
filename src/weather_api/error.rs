use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherApiError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode weather response from {0}")]
    Decode(String, #[source] reqwest::Error),

    // The time-machine endpoint reports a single-element data list; an empty
    // one means the API had nothing for that timestamp.
    #[error("No weather data returned for ({lat}, {lon}) at {timestamp}")]
    MissingData { lat: f64, lon: f64, timestamp: i64 },
}
