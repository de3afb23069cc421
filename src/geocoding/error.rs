use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode geocoding response for '{city}'")]
    Decode {
        city: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("No geocoding match for '{0}'")]
    NoMatch(String),
}
