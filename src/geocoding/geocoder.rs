//! City-name resolution against the OpenWeatherMap direct-geocoding endpoint.

use crate::geocoding::error::GeocodingError;
use crate::weathercast::LatLon;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

const DEFAULT_GEO_BASE_URL: &str = "http://api.openweathermap.org/geo/1.0";
const RESULT_LIMIT: &str = "1";

/// Resolves city names to coordinates.
///
/// The endpoint returns matches ordered by relevance; only the first one is
/// consumed. A city with no match at all is a [`GeocodingError::NoMatch`],
/// which callers treat as fatal for that city's run.
pub struct Geocoder {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GeoMatch {
    lat: f64,
    lon: f64,
}

impl Geocoder {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_GEO_BASE_URL)
    }

    /// Points the geocoder at a different host, e.g. a mock server in tests.
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

    /// Resolves `city` to the coordinates of its best match.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError::NoMatch`] when the endpoint reports zero
    /// results, [`GeocodingError::HttpStatus`] for a non-success status, and
    /// [`GeocodingError::NetworkRequest`] / [`GeocodingError::Decode`] for
    /// transport or body failures.
    pub async fn resolve(&self, city: &str) -> Result<LatLon, GeocodingError> {
        let url = format!("{}/direct", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("limit", RESULT_LIMIT),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| GeocodingError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    GeocodingError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    GeocodingError::NetworkRequest(url, e)
                });
            }
        };

        let matches: Vec<GeoMatch> = response.json().await.map_err(|e| GeocodingError::Decode {
            city: city.to_string(),
            source: e,
        })?;

        let first = matches
            .into_iter()
            .next()
            .ok_or_else(|| GeocodingError::NoMatch(city.to_string()))?;

        debug!("Geocoded '{}' to ({}, {})", city, first.lat, first.lon);
        Ok(LatLon(first.lat, first.lon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_geocoder(server: &MockServer) -> Geocoder {
        Geocoder::with_base_url(Client::new(), "test-key", server.uri())
    }

    #[tokio::test]
    async fn resolve_consumes_first_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/direct"))
            .and(query_param("q", "London"))
            .and(query_param("limit", "1"))
            .and(query_param("appid", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "London", "lat": 51.5073, "lon": -0.1276, "country": "GB"},
                {"name": "London", "lat": 42.9834, "lon": -81.2330, "country": "CA"}
            ])))
            .mount(&server)
            .await;

        let location = test_geocoder(&server).resolve("London").await.unwrap();
        assert!((location.0 - 51.5073).abs() < 1e-9);
        assert!((location.1 + 0.1276).abs() < 1e-9);
    }

    #[tokio::test]
    async fn resolve_fails_on_empty_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = test_geocoder(&server)
            .resolve("Atlantis")
            .await
            .unwrap_err();
        assert!(matches!(err, GeocodingError::NoMatch(city) if city == "Atlantis"));
    }

    #[tokio::test]
    async fn resolve_fails_on_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/direct"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = test_geocoder(&server).resolve("London").await.unwrap_err();
        assert!(matches!(
            err,
            GeocodingError::HttpStatus { status, .. } if status == reqwest::StatusCode::UNAUTHORIZED
        ));
    }

    #[tokio::test]
    async fn resolve_fails_on_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = test_geocoder(&server).resolve("London").await.unwrap_err();
        assert!(matches!(err, GeocodingError::Decode { .. }));
    }
}
