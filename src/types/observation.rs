use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single (city, day) weather record produced by the historical fetcher.
///
/// Serialized field names (`temp`, `precip`) match the record layout of the
/// combined dataset file; dates are ISO-8601 via chrono's serde support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub date: DateTime<Utc>,
    pub city: String,
    #[serde(rename = "temp")]
    pub temperature: f64,
    pub humidity: f64,
    #[serde(rename = "precip", default)]
    pub precipitation: f64,
}

/// One forecast day, either from the seasonal model or straight from the
/// forecast API.
///
/// The model-based path fills `lower`/`upper` with the uncertainty interval
/// around the point prediction; the direct-API path has no interval to report
/// and leaves them out of the serialized record entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    #[serde(rename = "ds")]
    pub date: DateTime<Utc>,
    #[serde(rename = "yhat")]
    pub predicted: f64,
    #[serde(rename = "yhat_lower", skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(rename = "yhat_upper", skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn observation_serializes_with_wire_names() {
        let observation = WeatherObservation {
            date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            city: "London".to_string(),
            temperature: 9.4,
            humidity: 81.0,
            precipitation: 0.3,
        };

        let value = serde_json::to_value(&observation).unwrap();
        assert_eq!(value["temp"], 9.4);
        assert_eq!(value["precip"], 0.3);
        assert_eq!(value["city"], "London");
        assert!(value["date"].as_str().unwrap().starts_with("2024-03-01T12:00:00"));
    }

    #[test]
    fn observation_precipitation_defaults_to_zero() {
        let raw = r#"{"date":"2024-03-01T12:00:00Z","city":"London","temp":9.4,"humidity":81.0}"#;
        let observation: WeatherObservation = serde_json::from_str(raw).unwrap();
        assert_eq!(observation.precipitation, 0.0);
    }

    #[test]
    fn forecast_point_omits_absent_bounds() {
        let point = ForecastPoint {
            date: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            predicted: 11.0,
            lower: None,
            upper: None,
        };

        let value = serde_json::to_value(&point).unwrap();
        assert!(value.get("yhat_lower").is_none());
        assert!(value.get("yhat_upper").is_none());
        assert_eq!(value["yhat"], 11.0);
    }

    #[test]
    fn forecast_point_round_trips_with_bounds() {
        let point = ForecastPoint {
            date: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            predicted: 11.0,
            lower: Some(8.5),
            upper: Some(13.5),
        };

        let json = serde_json::to_string(&point).unwrap();
        let back: ForecastPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }
}
