//! Serde models for the OpenWeatherMap responses this crate consumes. Only
//! the fields the fetchers extract are declared; everything else in the
//! payloads is ignored.

use serde::Deserialize;

/// One Call 3.0 time-machine payload: a single-element `data` list for the
/// requested timestamp.
#[derive(Debug, Deserialize)]
pub struct TimeMachineResponse {
    pub data: Vec<TimeMachinePoint>,
}

#[derive(Debug, Deserialize)]
pub struct TimeMachinePoint {
    pub dt: i64,
    pub temp: f64,
    pub humidity: f64,
    pub rain: Option<RainVolume>,
}

/// Rain volume bucket; the API nests the last hour's amount under a `1h` key
/// and omits the whole block on dry days.
#[derive(Debug, Deserialize)]
pub struct RainVolume {
    #[serde(rename = "1h", default)]
    pub one_hour: f64,
}

impl TimeMachinePoint {
    /// Precipitation in mm, 0.0 when the API omitted the rain block.
    pub fn precipitation(&self) -> f64 {
        self.rain.as_ref().map(|r| r.one_hour).unwrap_or(0.0)
    }
}

/// 5-day/3-hour forecast payload.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: ForecastMain,
}

#[derive(Debug, Deserialize)]
pub struct ForecastMain {
    pub temp: f64,
    pub humidity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_machine_point_with_rain() {
        let raw = r#"{
            "lat": 51.5, "lon": -0.1, "timezone": "Europe/London",
            "data": [{"dt": 1700000000, "temp": 10.5, "humidity": 80, "rain": {"1h": 0.3}}]
        }"#;
        let response: TimeMachineResponse = serde_json::from_str(raw).unwrap();
        let point = &response.data[0];
        assert_eq!(point.temp, 10.5);
        assert_eq!(point.humidity, 80.0);
        assert_eq!(point.precipitation(), 0.3);
    }

    #[test]
    fn time_machine_point_without_rain_defaults_to_zero() {
        let raw = r#"{"data": [{"dt": 1700000000, "temp": 10.5, "humidity": 80}]}"#;
        let response: TimeMachineResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.data[0].precipitation(), 0.0);
    }

    #[test]
    fn time_machine_point_missing_temp_is_a_parse_error() {
        let raw = r#"{"data": [{"dt": 1700000000, "humidity": 80}]}"#;
        assert!(serde_json::from_str::<TimeMachineResponse>(raw).is_err());
    }

    #[test]
    fn forecast_list_parses_three_hour_entries() {
        let raw = r#"{
            "cod": "200",
            "list": [
                {"dt": 1700000000, "main": {"temp": 12.0, "humidity": 70, "pressure": 1013}},
                {"dt": 1700010800, "main": {"temp": 13.5, "humidity": 68, "pressure": 1012}}
            ],
            "city": {"name": "London"}
        }"#;
        let response: ForecastResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.list.len(), 2);
        assert_eq!(response.list[1].main.temp, 13.5);
    }
}
