//! Flat-file output: the combined historical dataset and the per-city
//! forecast files. Both are array-of-records JSON with ISO-8601 dates, and
//! both are truncated on write, so a rerun replaces the previous run's data
//! instead of appending to it.

use crate::error::WeathercastError;
use crate::types::observation::{ForecastPoint, WeatherObservation};
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Lowercase, space-to-underscore transform used in per-city file names.
pub fn city_slug(city: &str) -> String {
    city.to_lowercase().replace(' ', "_")
}

/// Path of the per-city forecast file inside `dir`.
pub fn forecast_path(dir: &Path, city: &str) -> PathBuf {
    dir.join(format!("forecast_{}.json", city_slug(city)))
}

/// Writes the combined dataset, replacing any previous run's file.
pub fn write_observations(
    path: &Path,
    observations: &[WeatherObservation],
) -> Result<(), WeathercastError> {
    write_records(path, observations)
}

/// Reads a combined dataset written by [`write_observations`].
pub fn read_observations(path: &Path) -> Result<Vec<WeatherObservation>, WeathercastError> {
    read_records(path)
}

/// Writes one city's forecast, replacing any previous run's file.
pub fn write_forecast(path: &Path, points: &[ForecastPoint]) -> Result<(), WeathercastError> {
    write_records(path, points)
}

fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), WeathercastError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| WeathercastError::DatasetWrite(path.to_path_buf(), e))?;
        }
    }

    let file = File::create(path).map_err(|e| WeathercastError::DatasetWrite(path.to_path_buf(), e))?;
    serde_json::to_writer(file, records)
        .map_err(|e| WeathercastError::DatasetEncode(path.to_path_buf(), e))?;

    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, WeathercastError> {
    let bytes =
        std::fs::read(path).map_err(|e| WeathercastError::DatasetRead(path.to_path_buf(), e))?;
    serde_json::from_slice(&bytes).map_err(|e| WeathercastError::DatasetDecode(path.to_path_buf(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn observation(city: &str, day: u32) -> WeatherObservation {
        WeatherObservation {
            date: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
            city: city.to_string(),
            temperature: 9.0 + day as f64,
            humidity: 70.0,
            precipitation: 0.0,
        }
    }

    #[test]
    fn slug_lowercases_and_replaces_spaces() {
        assert_eq!(city_slug("New York"), "new_york");
        assert_eq!(city_slug("Tokyo"), "tokyo");
    }

    #[test]
    fn forecast_path_uses_slug() {
        let path = forecast_path(Path::new("data"), "New York");
        assert_eq!(path, Path::new("data").join("forecast_new_york.json"));
    }

    #[test]
    fn observations_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather_data.json");
        let observations = vec![observation("London", 1), observation("Tokyo", 2)];

        write_observations(&path, &observations).unwrap();
        let back = read_observations(&path).unwrap();
        assert_eq!(back, observations);
    }

    #[test]
    fn rewrite_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather_data.json");

        let first = vec![
            observation("London", 1),
            observation("London", 2),
            observation("London", 3),
        ];
        write_observations(&path, &first).unwrap();

        let second = vec![observation("Tokyo", 4)];
        write_observations(&path, &second).unwrap();

        let back = read_observations(&path).unwrap();
        assert_eq!(back, second);
    }

    #[test]
    fn write_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("weather_data.json");

        write_observations(&path, &[observation("London", 1)]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn read_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_observations(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, WeathercastError::DatasetRead(_, _)));
    }
}
