//! Contains the `HistoryFrame` structure for tabular operations on the
//! accumulated historical observations.

use crate::types::observation::WeatherObservation;
use chrono::NaiveDateTime;
use polars::error::PolarsError;
use polars::prelude::*;

pub const COL_DATE: &str = "date";
pub const COL_CITY: &str = "city";
pub const COL_TEMP: &str = "temp";
pub const COL_HUMIDITY: &str = "humidity";
pub const COL_PRECIP: &str = "precip";

/// A wrapper around a Polars `LazyFrame` holding the combined multi-city
/// observation table.
///
/// The frame carries one row per observation with the dataset's column layout
/// (`date`, `city`, `temp`, `humidity`, `precip`). Filtering methods return a
/// new `HistoryFrame` and leave the original untouched, so a single loaded
/// dataset can serve one forecast per city.
#[derive(Clone)]
pub struct HistoryFrame {
    /// The underlying Polars LazyFrame.
    pub frame: LazyFrame,
}

impl HistoryFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Builds the frame from in-memory observations, e.g. a freshly parsed
    /// dataset file. Row order is preserved.
    pub fn from_observations(
        observations: &[WeatherObservation],
    ) -> Result<Self, PolarsError> {
        let dates: Vec<NaiveDateTime> = observations.iter().map(|o| o.date.naive_utc()).collect();
        let cities: Vec<&str> = observations.iter().map(|o| o.city.as_str()).collect();
        let temps: Vec<f64> = observations.iter().map(|o| o.temperature).collect();
        let humidity: Vec<f64> = observations.iter().map(|o| o.humidity).collect();
        let precip: Vec<f64> = observations.iter().map(|o| o.precipitation).collect();

        let df = df!(
            COL_DATE => dates,
            COL_CITY => cities,
            COL_TEMP => temps,
            COL_HUMIDITY => humidity,
            COL_PRECIP => precip,
        )?;
        Ok(Self::new(df.lazy()))
    }

    /// Applies an arbitrary Polars predicate, returning the filtered frame.
    pub fn filter(&self, predicate: Expr) -> HistoryFrame {
        HistoryFrame::new(self.frame.clone().filter(predicate))
    }

    /// Restricts the frame to a single city's rows.
    pub fn for_city(&self, city: &str) -> HistoryFrame {
        self.filter(col(COL_CITY).eq(lit(city)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn observation(city: &str, day: u32, temp: f64) -> WeatherObservation {
        WeatherObservation {
            date: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
            city: city.to_string(),
            temperature: temp,
            humidity: 70.0,
            precipitation: 0.0,
        }
    }

    #[test]
    fn from_observations_keeps_all_rows() {
        let observations = vec![
            observation("London", 1, 8.0),
            observation("Tokyo", 1, 14.0),
            observation("London", 2, 9.0),
        ];

        let history = HistoryFrame::from_observations(&observations).unwrap();
        let df = history.frame.collect().unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(
            df.get_column_names(),
            [COL_DATE, COL_CITY, COL_TEMP, COL_HUMIDITY, COL_PRECIP]
        );
    }

    #[test]
    fn for_city_filters_other_cities_out() {
        let observations = vec![
            observation("London", 1, 8.0),
            observation("Tokyo", 1, 14.0),
            observation("London", 2, 9.0),
        ];

        let history = HistoryFrame::from_observations(&observations).unwrap();
        let df = history.for_city("London").frame.collect().unwrap();
        assert_eq!(df.height(), 2);

        let temps = df.column(COL_TEMP).unwrap().f64().unwrap();
        let collected: Vec<f64> = temps.into_iter().flatten().collect();
        assert_eq!(collected, vec![8.0, 9.0]);
    }

    #[test]
    fn for_city_on_unknown_city_is_empty() {
        let observations = vec![observation("London", 1, 8.0)];
        let history = HistoryFrame::from_observations(&observations).unwrap();
        let df = history.for_city("Nairobi").frame.collect().unwrap();
        assert_eq!(df.height(), 0);
    }
}
