use crate::types::observation::WeatherObservation;
use crate::weather_api::error::WeatherApiError;
use chrono::{DateTime, Utc};

/// Why a single day's fetch produced no row.
#[derive(Debug)]
pub struct DayFailure {
    /// Whole-day offset back from the run start (0 = today).
    pub day_offset: u32,
    /// The timestamp the time-machine query asked for.
    pub queried_at: DateTime<Utc>,
    pub error: WeatherApiError,
}

/// Outcome of one city's historical run.
///
/// Every day of the requested window lands in exactly one of the two lists:
/// a [`WeatherObservation`] when the fetch succeeded, or a [`DayFailure`]
/// recording the offset and the error when it did not. The caller decides
/// whether and how to surface the aggregate failure count.
#[derive(Debug, Default)]
pub struct HistoryFetch {
    pub observations: Vec<WeatherObservation>,
    pub failures: Vec<DayFailure>,
}

impl HistoryFetch {
    /// True when not a single day produced a row.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}
