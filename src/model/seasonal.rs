//! Seasonal additive temperature model over the accumulated history.
//!
//! The decomposition (MSTL with an AutoETS trend) and the prediction
//! intervals are delegated entirely to `augurs`; this module's job is
//! choosing the seasonal periods the series can support and stamping the
//! returned horizon with future dates.

use crate::model::adapter::ModelInput;
use crate::model::error::ForecastModelError;
use crate::types::observation::ForecastPoint;
use augurs::ets::AutoETS;
use augurs::mstl::MSTLModel;
use augurs::prelude::*;
use chrono::Duration;
use log::debug;

/// Weekly and yearly cycles, in days: the two periodicities daily
/// temperature data carries.
const SEASONAL_PERIODS: [usize; 2] = [7, 365];
const DEFAULT_HORIZON: usize = 7;
const INTERVAL_LEVEL: f64 = 0.95;
/// Relative interval width used when the trend model reports no intervals.
const FALLBACK_SPREAD: f64 = 0.15;

/// Fits a seasonal model on one city's history and extrapolates a fixed
/// number of days past the latest observation.
pub struct SeasonalForecaster {
    horizon: usize,
    level: f64,
}

impl Default for SeasonalForecaster {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON)
    }
}

impl SeasonalForecaster {
    pub fn new(horizon: usize) -> Self {
        Self {
            horizon,
            level: INTERVAL_LEVEL,
        }
    }

    /// Produces one [`ForecastPoint`] per future day, dated at daily cadence
    /// after the last observation, with lower/upper uncertainty bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastModelError::EmptySeries`] when `input` holds no
    /// observations, and [`ForecastModelError::Fit`] /
    /// [`ForecastModelError::Predict`] when the underlying model rejects the
    /// series (e.g. a degenerate constant or too-short history).
    pub fn forecast(
        &self,
        city: &str,
        input: &ModelInput,
    ) -> Result<Vec<ForecastPoint>, ForecastModelError> {
        let last = input
            .last_timestamp()
            .ok_or_else(|| ForecastModelError::EmptySeries(city.to_string()))?;

        // MSTL needs two full cycles per period; drop the ones this series
        // cannot support.
        let periods: Vec<usize> = SEASONAL_PERIODS
            .iter()
            .copied()
            .filter(|period| input.len() >= 2 * period)
            .collect();

        let forecast = if periods.is_empty() {
            debug!(
                "Series for {} too short for seasonal decomposition ({} points); fitting trend only",
                city,
                input.len()
            );
            let ets = AutoETS::non_seasonal();
            let fitted = ets
                .fit(&input.values)
                .map_err(|e| ForecastModelError::Fit(e.to_string()))?;
            fitted
                .predict(self.horizon, self.level)
                .map_err(|e| ForecastModelError::Predict(e.to_string()))?
        } else {
            debug!("Fitting MSTL for {} with periods {:?}", city, periods);
            let trend = AutoETS::non_seasonal().into_trend_model();
            let model = MSTLModel::new(periods, trend);
            let fitted = model
                .fit(&input.values)
                .map_err(|e| ForecastModelError::Fit(e.to_string()))?;
            fitted
                .predict(self.horizon, self.level)
                .map_err(|e| ForecastModelError::Predict(e.to_string()))?
        };

        let (lower, upper) = match forecast.intervals {
            Some(intervals) => (intervals.lower, intervals.upper),
            None => (
                forecast
                    .point
                    .iter()
                    .map(|v| v - v.abs() * FALLBACK_SPREAD)
                    .collect(),
                forecast
                    .point
                    .iter()
                    .map(|v| v + v.abs() * FALLBACK_SPREAD)
                    .collect(),
            ),
        };

        let points = forecast
            .point
            .iter()
            .zip(lower.iter().zip(upper.iter()))
            .enumerate()
            .map(|(i, (&predicted, (&low, &high)))| ForecastPoint {
                date: last + Duration::days(i as i64 + 1),
                predicted,
                lower: Some(low),
                upper: Some(high),
            })
            .collect();
        Ok(points)
    }
}
