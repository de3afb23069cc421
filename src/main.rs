use clap::{Args, Parser, Subcommand};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use weathercast::{
    collect_model_input, forecast_path, read_observations, to_model_frame, write_forecast,
    write_observations, HistoryFrame, SeasonalForecaster, Weathercast, WeathercastError,
};

const DEFAULT_CITIES: &str = "New York,Tokyo,Sydney,London,Nairobi";
const DEFAULT_DATASET: &str = "data/weather_data.json";

/// Collect OpenWeatherMap history and produce temperature forecasts.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Comma-separated list of cities.
    #[arg(long, global = true, default_value = DEFAULT_CITIES, value_delimiter = ',')]
    cities: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ApiKey {
    /// OpenWeatherMap API key.
    #[arg(long, env = "OWM_API_KEY", hide_env_values = true)]
    api_key: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch per-day historical observations and write the combined dataset.
    History {
        #[command(flatten)]
        key: ApiKey,

        /// How many past days to query per city.
        #[arg(long, default_value_t = 365)]
        days: u32,

        /// Combined dataset output file.
        #[arg(long, default_value = DEFAULT_DATASET)]
        out: PathBuf,
    },
    /// Fetch the direct API forecast and write one file per city.
    Forecast {
        #[command(flatten)]
        key: ApiKey,

        /// How many daily points to keep per city.
        #[arg(long, default_value_t = 5)]
        days: usize,

        /// Output directory for the per-city forecast files.
        #[arg(long, default_value = "data")]
        out_dir: PathBuf,
    },
    /// Fit the seasonal model on the accumulated dataset and write per-city
    /// forecasts.
    Predict {
        /// Days to extrapolate past the latest observation.
        #[arg(long, default_value_t = 7)]
        horizon: usize,

        /// Combined dataset file written by `history`.
        #[arg(long, default_value = DEFAULT_DATASET)]
        data: PathBuf,

        /// Output directory for the per-city forecast files.
        #[arg(long, default_value = "data")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), WeathercastError> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::History { key, days, out } => {
            let client = Weathercast::new(key.api_key)?;
            run_history(&client, &cli.cities, days, &out).await
        }
        Command::Forecast { key, days, out_dir } => {
            let client = Weathercast::new(key.api_key)?;
            run_forecast(&client, &cli.cities, days, &out_dir).await
        }
        Command::Predict {
            horizon,
            data,
            out_dir,
        } => run_predict(&cli.cities, horizon, &data, &out_dir),
    }
}

async fn run_history(
    client: &Weathercast,
    cities: &[String],
    days: u32,
    out: &Path,
) -> Result<(), WeathercastError> {
    let mut all = Vec::new();
    for city in cities {
        info!("Fetching {} days of history for {}", days, city);
        let fetch = client.fetch_history().city(city).days(days).call().await?;
        if fetch.failure_count() > 0 {
            warn!(
                "{}: {} of {} days failed and were skipped",
                city,
                fetch.failure_count(),
                days
            );
        }
        all.extend(fetch.observations);
    }
    write_observations(out, &all)
}

async fn run_forecast(
    client: &Weathercast,
    cities: &[String],
    days: usize,
    out_dir: &Path,
) -> Result<(), WeathercastError> {
    for city in cities {
        match client.fetch_forecast().city(city).days(days).call().await {
            Ok(points) => write_forecast(&forecast_path(out_dir, city), &points)?,
            Err(e) => error!("Forecast failed for {}: {}", city, e),
        }
    }
    Ok(())
}

fn run_predict(
    cities: &[String],
    horizon: usize,
    data: &Path,
    out_dir: &Path,
) -> Result<(), WeathercastError> {
    let observations = read_observations(data)?;
    let history = HistoryFrame::from_observations(&observations)?;
    let forecaster = SeasonalForecaster::new(horizon);

    for city in cities {
        let input = collect_model_input(to_model_frame(&history.for_city(city)))?;
        let points = forecaster.forecast(city, &input)?;
        write_forecast(&forecast_path(out_dir, city), &points)?;
        info!("Wrote {}-day forecast for {}", horizon, city);
    }
    Ok(())
}
