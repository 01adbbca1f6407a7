//! Append-only CSV log of successful report runs.

use std::{fs::OpenOptions, path::Path};

use chrono::Local;
use tracing::info;

use crate::{
    codes,
    error::{Result, WeatherError},
    model::{Coordinates, WeatherObservation, decimal},
};

pub const DEFAULT_LOG_PATH: &str = "weather_log.csv";

/// Column names, written once when the log file is created.
pub const HEADER: [&str; 10] = [
    "logged_at",
    "api_time",
    "city",
    "latitude",
    "longitude",
    "temperature_c",
    "windspeed_kmh",
    "winddirection_deg",
    "weather_code",
    "description_ro",
];

pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Local wall-clock time formatted as `YYYY-MM-DD HH:MM:SS`.
pub fn local_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Append one observation to the CSV log at `path`, stamped with the current
/// local time.
pub fn append_observation(
    city: &str,
    coordinates: Coordinates,
    observation: &WeatherObservation,
    path: &Path,
) -> Result<()> {
    append_observation_at(&local_timestamp(), city, coordinates, observation, path)
}

/// Same as [`append_observation`] with an explicit `logged_at` value.
///
/// The header row is written only if `path` did not exist before this call.
pub fn append_observation_at(
    logged_at: &str,
    city: &str,
    coordinates: Coordinates,
    observation: &WeatherObservation,
    path: &Path,
) -> Result<()> {
    let existed = path.exists();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| WeatherError::io(path, e))?;

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if !existed {
        wtr.write_record(HEADER).map_err(|e| WeatherError::io(path, e))?;
    }

    let record = [
        logged_at.to_string(),
        observation.time.clone().unwrap_or_default(),
        city.to_string(),
        decimal(coordinates.latitude),
        decimal(coordinates.longitude),
        observation.temperature.map_or(String::new(), decimal),
        observation.windspeed.map_or(String::new(), decimal),
        optional(observation.winddirection),
        optional(observation.weathercode),
        codes::describe(observation.weathercode).to_string(),
    ];

    wtr.write_record(&record).map_err(|e| WeatherError::io(path, e))?;
    wtr.flush().map_err(|e| WeatherError::io(path, e))?;

    info!(path = %path.display(), header = !existed, "Appended observation to weather log");
    Ok(())
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or(String::new(), |v| v.to_string())
}
