//! Console rendering and the single fetch → print → log pass.

use std::{
    fmt::Display,
    io::{self, Write},
};

use tracing::{debug, info};

use crate::{
    codes,
    config::Settings,
    log,
    model::{Coordinates, WeatherObservation, decimal},
    provider::WeatherProvider,
};

const TITLE: &str = "===== Daily Weather Report =====";
const RULE: &str = "================================";
const MISSING: &str = "n/a";

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Report printed and row appended to the log.
    Logged,
    /// The weather request failed; nothing was printed besides the error and
    /// nothing was logged.
    FetchFailed,
    /// Report printed, but the log row could not be written.
    LogFailed,
}

impl RunOutcome {
    pub fn is_success(self) -> bool {
        self == RunOutcome::Logged
    }
}

/// Write the multi-line report block for one observation.
pub fn render_report<W: Write + ?Sized>(
    out: &mut W,
    generated_at: &str,
    city: &str,
    coordinates: Coordinates,
    observation: &WeatherObservation,
) -> io::Result<()> {
    writeln!(out, "{TITLE}")?;
    writeln!(out, "Generated at: {generated_at}")?;
    writeln!(
        out,
        "Location: {city} (lat={}, lon={})",
        decimal(coordinates.latitude),
        decimal(coordinates.longitude)
    )?;
    writeln!(out)?;
    writeln!(out, "API time: {}", or_missing(observation.time.as_deref()))?;
    writeln!(out, "Temperature: {} °C", or_missing(observation.temperature.map(decimal)))?;
    writeln!(out, "Wind speed: {} km/h", or_missing(observation.windspeed.map(decimal)))?;
    writeln!(out, "Wind direction: {}°", or_missing(observation.winddirection))?;
    writeln!(out, "Conditions: {}", codes::describe(observation.weathercode))?;
    writeln!(out, "{RULE}")
}

/// Run one report: fetch, print, log.
///
/// Fetch and log failures are written to `out` as a single `[ERROR]` line and
/// reflected in the returned [`RunOutcome`]. Only a failure to write to `out`
/// itself is returned as an error.
pub async fn run<W: Write + ?Sized>(
    provider: &dyn WeatherProvider,
    settings: &Settings,
    out: &mut W,
) -> io::Result<RunOutcome> {
    let observation = match provider.current(settings.coordinates).await {
        Ok(obs) => obs,
        Err(e) => {
            debug!(error = %e, "Weather fetch failed");
            writeln!(out, "[ERROR] Failed to fetch weather data: {e}")?;
            return Ok(RunOutcome::FetchFailed);
        }
    };

    let now = log::local_timestamp();
    render_report(out, &now, &settings.city, settings.coordinates, &observation)?;

    if let Err(e) = log::append_observation(
        &settings.city,
        settings.coordinates,
        &observation,
        &settings.log_path,
    ) {
        debug!(error = %e, "Weather log write failed");
        writeln!(out, "[ERROR] Failed to write weather log: {e}")?;
        return Ok(RunOutcome::LogFailed);
    }

    info!(path = %settings.log_path.display(), "Report logged");
    Ok(RunOutcome::Logged)
}

fn or_missing<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}
