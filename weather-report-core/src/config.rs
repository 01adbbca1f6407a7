use std::{fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use crate::{
    error::{Result, WeatherError},
    log::DEFAULT_LOG_PATH,
    model::Coordinates,
    provider::openmeteo::DEFAULT_BASE_URL,
};

pub const DEFAULT_LATITUDE: f64 = 44.4268;
pub const DEFAULT_LONGITUDE: f64 = 26.1025;
pub const DEFAULT_CITY: &str = "București";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment keys understood by [`Settings::from_env`].
pub mod keys {
    pub const LATITUDE: &str = "LATITUDE";
    pub const LONGITUDE: &str = "LONGITUDE";
    pub const CITY_NAME: &str = "CITY_NAME";
    pub const LOG_PATH: &str = "WEATHER_LOG_PATH";
    pub const API_URL: &str = "WEATHER_API_URL";
    pub const TIMEOUT_SECS: &str = "WEATHER_TIMEOUT_SECS";
    pub const STRICT: &str = "WEATHER_STRICT";
}

/// Everything one report run needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub coordinates: Coordinates,
    /// Display label, also written to the log.
    pub city: String,
    pub log_path: PathBuf,
    /// Base URL of the Open-Meteo API, without the `/forecast` suffix.
    pub api_url: String,
    pub timeout_secs: u64,
    /// Exit non-zero when the run fails.
    pub strict: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            coordinates: Coordinates::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE),
            city: DEFAULT_CITY.to_string(),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            api_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            strict: false,
        }
    }
}

impl Settings {
    /// Resolve settings from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings from an arbitrary key-value source.
    ///
    /// Unset or blank keys keep their default; values that fail to parse are
    /// reported as [`WeatherError::Config`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();

        Ok(Self {
            coordinates: Coordinates::new(
                parse_or(get(keys::LATITUDE), keys::LATITUDE, DEFAULT_LATITUDE)?,
                parse_or(get(keys::LONGITUDE), keys::LONGITUDE, DEFAULT_LONGITUDE)?,
            ),
            city: get(keys::CITY_NAME).unwrap_or(defaults.city),
            log_path: get(keys::LOG_PATH).map_or(defaults.log_path, PathBuf::from),
            api_url: get(keys::API_URL).unwrap_or(defaults.api_url),
            timeout_secs: parse_timeout(get(keys::TIMEOUT_SECS))?,
            strict: get(keys::STRICT)
                .map(|v| parse_flag(keys::STRICT, &v))
                .transpose()?
                .unwrap_or(false),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|e| WeatherError::config(format!("{key}={raw:?}: {e}"))),
    }
}

fn parse_timeout(value: Option<String>) -> Result<u64> {
    match parse_or(value, keys::TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS)? {
        0 => Err(WeatherError::config(format!(
            "{}=0: timeout must be at least one second",
            keys::TIMEOUT_SECS
        ))),
        secs => Ok(secs),
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(WeatherError::config(format!(
            "{key}={raw:?}: expected true/false"
        ))),
    }
}
