//! Core library for the `weather-report` CLI.
//!
//! This crate defines:
//! - Settings resolved from environment-style key-value configuration
//! - The weather provider abstraction and its Open-Meteo implementation
//! - The weather-code description table
//! - The append-only CSV log and the console report
//!
//! It is used by `weather-report-cli`, but the pieces can be driven on their own.

pub mod codes;
pub mod config;
pub mod error;
pub mod log;
pub mod model;
pub mod provider;
pub mod report;

pub use codes::{FALLBACK_DESCRIPTION, describe};
pub use config::Settings;
pub use error::{Result, WeatherError};
pub use log::{append_observation, append_observation_at};
pub use model::{Coordinates, WeatherObservation};
pub use provider::{WeatherProvider, openmeteo::OpenMeteoProvider, provider_from_settings};
pub use report::{RunOutcome, render_report, run};
