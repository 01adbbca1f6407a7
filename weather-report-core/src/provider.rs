use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    config::Settings,
    error::Result,
    model::{Coordinates, WeatherObservation},
    provider::openmeteo::OpenMeteoProvider,
};

pub mod openmeteo;

/// A source of current weather conditions.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch the current observation for `coordinates`.
    ///
    /// Any failure to obtain a complete, parseable response is a
    /// [`WeatherError::Network`](crate::WeatherError::Network).
    async fn current(&self, coordinates: Coordinates) -> Result<WeatherObservation>;
}

/// Construct the provider described by `settings`.
pub fn provider_from_settings(settings: &Settings) -> Result<Box<dyn WeatherProvider>> {
    let provider = OpenMeteoProvider::new(settings.api_url.clone(), settings.timeout())?;
    Ok(Box::new(provider))
}
