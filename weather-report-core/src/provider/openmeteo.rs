use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::{error::Error, time::Duration};
use tracing::{debug, info};

use crate::{
    error::{Result, WeatherError},
    model::{Coordinates, WeatherObservation},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1";

/// Client for the keyless Open-Meteo forecast endpoint.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    timeout: Duration,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::network(format!("Failed to build HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { base_url, timeout, http })
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast", self.base_url)
    }

    fn request_error(&self, err: &reqwest::Error) -> WeatherError {
        if err.is_timeout() {
            WeatherError::network(format!("Open-Meteo request timed out after {:?}", self.timeout))
        } else {
            WeatherError::network(format!(
                "Failed to send request to Open-Meteo: {}",
                error_chain(err)
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    #[serde(default)]
    current_weather: Option<OmCurrentWeather>,
}

#[derive(Debug, Default, Deserialize)]
struct OmCurrentWeather {
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    temperature: Option<f64>,
    #[serde(default)]
    windspeed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_int")]
    winddirection: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    weathercode: Option<i64>,
}

impl From<OmCurrentWeather> for WeatherObservation {
    fn from(cw: OmCurrentWeather) -> Self {
        Self {
            time: cw.time,
            temperature: cw.temperature,
            windspeed: cw.windspeed,
            winddirection: cw.winddirection,
            weathercode: cw.weathercode,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn current(&self, coordinates: Coordinates) -> Result<WeatherObservation> {
        let url = self.forecast_url();
        let latitude = coordinates.latitude.to_string();
        let longitude = coordinates.longitude.to_string();

        debug!(%url, %latitude, %longitude, "Requesting current weather");

        let res = self
            .http
            .get(url.as_str())
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current_weather", "true"),
                ("timezone", "auto"),
            ])
            .send()
            .await
            .map_err(|e| self.request_error(&e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| self.request_error(&e))?;

        info!(%status, bytes = body.len(), "Open-Meteo responded");

        if !status.is_success() {
            return Err(WeatherError::network(format!(
                "Open-Meteo request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: OmResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::network(format!("Failed to parse Open-Meteo JSON: {e}")))?;

        Ok(parsed.current_weather.unwrap_or_default().into())
    }
}

/// Accept integer fields sent as JSON floats (`180.0`).
fn lenient_int<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(|v| v.round() as i64))
}

/// `err` followed by each of its sources, joined with `": "`.
fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
