use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Errors surfaced by the report pipeline.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The weather request could not be completed, timed out, returned a
    /// non-success status, or carried a body that is not valid JSON.
    #[error("{0}")]
    Network(String),

    /// The CSV log could not be opened or written.
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configuration value could not be interpreted.
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WeatherError>;

impl WeatherError {
    pub fn network(message: impl fmt::Display) -> Self {
        WeatherError::Network(message.to_string())
    }

    pub fn io(path: impl Into<PathBuf>, source: impl Into<io::Error>) -> Self {
        WeatherError::Io {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn config(message: impl fmt::Display) -> Self {
        WeatherError::Config(message.to_string())
    }
}
