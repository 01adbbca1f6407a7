use std::{io, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use weather_report_core::{RunOutcome, Settings, provider_from_settings, report};

/// Fetch current conditions, print the daily report and append it to the log.
///
/// Every option falls back to its environment variable, then to the built-in
/// default.
#[derive(Debug, Parser)]
#[command(name = "weather-report", version, about = "Daily weather report")]
pub struct Cli {
    /// Latitude in decimal degrees [env: LATITUDE].
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees [env: LONGITUDE].
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// Display name of the location [env: CITY_NAME].
    #[arg(long)]
    pub city: Option<String>,

    /// CSV file the observation is appended to [env: WEATHER_LOG_PATH].
    #[arg(long)]
    pub log_path: Option<PathBuf>,

    /// Open-Meteo API base URL [env: WEATHER_API_URL].
    #[arg(long)]
    pub api_url: Option<String>,

    /// Request timeout in seconds [env: WEATHER_TIMEOUT_SECS].
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Exit with a non-zero status when the fetch or the log write fails
    /// [env: WEATHER_STRICT].
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let base = Settings::from_env().context("Failed to read configuration from environment")?;
        let settings = self.apply(base);
        debug!(?settings, "Resolved settings");

        let provider =
            provider_from_settings(&settings).context("Failed to initialise weather client")?;

        let mut stdout = io::stdout();
        let outcome = report::run(provider.as_ref(), &settings, &mut stdout)
            .await
            .context("Failed to write report to stdout")?;

        Ok(ExitCode::from(exit_status(settings.strict, outcome)))
    }

    /// Layer command-line values over `base`.
    fn apply(self, mut base: Settings) -> Settings {
        if let Some(latitude) = self.latitude {
            base.coordinates.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            base.coordinates.longitude = longitude;
        }
        if let Some(city) = self.city {
            base.city = city;
        }
        if let Some(log_path) = self.log_path {
            base.log_path = log_path;
        }
        if let Some(api_url) = self.api_url {
            base.api_url = api_url;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            base.timeout_secs = timeout_secs;
        }
        base.strict |= self.strict;
        base
    }
}

/// Failures only change the exit status in strict mode.
fn exit_status(strict: bool, outcome: RunOutcome) -> u8 {
    if strict && !outcome.is_success() {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::{
        io::Write,
        sync::{Arc, Mutex},
        time::Duration,
    };
    use weather_report_core::OpenMeteoProvider;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_flags_keep_base_settings() {
        let cli = Cli::try_parse_from(["weather-report"]).expect("parses");
        let settings = cli.apply(Settings::default());

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn flags_override_base_settings() {
        let cli = Cli::try_parse_from([
            "weather-report",
            "--latitude",
            "-33.87",
            "--longitude",
            "151.21",
            "--city",
            "Sydney",
            "--log-path",
            "/tmp/sydney.csv",
            "--timeout-secs",
            "4",
            "--strict",
        ])
        .expect("parses");

        let settings = cli.apply(Settings::default());

        assert_eq!(settings.coordinates.latitude, -33.87);
        assert_eq!(settings.coordinates.longitude, 151.21);
        assert_eq!(settings.city, "Sydney");
        assert_eq!(settings.log_path, PathBuf::from("/tmp/sydney.csv"));
        assert_eq!(settings.timeout_secs, 4);
        assert!(settings.strict);
    }

    #[test]
    fn strict_from_environment_survives_without_flag() {
        let base = Settings {
            strict: true,
            ..Settings::default()
        };
        let cli = Cli::try_parse_from(["weather-report"]).expect("parses");

        assert!(cli.apply(base).strict);
    }

    #[test]
    fn invalid_latitude_is_rejected() {
        assert!(Cli::try_parse_from(["weather-report", "--latitude", "north"]).is_err());
    }

    #[test]
    fn zero_timeout_flag_is_rejected() {
        assert!(Cli::try_parse_from(["weather-report", "--timeout-secs", "0"]).is_err());
    }

    #[test]
    fn exit_status_is_zero_unless_strict_run_fails() {
        use RunOutcome::{FetchFailed, LogFailed, Logged};

        assert_eq!(exit_status(false, Logged), 0);
        assert_eq!(exit_status(false, FetchFailed), 0);
        assert_eq!(exit_status(false, LogFailed), 0);
        assert_eq!(exit_status(true, Logged), 0);
        assert_eq!(exit_status(true, FetchFailed), 1);
        assert_eq!(exit_status(true, LogFailed), 1);
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("buffer lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn failed_fetch_is_reported_once_at_default_log_level() {
        let stderr = SharedBuf::default();
        let writer = stderr.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(crate::DEFAULT_LOG_FILTER))
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let port = listener.local_addr().expect("local addr").port();
        drop(listener);

        let dir = tempfile::tempdir().expect("tempdir");
        let settings = Settings {
            log_path: dir.path().join("weather_log.csv"),
            ..Settings::default()
        };
        let provider =
            OpenMeteoProvider::new(format!("http://127.0.0.1:{port}"), Duration::from_secs(2))
                .expect("provider");
        let mut stdout = Vec::new();

        let outcome = report::run(&provider, &settings, &mut stdout)
            .await
            .expect("run");

        assert_eq!(outcome, RunOutcome::FetchFailed);
        let stdout = String::from_utf8(stdout).expect("utf8");
        assert_eq!(stdout.lines().count(), 1);
        assert!(stdout.starts_with("[ERROR] Failed to fetch weather data: "));

        let stderr = String::from_utf8(stderr.0.lock().expect("buffer lock").clone())
            .expect("utf8");
        assert!(stderr.is_empty(), "unexpected log output: {stderr}");
        assert!(!settings.log_path.exists());
    }
}
