//! Runtime settings.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `GAITWATCH_*` environment variables, then command-line flags (applied by
//! the binary).
//!
//! ```toml
//! endpoint = "http://tesla.iem.pw.edu.pl:9080/v2/monitor"
//! patients = [1, 2, 3, 4, 5]
//! poll_interval = "200ms"
//! retention = "600s"
//! request_timeout = "5s"
//! refresh = "1s"
//! log_file = "gaitwatch.log"
//! # replay_dir = "recordings/"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use gaitwatch_types::PatientId;

use crate::data::duration::parse_duration;
use crate::poller::{DEFAULT_POLL_INTERVAL, DEFAULT_RETENTION};
use crate::source::DEFAULT_ENDPOINT;

/// Settings as they appear in files and the environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawSettings {
    endpoint: String,
    patients: Vec<u32>,
    poll_interval: String,
    retention: String,
    request_timeout: String,
    refresh: String,
    replay_dir: Option<PathBuf>,
    log_file: PathBuf,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            patients: vec![1, 2, 3, 4, 5],
            poll_interval: "200ms".to_string(),
            retention: "600s".to_string(),
            request_timeout: "5s".to_string(),
            refresh: "1s".to_string(),
            replay_dir: None,
            log_file: PathBuf::from("gaitwatch.log"),
        }
    }
}

/// Resolved, validated settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Base URL; readings are fetched from `{endpoint}/{patient}`.
    pub endpoint: String,
    pub patients: Vec<PatientId>,
    pub poll_interval: Duration,
    /// How long readings stay in the buffer.
    pub retention: Duration,
    pub request_timeout: Duration,
    /// How often the UI redraws from the store.
    pub refresh: Duration,
    /// Replay readings from `{replay_dir}/{patient}.json` instead of HTTP.
    pub replay_dir: Option<PathBuf>,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            patients: (1..=5).map(PatientId).collect(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            retention: DEFAULT_RETENTION,
            request_timeout: Duration::from_secs(5),
            refresh: Duration::from_secs(1),
            replay_dir: None,
            log_file: PathBuf::from("gaitwatch.log"),
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(
            Environment::with_prefix("GAITWATCH")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("patients"),
        );

        let raw: RawSettings = builder
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;
        raw.resolve()
    }

    /// Check invariants that other components rely on.
    pub fn validate(&self) -> Result<()> {
        if self.patients.is_empty() {
            bail!("At least one patient must be configured");
        }
        if self.poll_interval.is_zero() {
            bail!("poll_interval must be greater than zero");
        }
        if self.refresh.is_zero() {
            bail!("refresh must be greater than zero");
        }
        if self.retention.is_zero() {
            bail!("retention must be greater than zero");
        }
        if self.replay_dir.is_none() && self.endpoint.trim().is_empty() {
            bail!("endpoint must not be empty");
        }
        Ok(())
    }
}

impl RawSettings {
    fn resolve(self) -> Result<Settings> {
        let duration = |name: &str, value: &str| {
            parse_duration(value).with_context(|| format!("Invalid {}: {:?}", name, value))
        };

        let mut seen = HashSet::new();
        let patients: Vec<PatientId> =
            self.patients.into_iter().map(PatientId).filter(|id| seen.insert(*id)).collect();

        let settings = Settings {
            endpoint: self.endpoint,
            patients,
            poll_interval: duration("poll_interval", &self.poll_interval)?,
            retention: duration("retention", &self.retention)?,
            request_timeout: duration("request_timeout", &self.request_timeout)?,
            refresh: duration("refresh", &self.refresh)?,
            replay_dir: self.replay_dir,
            log_file: self.log_file,
        };
        settings.validate()?;
        Ok(settings)
    }
}

/// Parse a comma-separated patient list such as `"1,2,5"`.
pub fn parse_patients(s: &str) -> Result<Vec<PatientId>> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.parse::<PatientId>().with_context(|| format!("Invalid patient id: {:?}", part))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.patients.len(), 5);
        assert_eq!(settings.poll_interval, Duration::from_millis(200));
        assert_eq!(settings.retention, Duration::from_secs(600));
        assert_eq!(settings.refresh, Duration::from_secs(1));
        assert!(settings.replay_dir.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
            endpoint = "http://localhost:9080/v2/monitor"
            patients = [7, 9]
            retention = "2m"
            replay_dir = "/tmp/replay"
            "#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();

        assert_eq!(settings.endpoint, "http://localhost:9080/v2/monitor");
        assert_eq!(settings.patients, vec![PatientId(7), PatientId(9)]);
        assert_eq!(settings.retention, Duration::from_secs(120));
        assert_eq!(settings.poll_interval, Duration::from_millis(200));
        assert_eq!(settings.replay_dir, Some(PathBuf::from("/tmp/replay")));
    }

    #[test]
    fn test_invalid_duration_is_rejected() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, r#"poll_interval = "fast""#).unwrap();

        let err = Settings::load(Some(file.path())).unwrap_err();

        assert!(format!("{:#}", err).contains("poll_interval"));
    }

    #[test]
    fn test_validate() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());

        settings.patients.clear();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.poll_interval = Duration::ZERO;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_builtin_defaults_resolve() {
        assert_eq!(RawSettings::default().resolve().unwrap(), Settings::default());
    }

    #[test]
    fn test_duplicate_patients_are_dropped() {
        let raw = RawSettings {
            patients: vec![3, 1, 3, 2, 1],
            ..RawSettings::default()
        };
        let settings = raw.resolve().unwrap();
        assert_eq!(settings.patients, vec![PatientId(3), PatientId(1), PatientId(2)]);
    }

    #[test]
    fn test_parse_patients() {
        assert_eq!(
            parse_patients("1, 2,5,").unwrap(),
            vec![PatientId(1), PatientId(2), PatientId(5)]
        );
        assert!(parse_patients("1,x").is_err());
    }
}
