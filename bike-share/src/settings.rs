//! Application settings.

use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming the downloaded station feed.
pub const DATASET_ENV: &str = "BIKE_SHARE_DATASET";

/// Environment variable holding the refresh interval in seconds.
pub const REFRESH_SECS_ENV: &str = "BIKE_SHARE_REFRESH_SECS";

const DEFAULT_DATASET_PATH: &str = "bike_share_rows.json";
const DEFAULT_REFRESH_SECS: u64 = 5 * 60;

/// Errors from reading settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{key} must be a positive number of seconds, got {value:?}")]
    InvalidRefreshInterval { key: &'static str, value: String },
}

/// Settings for the station browser.
///
/// Built once at startup and passed by reference to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Path to the downloaded open-data feed.
    pub dataset_path: PathBuf,

    /// How often to reload the feed.
    pub refresh_interval: Duration,
}

impl Settings {
    /// Create settings with the given dataset path and the default refresh interval.
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
        }
    }

    /// Set a custom refresh interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Read settings from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`. Unset and empty values use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let mut settings = Self::default();

        if let Some(path) = get(DATASET_ENV) {
            settings.dataset_path = PathBuf::from(path);
        }

        if let Some(value) = get(REFRESH_SECS_ENV) {
            let secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&secs| secs > 0)
                .ok_or(SettingsError::InvalidRefreshInterval {
                    key: REFRESH_SECS_ENV,
                    value: value.clone(),
                })?;
            settings.refresh_interval = Duration::from_secs(secs);
        }

        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_DATASET_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.dataset_path, PathBuf::from("bike_share_rows.json"));
        assert_eq!(settings.refresh_interval, Duration::from_secs(300));
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn environment_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            (DATASET_ENV, "/var/lib/bikes/rows.json"),
            (REFRESH_SECS_ENV, "60"),
        ]))
        .unwrap();

        assert_eq!(settings.dataset_path, PathBuf::from("/var/lib/bikes/rows.json"));
        assert_eq!(settings.refresh_interval, Duration::from_secs(60));
    }

    #[test]
    fn empty_values_are_ignored() {
        let settings =
            Settings::from_lookup(lookup(&[(DATASET_ENV, ""), (REFRESH_SECS_ENV, "")])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn invalid_refresh_interval() {
        for bad in ["0", "-5", "soon", "1.5"] {
            let err = Settings::from_lookup(lookup(&[(REFRESH_SECS_ENV, bad)])).unwrap_err();
            assert_eq!(
                err,
                SettingsError::InvalidRefreshInterval {
                    key: REFRESH_SECS_ENV,
                    value: bad.to_string(),
                }
            );
        }
    }

    #[test]
    fn builder() {
        let settings =
            Settings::new("rows.json").with_refresh_interval(Duration::from_secs(30));
        assert_eq!(settings.dataset_path, PathBuf::from("rows.json"));
        assert_eq!(settings.refresh_interval, Duration::from_secs(30));
    }
}
