use std::{env, path::PathBuf, time::Duration};

use chrono::NaiveDate;

use rotacal_core::calendar::{parse_date_key, ShiftPattern, ShiftScheduler};
use rotacal_core::feeds::{default_sources, parse_sources, FeedSource};
use rotacal_core::serde::parse_time_of_day;
use rotacal_core::settings::NotificationSettings;

use crate::error::{AppError, Result};

const DEFAULT_EPOCH: &str = "2025-10-26";
const DEFAULT_NOTES_PATH: &str = "rotacal-notes.json";
const DEFAULT_PROXY_CACHE_TTL_SECONDS: u64 = 180;
const DEFAULT_CACHE_MAX_ENTRIES: usize = 1_000;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Day index 0 of the shift rotation (default: 2025-10-26)
    pub epoch: NaiveDate,
    /// Shift rotation (default: day, night, split)
    pub pattern: ShiftPattern,
    /// JSON note store (default: "rotacal-notes.json")
    pub notes_path: PathBuf,
    /// RSS proxy cache TTL in seconds (default: 180)
    pub proxy_cache_ttl_seconds: u64,
    /// Maximum number of proxy cache entries (default: 1,000)
    pub cache_max_entries: usize,
    /// Reminder cutoffs used until settings are saved
    pub notifications: NotificationSettings,
    /// News sources (default: the built-in sources)
    pub feeds: Vec<FeedSource>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ROTACAL_EPOCH` - Rotation epoch, `YYYY-MM-DD` (default: 2025-10-26)
    /// - `ROTACAL_PATTERN` - Comma separated shift labels (default: "day,night,split")
    /// - `ROTACAL_NOTES_PATH` - Note store path (default: "rotacal-notes.json")
    /// - `PROXY_CACHE_TTL_SECONDS` - RSS proxy TTL in seconds (default: 180)
    /// - `CACHE_MAX_ENTRIES` - Proxy cache capacity (default: 1,000)
    /// - `NOTIFY_TIME_DAY`, `NOTIFY_TIME_NIGHT`, `NOTIFY_TIME_OFF` - `HH:MM` cutoffs
    /// - `ROTACAL_FEEDS` - `name=url` pairs separated by `;`
    ///
    /// A malformed epoch or pattern is an error; other malformed values fall
    /// back to their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let epoch_raw = lookup("ROTACAL_EPOCH").unwrap_or_else(|| DEFAULT_EPOCH.to_string());
        let epoch = parse_date_key(&epoch_raw)
            .map_err(|e| AppError::Config(format!("ROTACAL_EPOCH: {e}")))?;

        let pattern = match lookup("ROTACAL_PATTERN") {
            Some(raw) => ShiftPattern::parse(&raw)
                .map_err(|e| AppError::Config(format!("ROTACAL_PATTERN: {e}")))?,
            None => ShiftPattern::default(),
        };

        let defaults = NotificationSettings::default();
        let time = |key: &str, default| {
            lookup(key)
                .and_then(|v| parse_time_of_day(&v))
                .unwrap_or(default)
        };
        let notifications = NotificationSettings {
            day: time("NOTIFY_TIME_DAY", defaults.day),
            night: time("NOTIFY_TIME_NIGHT", defaults.night),
            off: time("NOTIFY_TIME_OFF", defaults.off),
        };

        let feeds = match lookup("ROTACAL_FEEDS").map(|raw| parse_sources(&raw)) {
            Some(Ok(sources)) if !sources.is_empty() => sources,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Ignoring ROTACAL_FEEDS");
                default_sources()
            }
            _ => default_sources(),
        };

        Ok(Self {
            epoch,
            pattern,
            notes_path: lookup("ROTACAL_NOTES_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_NOTES_PATH)),
            proxy_cache_ttl_seconds: lookup("PROXY_CACHE_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PROXY_CACHE_TTL_SECONDS),
            cache_max_entries: lookup("CACHE_MAX_ENTRIES")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_CACHE_MAX_ENTRIES),
            notifications,
            feeds,
        })
    }

    /// Get the proxy cache TTL as a Duration.
    pub fn proxy_ttl(&self) -> Duration {
        Duration::from_secs(self.proxy_cache_ttl_seconds)
    }

    pub fn scheduler(&self) -> ShiftScheduler {
        ShiftScheduler::new(self.epoch, self.pattern.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use chrono::NaiveTime;
    use rotacal_core::calendar::ShiftKind;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.epoch, NaiveDate::from_ymd_opt(2025, 10, 26).unwrap());
        assert_eq!(config.pattern, ShiftPattern::default());
        assert_eq!(config.notes_path, PathBuf::from("rotacal-notes.json"));
        assert_eq!(config.proxy_ttl(), Duration::from_secs(180));
        assert_eq!(config.cache_max_entries, 1_000);
        assert_eq!(config.notifications, NotificationSettings::default());
        assert_eq!(config.feeds, default_sources());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("ROTACAL_EPOCH", "2024-01-01"),
            ("ROTACAL_PATTERN", "day, off"),
            ("ROTACAL_NOTES_PATH", "/tmp/notes.json"),
            ("PROXY_CACHE_TTL_SECONDS", "60"),
            ("CACHE_MAX_ENTRIES", "10"),
            ("NOTIFY_TIME_NIGHT", "19:45"),
            ("ROTACAL_FEEDS", "Local=http://localhost/rss"),
        ])
        .unwrap();

        assert_eq!(config.epoch, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(config.pattern.shifts(), &[ShiftKind::Day, ShiftKind::Off]);
        assert_eq!(config.notes_path, PathBuf::from("/tmp/notes.json"));
        assert_eq!(config.proxy_ttl(), Duration::from_secs(60));
        assert_eq!(config.cache_max_entries, 10);
        assert_eq!(
            config.notifications.night,
            NaiveTime::from_hms_opt(19, 45, 0).unwrap()
        );
        assert_eq!(config.notifications.day, NotificationSettings::default().day);
        assert_eq!(
            config.feeds,
            vec![FeedSource::new("Local", "http://localhost/rss")]
        );

        let scheduler = config.scheduler();
        assert_eq!(scheduler.shift_for(config.epoch), ShiftKind::Day);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let config = config_from(&[
            ("PROXY_CACHE_TTL_SECONDS", "soon"),
            ("CACHE_MAX_ENTRIES", "0"),
            ("NOTIFY_TIME_DAY", "25:00"),
            ("ROTACAL_FEEDS", "no-equals-sign"),
        ])
        .unwrap();

        assert_eq!(config.proxy_cache_ttl_seconds, 180);
        assert_eq!(config.cache_max_entries, 1_000);
        assert_eq!(config.notifications.day, NotificationSettings::default().day);
        assert_eq!(config.feeds, default_sources());
    }

    #[test]
    fn test_bad_epoch_is_an_error() {
        let result = config_from(&[("ROTACAL_EPOCH", "26/10/2025")]);
        assert!(matches!(result, Err(AppError::Config(msg)) if msg.starts_with("ROTACAL_EPOCH")));
    }

    #[test]
    fn test_bad_pattern_is_an_error() {
        assert!(matches!(
            config_from(&[("ROTACAL_PATTERN", "day,swing")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("ROTACAL_PATTERN", " , ")]),
            Err(AppError::Config(_))
        ));
    }
}
