use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::feed::DEFAULT_FEED_URL;
use crate::scoring::ScoringConfig;

pub const DEFAULT_FEED_TIMEOUT: &str = "15s";
pub const DEFAULT_AUTO_REFRESH_SECS: u64 = 300;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    /// Seconds between automatic refreshes in the TUI (0 disables)
    #[serde(default = "default_auto_refresh_interval")]
    pub auto_refresh_interval: u64,

    /// Allow switching to mock data from the TUI
    #[serde(default)]
    pub mock_toggle: bool,

    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_auto_refresh_interval() -> u64 {
    DEFAULT_AUTO_REFRESH_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            scoring: None,
            auto_refresh_interval: DEFAULT_AUTO_REFRESH_SECS,
            mock_toggle: false,
            theme: ThemeConfig::Auto,
        }
    }
}

impl Config {
    /// Scoring settings in effect (defaults when the section is absent)
    pub fn effective_scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    #[serde(default = "default_feed_url")]
    pub url: String,

    /// Request timeout as a humantime duration, e.g. "15s"
    #[serde(default = "default_feed_timeout")]
    pub timeout: String,
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

fn default_feed_timeout() -> String {
    DEFAULT_FEED_TIMEOUT.to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            timeout: default_feed_timeout(),
        }
    }
}

impl FeedConfig {
    pub fn timeout_duration(&self) -> Result<Duration, humantime::DurationError> {
        humantime::parse_duration(self.timeout.trim())
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeConfig {
    #[default]
    Auto,
    Dark,
    Light,
}

/// Validate the whole configuration.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let url = config.feed.url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!(
            "feed.url: must start with http:// or https:// (got '{}')",
            config.feed.url
        ));
    }

    match config.feed.timeout_duration() {
        Ok(d) if d.is_zero() => errors.push("feed.timeout: must be greater than zero".to_string()),
        Ok(_) => {}
        Err(e) => errors.push(format!(
            "feed.timeout: invalid duration '{}' - {}",
            config.feed.timeout, e
        )),
    }

    if let Some(ref scoring) = config.scoring {
        if let Err(scoring_errors) = crate::scoring::validate_scoring(scoring) {
            errors.extend(scoring_errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.feed.url, DEFAULT_FEED_URL);
        assert_eq!(config.auto_refresh_interval, 300);
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
feed:
  url: "http://localhost:8080/api/results"
  timeout: "5s"
scoring:
  onsight_bonus: 0.5
  top_climbs: 3
auto_refresh_interval: 60
mock_toggle: true
theme: light
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.feed.url, "http://localhost:8080/api/results");
        assert_eq!(config.feed.timeout_duration().unwrap(), Duration::from_secs(5));
        assert_eq!(config.effective_scoring().top_climbs(), 3);
        assert_eq!(config.effective_scoring().onsight_bonus(), 0.5);
        assert_eq!(config.auto_refresh_interval, 60);
        assert!(config.mock_toggle);
        assert_eq!(config.theme, ThemeConfig::Light);
    }

    #[test]
    fn test_partial_feed_section() {
        let yaml = "feed:\n  timeout: \"30s\"\n";
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.feed.url, DEFAULT_FEED_URL);
        assert_eq!(config.feed.timeout, "30s");
    }

    #[test]
    fn test_unknown_top_level_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("queries: []\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_bad_url() {
        let mut config = Config::default();
        config.feed.url = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("feed.url"));
    }

    #[test]
    fn test_validate_bad_timeout() {
        let mut config = Config::default();
        config.feed.timeout = "soon".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("feed.timeout"));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.feed.timeout = "0s".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("greater than zero"));
    }

    #[test]
    fn test_validate_collects_scoring_errors() {
        let mut config = Config::default();
        config.feed.url = "nope".to_string();
        config.scoring = Some(ScoringConfig::new(-1.0, 0));
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
