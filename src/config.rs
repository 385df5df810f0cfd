use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::error::{BoardError, Result};
use crate::i18n::Language;

/// Delay between background polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);
/// How long to let the sheet settle after a write before reading it back.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub endpoint: Url,
    pub poll_interval: Duration,
    pub settle_delay: Duration,
    pub language: Language,
}

impl BoardConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            poll_interval: DEFAULT_POLL_INTERVAL,
            settle_delay: DEFAULT_SETTLE_DELAY,
            language: Language::default(),
        }
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Read the configuration from `WARNAMENT_*` environment variables.
    /// Only the endpoint is required.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let endpoint = lookup("WARNAMENT_ENDPOINT").ok_or(BoardError::Config {
            key: "WARNAMENT_ENDPOINT",
            message: "not set".to_string(),
        })?;
        let endpoint = Url::parse(&endpoint).map_err(|e| BoardError::Config {
            key: "WARNAMENT_ENDPOINT",
            message: e.to_string(),
        })?;

        let mut config = Self::new(endpoint);
        if let Some(ms) = lookup("WARNAMENT_POLL_INTERVAL_MS") {
            config.poll_interval = parse_millis("WARNAMENT_POLL_INTERVAL_MS", &ms)?;
        }
        if let Some(ms) = lookup("WARNAMENT_SETTLE_DELAY_MS") {
            config.settle_delay = parse_millis("WARNAMENT_SETTLE_DELAY_MS", &ms)?;
        }
        if let Some(code) = lookup("WARNAMENT_LANGUAGE") {
            config.language = code.trim().parse().map_err(|_| BoardError::Config {
                key: "WARNAMENT_LANGUAGE",
                message: format!("unsupported language {code:?}"),
            })?;
        }
        Ok(config)
    }
}

fn parse_millis(key: &'static str, raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| BoardError::Config {
            key,
            message: e.to_string(),
        })
}
