//! Application configuration for the command-line front end
//!
//! Built-in defaults, overridden by environment variables, overridden by
//! command-line flags.

use std::env;
use std::path::PathBuf;
use tracing::Level;

use crate::constants::config::*;
use crate::constants::word_bank::DEFAULT_URL;
use crate::word_bank::WordBankSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub word_bank: WordBankSource,
    pub settings_dir: PathBuf,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            word_bank: WordBankSource::Remote(DEFAULT_URL.to_string()),
            settings_dir: default_settings_dir(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// `<platform config dir>/impostor-setup`, or `./impostor-setup` without one
pub fn default_settings_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

impl AppConfig {
    /// Defaults with process environment overrides applied
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults with overrides from an arbitrary lookup (blank values ignored)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(location) = get(ENV_WORD_BANK) {
            config.word_bank = WordBankSource::from_location(&location);
        }
        if let Some(dir) = get(ENV_SETTINGS_DIR) {
            config.settings_dir = PathBuf::from(dir);
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        config
    }

    /// Apply command-line overrides on top
    pub fn with_overrides(
        mut self,
        word_bank: Option<&str>,
        settings_dir: Option<PathBuf>,
        log_level: Option<&str>,
    ) -> Self {
        if let Some(location) = word_bank {
            self.word_bank = WordBankSource::from_location(location);
        }
        if let Some(dir) = settings_dir {
            self.settings_dir = dir;
        }
        if let Some(level) = log_level {
            self.log_level = level.to_string();
        }
        self
    }

    /// Tracing level for `log_level`, unknown names fall back to INFO
    pub fn trace_level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}
