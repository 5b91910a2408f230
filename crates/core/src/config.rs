use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FlashError, Result};

pub const DEFAULT_WPM: u32 = 300;
pub const DEFAULT_WPF: u32 = 1;
pub const DEFAULT_HIGHLIGHT_RATIO: f64 = 0.25;

/// Lowest speed `Reader::adjust_wpm` will settle on.
pub const MIN_WPM: u32 = 1;

pub const ENV_WPM: &str = "FLASHREAD_WPM";
pub const ENV_WPF: &str = "FLASHREAD_WPF";
pub const ENV_HIGHLIGHT_RATIO: &str = "FLASHREAD_HIGHLIGHT_RATIO";

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = env_opt(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparsable environment value");
            None
        }
    }
}

/// Reading pace and chunking settings shared by every reader operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReaderSettings {
    /// Words per minute. Read at feature time, so changes apply immediately.
    pub wpm: u32,
    /// Words per frame. Only applied when the chunk list is (re)built.
    pub wpf: u32,
    /// Fraction of the chunk (capped at the pivot window) where the
    /// highlighted character sits.
    pub highlight_ratio: f64,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            wpm: DEFAULT_WPM,
            wpf: DEFAULT_WPF,
            highlight_ratio: DEFAULT_HIGHLIGHT_RATIO,
        }
    }
}

impl ReaderSettings {
    /// Build validated settings with the default highlight ratio.
    pub fn new(wpm: u32, wpf: u32) -> Result<Self> {
        let settings = Self {
            wpm,
            wpf,
            ..Self::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_highlight_ratio(mut self, ratio: f64) -> Result<Self> {
        self.highlight_ratio = ratio;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.wpm == 0 {
            return Err(FlashError::InvalidConfig("wpm must be greater than 0".into()));
        }
        if self.wpf == 0 {
            return Err(FlashError::InvalidConfig("wpf must be greater than 0".into()));
        }
        if !(self.highlight_ratio > 0.0 && self.highlight_ratio < 1.0) {
            return Err(FlashError::InvalidConfig(format!(
                "highlight ratio must be between 0 and 1 (exclusive), got {}",
                self.highlight_ratio
            )));
        }
        Ok(())
    }

    /// Defaults overlaid with environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self::default().overlay_env()
    }

    /// Replace each field that has a parsable `FLASHREAD_*` variable set.
    /// The result is not validated.
    pub fn overlay_env(self) -> Self {
        Self {
            wpm: env_parse(ENV_WPM).unwrap_or(self.wpm),
            wpf: env_parse(ENV_WPF).unwrap_or(self.wpf),
            highlight_ratio: env_parse(ENV_HIGHLIGHT_RATIO).unwrap_or(self.highlight_ratio),
        }
    }

    /// Print the effective settings for startup logs.
    pub fn log_summary(&self) {
        tracing::info!(
            wpm = self.wpm,
            wpf = self.wpf,
            highlight_ratio = self.highlight_ratio,
            "Reader settings"
        );
    }
}
