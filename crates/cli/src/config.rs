use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use flashread_core::config::{DEFAULT_HIGHLIGHT_RATIO, DEFAULT_WPF, DEFAULT_WPM};
use flashread_core::ReaderSettings;

use crate::cli::CliArgs;

/// CLI configuration loaded from TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Starting words per minute
    #[serde(default = "default_wpm")]
    pub wpm: u32,

    /// Words per frame
    #[serde(default = "default_wpf")]
    pub wpf: u32,

    /// Where the highlighted character sits, as a fraction of the chunk
    #[serde(default = "default_highlight_ratio")]
    pub highlight_ratio: f64,

    /// wpm change per Up/Down key press
    #[serde(default = "default_wpm_step")]
    pub wpm_step: u32,

    /// Number of progress-bar steps drawn while one chunk is on screen
    #[serde(default = "default_progress_ticks")]
    pub progress_ticks: u32,
}

fn default_wpm() -> u32 {
    DEFAULT_WPM
}

fn default_wpf() -> u32 {
    DEFAULT_WPF
}

fn default_highlight_ratio() -> f64 {
    DEFAULT_HIGHLIGHT_RATIO
}

fn default_wpm_step() -> u32 {
    50
}

fn default_progress_ticks() -> u32 {
    50
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            wpm: default_wpm(),
            wpf: default_wpf(),
            highlight_ratio: default_highlight_ratio(),
            wpm_step: default_wpm_step(),
            progress_ticks: default_progress_ticks(),
        }
    }
}

impl CliConfig {
    /// Return the default config directory path: ~/.config/flashread/
    pub fn default_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("flashread");
        Ok(config_dir)
    }

    /// Return the default config file path.
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    /// Returns default config if the file does not exist; nothing is written.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => match Self::default_config_path() {
                Ok(p) => p,
                Err(e) => {
                    debug!(error = %e, "No config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if config_path.exists() {
            debug!(?config_path, "Loading config");
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config: {}", config_path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", config_path.display()))?;
            Ok(config)
        } else {
            debug!(?config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Resolve the reader settings.
    /// Priority: cli flag > env var > config file > built-in default.
    pub fn resolve_settings(&self, args: &CliArgs) -> Result<ReaderSettings> {
        let mut settings = ReaderSettings {
            wpm: self.wpm,
            wpf: self.wpf,
            highlight_ratio: self.highlight_ratio,
        }
        .overlay_env();

        if let Some(wpm) = args.wpm {
            settings.wpm = wpm;
        }
        if let Some(wpf) = args.wpf {
            settings.wpf = wpf;
        }

        settings.validate().context("invalid reader settings")?;
        Ok(settings)
    }
}
