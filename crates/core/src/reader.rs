//! Reader facade: owns the loaded lines, the chunk list built from them, and
//! the settings used to compute per-chunk features.
//!
//! The reader never advances on its own. Callers keep a [`Cursor`] (or any
//! index) and pull [`Features`] for the chunk they want to show.
//!
//! [`Cursor`]: crate::cursor::Cursor

use std::path::Path;

use tracing::{debug, info};

use crate::chunker::build_chunks;
use crate::config::{ReaderSettings, MIN_WPM};
use crate::error::{FlashError, Result};
use crate::features::{self, Features};

#[derive(Debug, Clone)]
pub struct Reader {
    lines: Vec<String>,
    settings: ReaderSettings,
    chunks: Vec<String>,
}

/// Split text into lines that keep their `\n` terminator. `\r\n` and a lone
/// `\r` both count as line breaks and are folded to `\n` first.
fn split_lines(text: &str) -> Vec<String> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    text.split_inclusive('\n').map(str::to_string).collect()
}

impl Reader {
    /// Load a text file and build its chunk list.
    ///
    /// Any failure to read the file surfaces as [`FlashError::Io`]. Invalid
    /// UTF-8 is replaced rather than rejected.
    pub fn open(path: impl AsRef<Path>, settings: ReaderSettings) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());
        let reader = Self::from_text(&text, settings)?;
        info!(
            path = %path.display(),
            lines = reader.lines.len(),
            chunks = reader.chunks.len(),
            "Loaded text"
        );
        Ok(reader)
    }

    pub fn from_text(text: &str, settings: ReaderSettings) -> Result<Self> {
        Self::from_lines(split_lines(text), settings)
    }

    pub fn from_lines(lines: Vec<String>, settings: ReaderSettings) -> Result<Self> {
        settings.validate()?;
        let chunks = build_chunks(&lines, settings.wpf as usize);
        Ok(Self {
            lines,
            settings,
            chunks,
        })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Every chunk of the loaded text, in reading order.
    pub fn word_list(&self) -> &[String] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    /// Display features for any chunk under the current settings.
    pub fn features(&self, chunk: &str) -> Features {
        features::extract(chunk, &self.settings)
    }

    /// The chunk at `index`; past the end this is the final chunk.
    pub fn chunk_at(&self, index: usize) -> Option<&str> {
        self.chunks
            .get(index)
            .or_else(|| self.chunks.last())
            .map(String::as_str)
    }

    pub fn features_at(&self, index: usize) -> Option<Features> {
        self.chunk_at(index).map(|chunk| self.features(chunk))
    }

    pub fn wpm(&self) -> u32 {
        self.settings.wpm
    }

    pub fn set_wpm(&mut self, wpm: u32) -> Result<()> {
        if wpm == 0 {
            return Err(FlashError::InvalidConfig("wpm must be greater than 0".into()));
        }
        debug!(from = self.settings.wpm, to = wpm, "wpm changed");
        self.settings.wpm = wpm;
        Ok(())
    }

    /// Shift wpm by `delta`, never dropping below [`MIN_WPM`]. Returns the new value.
    pub fn adjust_wpm(&mut self, delta: i64) -> u32 {
        let target = (self.settings.wpm as i64 + delta).clamp(MIN_WPM as i64, u32::MAX as i64);
        self.settings.wpm = target as u32;
        self.settings.wpm
    }

    /// Store a new wpf. The chunk list keeps its old grouping until
    /// [`Reader::rebuild`] is called.
    pub fn set_wpf(&mut self, wpf: u32) -> Result<()> {
        if wpf == 0 {
            return Err(FlashError::InvalidConfig("wpf must be greater than 0".into()));
        }
        self.settings.wpf = wpf;
        Ok(())
    }

    /// Rebuild the chunk list from the loaded lines with the current wpf.
    pub fn rebuild(&mut self) {
        self.chunks = build_chunks(&self.lines, self.settings.wpf as usize);
    }
}
