//! Pacing loop: shows the current chunk, waits its duration in small
//! progress steps, then advances. Key commands arrive on a channel and are
//! applied between steps.

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use flashread_core::{Cursor, Features, Reader};

use crate::keys::Command;

/// Everything the screen needs to show one chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub features: Features,
    pub position: usize,
    pub total: usize,
    pub wpm: u32,
    pub wpf: u32,
    pub paused: bool,
}

/// Where frames are drawn.
pub trait Screen {
    fn draw_frame(&mut self, frame: &Frame) -> Result<()>;
    fn draw_progress(&mut self, tick: u32, ticks: u32) -> Result<()>;
}

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep timing the current chunk; only the status changed.
    Continue,
    /// Drop the current timing and show the (possibly new) current chunk.
    Redraw,
    Quit,
}

/// Reader plus the cursor and pause state owned by the presentation layer.
pub struct Playback {
    reader: Reader,
    cursor: Cursor,
    paused: bool,
    wpm_step: u32,
}

impl Playback {
    pub fn new(reader: Reader, wpm_step: u32) -> Self {
        let cursor = Cursor::new(reader.len());
        Self {
            reader,
            cursor,
            paused: false,
            wpm_step,
        }
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn reader(&self) -> &Reader {
        &self.reader
    }

    /// The frame for the current position, or `None` for an empty text.
    pub fn frame(&self) -> Option<Frame> {
        let features = self.reader.features_at(self.cursor.position())?;
        let settings = self.reader.settings();
        Some(Frame {
            features,
            position: self.cursor.position(),
            total: self.reader.len(),
            wpm: settings.wpm,
            wpf: settings.wpf,
            paused: self.paused,
        })
    }

    pub fn apply(&mut self, command: Command) -> Outcome {
        debug!(?command, position = self.cursor.position(), "Command");
        match command {
            Command::Quit => Outcome::Quit,
            Command::TogglePause => {
                self.paused = !self.paused;
                Outcome::Redraw
            }
            Command::Faster => {
                self.reader.adjust_wpm(self.wpm_step as i64);
                Outcome::Continue
            }
            Command::Slower => {
                self.reader.adjust_wpm(-(self.wpm_step as i64));
                Outcome::Continue
            }
            Command::Forward => {
                self.cursor.advance();
                Outcome::Redraw
            }
            Command::Back => {
                self.cursor.retreat();
                Outcome::Redraw
            }
            Command::Rewind => {
                self.cursor.rewind();
                Outcome::Redraw
            }
            Command::PageForward => {
                self.cursor.step(self.page_size() as isize);
                Outcome::Redraw
            }
            Command::PageBack => {
                self.cursor.step(-(self.page_size() as isize));
                Outcome::Redraw
            }
            Command::SeekTenth(tenth) => {
                let target = self.cursor.len() * tenth.min(9) as usize / 10;
                self.cursor.seek(target);
                Outcome::Redraw
            }
            Command::MoreWords => self.change_wpf(1),
            Command::FewerWords => self.change_wpf(-1),
        }
    }

    /// A tenth of the chunk list, at least one chunk.
    fn page_size(&self) -> usize {
        (self.cursor.len() / 10).max(1)
    }

    /// Regroup the text with a new wpf, keeping the reading position at the
    /// same relative spot.
    fn change_wpf(&mut self, delta: i64) -> Outcome {
        let current = self.reader.settings().wpf as i64;
        let target = (current + delta).max(1) as u32;
        if target as i64 == current || self.reader.set_wpf(target).is_err() {
            return Outcome::Continue;
        }

        let old_len = self.reader.len();
        let old_pos = self.cursor.position();
        self.reader.rebuild();

        if self.reader.is_empty() {
            // No line has enough tokens for the new wpf; keep the old grouping.
            debug!(wpf = target, "Regrouping would leave nothing to read");
            if self.reader.set_wpf(current as u32).is_ok() {
                self.reader.rebuild();
            }
            return Outcome::Continue;
        }

        let new_len = self.reader.len();
        let new_pos = if old_len == 0 { 0 } else { old_pos * new_len / old_len };
        self.cursor = Cursor::new(new_len);
        self.cursor.seek(new_pos);
        info!(wpf = target, chunks = new_len, "Regrouped text");
        Outcome::Redraw
    }

    /// Called when the current chunk's time is up. After the final chunk the
    /// reader rewinds to the start and pauses.
    pub fn finish_chunk(&mut self) {
        if self.cursor.is_last() {
            info!(chunks = self.reader.len(), "Finished reading");
            self.cursor.rewind();
            self.paused = true;
        } else {
            self.cursor.advance();
        }
    }
}

/// Drive `playback` until a quit command arrives, the command channel
/// closes, or there is nothing to show.
pub async fn run<S: Screen>(
    playback: &mut Playback,
    screen: &mut S,
    mut commands: mpsc::Receiver<Command>,
    ticks: u32,
) -> Result<()> {
    let ticks = ticks.max(1);

    'outer: loop {
        let Some(frame) = playback.frame() else {
            return Ok(());
        };
        screen.draw_frame(&frame)?;

        if frame.paused {
            match commands.recv().await.map(|c| playback.apply(c)) {
                None | Some(Outcome::Quit) => return Ok(()),
                Some(_) => continue 'outer,
            }
        }

        let step = frame.features.duration() / ticks;
        let start = Instant::now();
        let mut tick = 0;
        while tick < ticks {
            let deadline = start + step * (tick + 1);
            tokio::select! {
                _ = sleep_until(deadline) => {
                    tick += 1;
                    screen.draw_progress(tick, ticks)?;
                }
                command = commands.recv() => match command.map(|c| playback.apply(c)) {
                    None | Some(Outcome::Quit) => return Ok(()),
                    Some(Outcome::Redraw) => continue 'outer,
                    Some(Outcome::Continue) => {
                        if let Some(frame) = playback.frame() {
                            screen.draw_frame(&frame)?;
                        }
                    }
                },
            }
        }

        playback.finish_chunk();
    }
}
