use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event, execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, Stdout, Write};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::keys::{command_for, Command};
use crate::playback::{Frame, Screen};

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const TEXT: Color = Color::White;
    const HIGHLIGHT: Color = Color::DarkRed;
    const PROGRESS: Color = Color::Cyan;
    const PAUSED: Color = Color::Yellow;
    const DIM: Color = Color::DarkGrey;
    const HEADER: Color = Color::Magenta;
}

const HELP: &str =
    "space play/pause  left/right move  pgup/pgdn/0-9 jump  up/down speed  [/] words  home restart  q quit";
const MAX_BAR_WIDTH: usize = 50;

/// Full-screen reading view. Raw mode and the alternate screen are active
/// for as long as this value lives.
pub struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    /// Switch the terminal into the reading view.
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        leave_raw_mode_on_error(execute!(stdout, EnterAlternateScreen, Hide))?;
        debug!("Entered reading view");
        Ok(Self { stdout })
    }

    fn size() -> (u16, u16) {
        terminal::size().unwrap_or((80, 24))
    }

    fn chunk_row(rows: u16) -> u16 {
        rows / 2
    }

    fn progress_row(rows: u16) -> u16 {
        Self::chunk_row(rows) + 2
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        execute!(self.stdout, Show, LeaveAlternateScreen).ok();
        disable_raw_mode().ok();
    }
}

impl Screen for Terminal {
    fn draw_frame(&mut self, frame: &Frame) -> Result<()> {
        let (cols, rows) = Self::size();
        let text_len = frame.features.text.chars().count();

        queue!(
            self.stdout,
            Clear(ClearType::All),
            MoveTo(0, 0),
            SetForegroundColor(Colors::HEADER),
            Print("flashread"),
            ResetColor,
            MoveTo(centered_column(cols, text_len), Self::chunk_row(rows)),
        )?;

        match frame.features.split_highlight() {
            Some((before, pivot, after)) => queue!(
                self.stdout,
                SetForegroundColor(Colors::TEXT),
                Print(before),
                SetForegroundColor(Colors::HIGHLIGHT),
                SetAttribute(Attribute::Bold),
                Print(pivot),
                SetAttribute(Attribute::Reset),
                SetForegroundColor(Colors::TEXT),
                Print(after),
                ResetColor,
            )?,
            None => queue!(
                self.stdout,
                SetForegroundColor(Colors::TEXT),
                Print(&frame.features.text),
                ResetColor,
            )?,
        }

        let status_color = if frame.paused { Colors::PAUSED } else { Colors::DIM };
        queue!(
            self.stdout,
            MoveTo(0, rows.saturating_sub(2)),
            SetForegroundColor(status_color),
            Print(status_line(frame)),
            MoveTo(0, rows.saturating_sub(1)),
            SetForegroundColor(Colors::DIM),
            Print(HELP),
            ResetColor,
        )?;
        self.stdout.flush()?;
        Ok(())
    }

    fn draw_progress(&mut self, tick: u32, ticks: u32) -> Result<()> {
        let (cols, rows) = Self::size();
        let width = (cols as usize).saturating_sub(4).min(MAX_BAR_WIDTH);
        queue!(
            self.stdout,
            MoveTo(centered_column(cols, width), Self::progress_row(rows)),
            SetForegroundColor(Colors::PROGRESS),
            Print(progress_bar(tick, ticks, width)),
            ResetColor,
        )?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Raw mode is switched on before `Terminal` exists, so a failed setup step
/// has to switch it off again itself.
fn leave_raw_mode_on_error<T>(result: io::Result<T>) -> io::Result<T> {
    if result.is_err() {
        disable_raw_mode().ok();
    }
    result
}

/// Column where text of `len` chars starts when centered in `cols`.
fn centered_column(cols: u16, len: usize) -> u16 {
    let len = len.min(cols as usize) as u16;
    (cols - len) / 2
}

fn progress_bar(tick: u32, ticks: u32, width: usize) -> String {
    let ticks = ticks.max(1);
    let filled = (tick.min(ticks) as usize * width) / ticks as usize;
    format!("{}{}", "=".repeat(filled), " ".repeat(width - filled))
}

fn status_line(frame: &Frame) -> String {
    let state = if frame.paused { "paused" } else { "reading" };
    format!(
        "wpm: {} | wpf: {} | {}/{} | {}",
        frame.wpm,
        frame.wpf,
        frame.position + 1,
        frame.total,
        state
    )
}

/// Forward key presses to `tx` from a detached thread until quit is
/// pressed, the receiver goes away, or reading events fails. A thread still
/// blocked in `event::read` ends with the process.
pub fn spawn_key_reader(tx: mpsc::Sender<Command>) {
    std::thread::spawn(move || loop {
        let ev = match event::read() {
            Ok(ev) => ev,
            Err(e) => {
                warn!(error = %e, "Failed to read terminal event");
                break;
            }
        };
        let Some(command) = command_for(&ev) else {
            continue;
        };
        if tx.blocking_send(command).is_err() || command == Command::Quit {
            break;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashread_core::Features;

    fn frame(paused: bool) -> Frame {
        Frame {
            features: Features {
                text: "hello".into(),
                highlight: 2,
                duration_secs: 0.4,
            },
            position: 4,
            total: 10,
            wpm: 300,
            wpf: 1,
            paused,
        }
    }

    #[test]
    fn test_failed_setup_passes_error_through() {
        let err = leave_raw_mode_on_error::<()>(Err(io::Error::other("no tty"))).unwrap_err();
        assert_eq!(err.to_string(), "no tty");
        assert_eq!(leave_raw_mode_on_error(Ok(7)).unwrap(), 7);
    }

    #[test]
    fn test_centered_column() {
        assert_eq!(centered_column(80, 10), 35);
        assert_eq!(centered_column(10, 40), 0);
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 5, 10), "          ");
        assert_eq!(progress_bar(2, 5, 10), "====      ");
        assert_eq!(progress_bar(5, 5, 10), "==========");
        assert_eq!(progress_bar(9, 5, 10), "==========");
        assert_eq!(progress_bar(1, 0, 4), "====");
    }

    #[test]
    fn test_status_line() {
        assert_eq!(status_line(&frame(false)), "wpm: 300 | wpf: 1 | 5/10 | reading");
        assert!(status_line(&frame(true)).ends_with("paused"));
    }
}
