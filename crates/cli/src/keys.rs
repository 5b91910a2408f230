use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A reader action triggered from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Faster,
    Slower,
    Forward,
    Back,
    Rewind,
    PageForward,
    PageBack,
    /// Jump to the given tenth of the text (0 = start, 9 = 90%).
    SeekTenth(u8),
    MoreWords,
    FewerWords,
    Quit,
}

/// Map a terminal event to a reader command.
pub fn command_for(event: &Event) -> Option<Command> {
    match event {
        Event::Key(key) => command_for_key(key),
        _ => None,
    }
}

fn command_for_key(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
        (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => Some(Command::Quit),
        (_, KeyCode::Char(' ')) => Some(Command::TogglePause),
        (_, KeyCode::Up) => Some(Command::Faster),
        (_, KeyCode::Down) => Some(Command::Slower),
        (_, KeyCode::Right) => Some(Command::Forward),
        (_, KeyCode::Left) => Some(Command::Back),
        (_, KeyCode::Home) => Some(Command::Rewind),
        (_, KeyCode::PageDown) => Some(Command::PageForward),
        (_, KeyCode::PageUp) => Some(Command::PageBack),
        (_, KeyCode::Char(c @ '0'..='9')) => c.to_digit(10).map(|d| Command::SeekTenth(d as u8)),
        (_, KeyCode::Char(']')) => Some(Command::MoreWords),
        (_, KeyCode::Char('[')) => Some(Command::FewerWords),
        _ => None,
    }
}
