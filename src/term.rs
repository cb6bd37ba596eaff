use std::io::{Stdout, Write, stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll, read};
use tracing::warn;

/// Non-blocking source of single key presses.
pub trait InputSource {
    fn poll_key(&mut self) -> Option<char>;
}

/// Full-screen text output.
pub trait Renderer {
    /// Clears the screen and writes `rows` top to bottom.
    fn draw(&mut self, rows: &[String]) -> Result<()>;
}

pub struct TermManager {
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), active: false }
    }

    /// Raw mode, alternate screen, hidden cursor. Each step is best-effort.
    pub fn setup(&mut self) {
        if let Err(e) = execute!(self.stdout, EnterAlternateScreen) {
            warn!(error = %e, "could not enter alternate screen");
        }
        if let Err(e) = terminal::enable_raw_mode() {
            warn!(error = %e, "could not enable raw mode");
        }
        if let Err(e) = execute!(self.stdout, cursor::Hide, cursor::DisableBlinking) {
            warn!(error = %e, "could not hide cursor");
        }

        self.active = true;
    }

    pub fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        if let Err(e) = terminal::disable_raw_mode() {
            warn!(error = %e, "could not disable raw mode");
        }
        if let Err(e) = execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen) {
            warn!(error = %e, "could not restore screen");
        }
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        self.restore();
    }
}

impl InputSource for TermManager {
    fn poll_key(&mut self) -> Option<char> {
        match poll(Duration::ZERO) {
            Ok(true) => {},
            Ok(false) => return None,
            Err(e) => {
                warn!(error = %e, "polling for input failed");
                return None;
            },
        }

        match read() {
            Ok(Event::Key(ev)) => key_to_char(&ev),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "reading input failed");
                None
            },
        }
    }
}

impl Renderer for TermManager {
    fn draw(&mut self, rows: &[String]) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;

        // Raw mode disables newline translation, so every row is positioned explicitly.
        for (y, row) in rows.iter().enumerate() {
            let y = u16::try_from(y)?;
            queue!(self.stdout, cursor::MoveTo(0, y), style::Print(row))?;
        }

        self.stdout.flush()?;
        Ok(())
    }
}

/// Translates a key press into the character the game understands.
/// Arrows become WASD and Ctrl+C becomes `q`, since raw mode swallows the signal.
fn key_to_char(ev: &KeyEvent) -> Option<char> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }

    match ev.code {
        KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Some('q'),
        KeyCode::Char(c) => Some(c),
        KeyCode::Up => Some('w'),
        KeyCode::Left => Some('a'),
        KeyCode::Down => Some('s'),
        KeyCode::Right => Some('d'),
        _ => None,
    }
}
