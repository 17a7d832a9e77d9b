use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style::Print};

use crate::error::SimResult;

use super::Frame;

/// Owns the terminal for the lifetime of a run
///
/// Raw mode, alternate screen and a hidden cursor are set up on acquire
/// and undone on drop, including when the run ends with an error.
pub struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    pub fn acquire() -> SimResult<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        Ok(Self { out })
    }

    /// Draw a frame from the top-left corner without clearing the screen
    pub fn draw(&mut self, frame: &Frame) -> SimResult<()> {
        for (row, line) in frame.lines().enumerate() {
            queue!(
                self.out,
                cursor::MoveTo(0, row.min(u16::MAX as usize) as u16),
                Print(line),
                Clear(ClearType::UntilNewLine)
            )?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Sleep for `interval`, returning early with `true` on a quit key
    ///
    /// Other input is swallowed so the frame cadence stays fixed.
    pub fn wait(&mut self, interval: Duration) -> SimResult<bool> {
        let deadline = Instant::now() + interval;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                return Ok(false);
            }
            if let Event::Key(key) = event::read()? {
                if is_quit(&key) {
                    return Ok(true);
                }
            }
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Ctrl-C, `q` or Esc
fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
