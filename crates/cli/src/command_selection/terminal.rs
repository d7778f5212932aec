//! Raw terminal access for the interactive list.
//!
//! Raw mode is process-wide state, so it is held by a [`RawModeGuard`] that
//! restores the previous mode exactly once: either through an explicit
//! release or, on any other exit path, when the guard is dropped.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use log::{debug, warn};

use super::types::{InputEvent, KeyEvent};
use fuzzdial_core::config::FALLBACK_TERMINAL_WIDTH;
use fuzzdial_core::error::{Error, Result};

/// Switches a terminal in and out of raw mode.
pub trait ModeControl {
    fn enable(&mut self) -> io::Result<()>;
    fn disable(&mut self) -> io::Result<()>;
}

/// The controlling terminal, as seen by crossterm.
pub struct CrosstermMode;

impl ModeControl for CrosstermMode {
    fn enable(&mut self) -> io::Result<()> {
        enable_raw_mode()
    }

    fn disable(&mut self) -> io::Result<()> {
        disable_raw_mode()
    }
}

/// Holds raw mode for as long as it is alive.
pub struct RawModeGuard<M: ModeControl> {
    mode: M,
    active: bool,
}

impl<M: ModeControl> RawModeGuard<M> {
    /// Enables raw mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TerminalInit`] if the terminal refuses the switch,
    /// e.g. when it is not a TTY.
    pub fn acquire(mut mode: M) -> Result<Self> {
        mode.enable().map_err(Error::TerminalInit)?;
        Ok(Self { mode, active: true })
    }

    /// Restores the previous mode. Releasing twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TerminalRestore`] if the previous mode cannot be restored.
    pub fn release(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }

        self.active = false;
        self.mode.disable().map_err(Error::TerminalRestore)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl<M: ModeControl> Drop for RawModeGuard<M> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!("{e}");
        }
    }
}

/// A source of input events for the list.
pub trait KeySource {
    /// Blocks until the next event the list cares about.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyRead`] if input cannot be read.
    fn read_event(&mut self) -> Result<InputEvent>;
}

/// Maps a crossterm key event to the keys the list understands.
///
/// Returns `None` for key releases and for anything unrecognized.
#[must_use]
pub fn translate_key(key_event: event::KeyEvent) -> Option<KeyEvent> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    let control = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key_event.modifiers.contains(KeyModifiers::ALT);

    match key_event.code {
        KeyCode::Char('c') if control => Some(KeyEvent::CtrlC),
        KeyCode::Char(c) if !control && !alt && (' '..='~').contains(&c) => {
            Some(KeyEvent::Character(c))
        }
        KeyCode::Enter => Some(KeyEvent::Enter),
        KeyCode::Esc => Some(KeyEvent::Escape),
        KeyCode::Backspace => Some(KeyEvent::Delete),
        KeyCode::Up => Some(KeyEvent::ArrowUp),
        KeyCode::Down => Some(KeyEvent::ArrowDown),
        _ => None,
    }
}

/// Current terminal width, or [`FALLBACK_TERMINAL_WIDTH`] when it cannot be
/// determined.
pub fn terminal_width() -> u16 {
    match terminal::size() {
        Ok((width, _)) if width > 0 => width,
        Ok(_) => {
            warn!("Terminal reported zero width, assuming {FALLBACK_TERMINAL_WIDTH} columns");
            FALLBACK_TERMINAL_WIDTH
        }
        Err(e) => {
            warn!("Unable to get terminal width ({e}), assuming {FALLBACK_TERMINAL_WIDTH} columns");
            FALLBACK_TERMINAL_WIDTH
        }
    }
}

/// The controlling terminal in raw mode.
pub struct RawTerminal<M: ModeControl = CrosstermMode> {
    guard: RawModeGuard<M>,
}

impl RawTerminal {
    /// Puts the controlling terminal into raw mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TerminalInit`] if raw mode cannot be enabled.
    pub fn open() -> Result<Self> {
        Self::open_with(CrosstermMode)
    }
}

impl<M: ModeControl> RawTerminal<M> {
    /// Puts a terminal into raw mode through `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TerminalInit`] if raw mode cannot be enabled.
    pub fn open_with(mode: M) -> Result<Self> {
        let guard = RawModeGuard::acquire(mode)?;
        debug!("Terminal switched to raw mode");
        Ok(Self { guard })
    }

    /// Restores the terminal mode that was active before it was opened.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TerminalRestore`] if the mode cannot be restored.
    pub fn close(&mut self) -> Result<()> {
        self.guard.release()
    }
}

/// Keys and resizes from the controlling terminal.
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn read_event(&mut self) -> Result<InputEvent> {
        loop {
            match event::read().map_err(Error::KeyRead)? {
                Event::Key(key_event) => {
                    if let Some(key) = translate_key(key_event) {
                        return Ok(InputEvent::Key(key));
                    }
                    debug!("Dropping unrecognized key: {key_event:?}");
                }
                Event::Resize(width, _) => return Ok(InputEvent::Resize { width }),
                _ => {}
            }
        }
    }
}
