//! Inline frame assembly for a raw terminal.
//!
//! The list does not own the whole screen, it draws below the shell prompt.
//! Terminals have no scrollable sub-regions, so every redraw returns to the
//! top of the previous frame with a single relative "move up N lines"
//! instruction. [`ScreenBuilder`] tracks how many lines (explicit breaks and
//! wraps at the terminal width) were emitted since the last save point to
//! make that possible, and hands out each frame as one string so the frame is
//! written in one go.

use crossterm::cursor::{MoveDown, MoveRight, MoveToColumn, MoveUp};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use super::colors::{queue_reset, StyleIntent};
use fuzzdial_core::error::Result;

/// A relative cursor movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorAction {
    LineStart,
    Up(u16),
    Down(u16),
    Right(u16),
}

/// Advances `column` over `text` the way a terminal `width` columns wide
/// would, returning how many times the cursor moved to a new line.
///
/// Escape sequences are skipped up to their terminating letter. A width of
/// zero disables wrapping.
pub fn count_line_breaks(text: &str, width: usize, column: &mut usize) -> usize {
    let mut breaks = 0;
    let mut in_escape = false;

    for c in text.chars() {
        if in_escape {
            in_escape = !c.is_ascii_alphabetic();
            continue;
        }

        match c {
            '\x1b' => in_escape = true,
            '\n' => {
                breaks += 1;
                *column = 0;
            }
            '\r' => *column = 0,
            c if c.is_control() => {}
            _ => {
                // Terminals defer the wrap until the next printable character.
                if width > 0 && *column >= width {
                    breaks += 1;
                    *column = 0;
                }
                *column += 1;
            }
        }
    }

    breaks
}

/// Builds inline UIs for raw terminals.
#[derive(Debug)]
pub struct ScreenBuilder {
    buffer: Vec<u8>,
    width: u16,
    column: usize,
    lines_since_save: usize,
    save_column: usize,
}

impl ScreenBuilder {
    pub fn new(width: u16) -> Self {
        Self {
            buffer: Vec::new(),
            width,
            column: 0,
            lines_since_save: 0,
            save_column: 0,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    /// Lines moved down since the last save point.
    pub fn lines_since_save(&self) -> usize {
        self.lines_since_save
    }

    /// Returns everything queued so far and empties the buffer.
    pub fn commit(&mut self) -> String {
        let output = String::from_utf8_lossy(&self.buffer).into_owned();
        self.buffer.clear();
        output
    }

    /// Adds text to the current line.
    pub fn write_text(&mut self, text: &str) -> Result<&mut Self> {
        self.lines_since_save += count_line_breaks(text, self.width.into(), &mut self.column);
        queue!(self.buffer, Print(text))?;
        Ok(self)
    }

    /// Adds text in the style of `intent`, returning to the default style after.
    pub fn write_styled(&mut self, text: &str, intent: StyleIntent) -> Result<&mut Self> {
        if intent == StyleIntent::Plain {
            return self.write_text(text);
        }

        intent.queue_style(&mut self.buffer)?;
        self.write_text(text)?;
        queue_reset(&mut self.buffer)?;
        Ok(self)
    }

    /// Clears the rest of the current line and moves to the start of the next.
    pub fn new_line(&mut self) -> Result<&mut Self> {
        self.clear_to_line_end()?;
        queue!(self.buffer, Print("\r\n"))?;
        self.lines_since_save += 1;
        self.column = 0;
        Ok(self)
    }

    /// Clears any subsequent text on the current line.
    pub fn clear_to_line_end(&mut self) -> Result<&mut Self> {
        queue!(self.buffer, Clear(ClearType::UntilNewLine))?;
        Ok(self)
    }

    /// Clears everything from the cursor to the bottom of the terminal.
    pub fn clear_to_screen_end(&mut self) -> Result<&mut Self> {
        queue!(self.buffer, Clear(ClearType::FromCursorDown))?;
        Ok(self)
    }

    /// Remembers the current position for [`ScreenBuilder::reset_cursor`].
    /// The position is a line of output, not a screen row, so it survives
    /// the terminal scrolling.
    pub fn save_cursor(&mut self) -> &mut Self {
        self.lines_since_save = 0;
        self.save_column = self.column;
        self
    }

    /// Moves the cursor back to the last save point.
    pub fn reset_cursor(&mut self) -> Result<&mut Self> {
        let lines = u16::try_from(self.lines_since_save).unwrap_or(u16::MAX);
        let save_column = u16::try_from(self.save_column).unwrap_or(u16::MAX);

        let mut actions = vec![CursorAction::LineStart];
        if lines > 0 {
            actions.push(CursorAction::Up(lines));
        }
        if save_column > 0 {
            actions.push(CursorAction::Right(save_column));
        }

        self.move_cursor(&actions)
    }

    /// Moves the cursor as described by `actions`, in order.
    pub fn move_cursor(&mut self, actions: &[CursorAction]) -> Result<&mut Self> {
        for action in actions {
            match *action {
                CursorAction::LineStart => {
                    queue!(self.buffer, MoveToColumn(0))?;
                    self.column = 0;
                }
                CursorAction::Up(lines) => {
                    queue!(self.buffer, MoveUp(lines))?;
                    self.lines_since_save = self.lines_since_save.saturating_sub(lines.into());
                }
                CursorAction::Down(lines) => {
                    queue!(self.buffer, MoveDown(lines))?;
                    self.lines_since_save += usize::from(lines);
                }
                CursorAction::Right(columns) => {
                    queue!(self.buffer, MoveRight(columns))?;
                    self.column += usize::from(columns);
                }
            }
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_line_breaks_empty() {
        let mut column = 0;
        assert_eq!(count_line_breaks("", 100, &mut column), 0);
        assert_eq!(column, 0);
    }

    #[test]
    fn test_count_line_breaks_single_line() {
        let mut column = 0;
        assert_eq!(count_line_breaks("first line", 100, &mut column), 0);
        assert_eq!(column, 10);
    }

    #[test]
    fn test_count_line_breaks_multi_line() {
        let mut column = 0;
        let text = "first line\nsecond line\nthird line";
        assert_eq!(count_line_breaks(text, 100, &mut column), 2);
        assert_eq!(column, 10);
    }

    #[test]
    fn test_count_line_breaks_ignores_escape_sequences() {
        let mut column = 0;
        let text = "\x1b[1m\x1b[39mfirst\x1b[0m line\x1b[K\r\n\x1b[90mthird";
        assert_eq!(count_line_breaks(text, 10, &mut column), 1);
        assert_eq!(column, 5);
    }

    #[test]
    fn test_count_line_breaks_wraps_at_width() {
        let mut column = 0;
        assert_eq!(count_line_breaks(&"x".repeat(12), 5, &mut column), 2);
        assert_eq!(column, 2);
    }

    #[test]
    fn test_count_line_breaks_full_line_then_newline() {
        let mut column = 0;
        assert_eq!(count_line_breaks(&"x".repeat(10), 5, &mut column), 1);
        assert_eq!(count_line_breaks("\r\n", 5, &mut column), 1);
    }

    #[test]
    fn test_count_line_breaks_continues_from_column() {
        let mut column = 8;
        assert_eq!(count_line_breaks("abc", 10, &mut column), 1);
        assert_eq!(column, 1);
    }

    #[test]
    fn test_commit_empty_twice() {
        let mut builder = ScreenBuilder::new(80);
        assert_eq!(builder.commit(), "");
        assert_eq!(builder.commit(), "");
    }

    #[test]
    fn test_commit_clears_buffer() {
        let mut builder = ScreenBuilder::new(80);
        builder.write_text("hello").unwrap();
        assert_eq!(builder.commit(), "hello");
        assert_eq!(builder.commit(), "");
    }

    #[test]
    fn test_new_line_clears_and_returns_carriage() {
        let mut builder = ScreenBuilder::new(80);
        builder.write_text("a").unwrap().new_line().unwrap();
        assert_eq!(builder.commit(), "a\x1b[K\r\n");
        assert_eq!(builder.lines_since_save(), 1);
    }

    #[test]
    fn test_reset_cursor_moves_up_once() {
        let mut builder = ScreenBuilder::new(80);
        builder.save_cursor();
        builder
            .write_text("query")
            .unwrap()
            .new_line()
            .unwrap()
            .write_text("row")
            .unwrap()
            .new_line()
            .unwrap()
            .write_text("row")
            .unwrap();
        builder.commit();

        builder.reset_cursor().unwrap();
        assert_eq!(builder.commit(), "\x1b[1G\x1b[2A");
        assert_eq!(builder.lines_since_save(), 0);
    }

    #[test]
    fn test_reset_cursor_counts_wrapped_lines() {
        let mut builder = ScreenBuilder::new(10);
        builder.save_cursor();
        builder.write_text(&"x".repeat(25)).unwrap();
        builder.commit();

        builder.reset_cursor().unwrap();
        assert_eq!(builder.commit(), "\x1b[1G\x1b[2A");
    }

    #[test]
    fn test_styles_are_not_counted() {
        let mut builder = ScreenBuilder::new(4);
        builder.save_cursor();
        builder
            .write_styled("abcd", StyleIntent::Highlight)
            .unwrap()
            .write_styled("", StyleIntent::Emphasis)
            .unwrap();
        assert_eq!(builder.lines_since_save(), 0);

        builder.write_text("e").unwrap();
        assert_eq!(builder.lines_since_save(), 1);
    }

    #[test]
    fn test_reset_cursor_restores_saved_column() {
        let mut builder = ScreenBuilder::new(80);
        builder.write_text("> ").unwrap();
        builder.save_cursor();
        builder.write_text("go").unwrap().new_line().unwrap();
        builder.commit();

        builder.reset_cursor().unwrap();
        assert_eq!(builder.commit(), "\x1b[1G\x1b[1A\x1b[2C");
    }

    #[test]
    fn test_clear_commands() {
        let mut builder = ScreenBuilder::new(80);
        builder
            .clear_to_line_end()
            .unwrap()
            .clear_to_screen_end()
            .unwrap();
        assert_eq!(builder.commit(), "\x1b[K\x1b[J");
    }

    #[test]
    fn test_moving_down_is_undone_by_reset() {
        let mut builder = ScreenBuilder::new(80);
        builder.save_cursor();
        builder
            .move_cursor(&[CursorAction::Down(2), CursorAction::Right(3)])
            .unwrap();
        assert_eq!(builder.commit(), "\x1b[2B\x1b[3C");
        assert_eq!(builder.lines_since_save(), 2);

        builder.reset_cursor().unwrap();
        assert_eq!(builder.commit(), "\x1b[1G\x1b[2A");
    }

    #[test]
    fn test_reset_cursor_without_lines_only_returns_to_line_start() {
        let mut builder = ScreenBuilder::new(80);
        builder.reset_cursor().unwrap();
        assert_eq!(builder.commit(), "\x1b[1G");
    }
}
