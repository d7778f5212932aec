use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::Color::{DarkBlue, Green, Reset, Yellow};
use crossterm::style::{Attribute, SetAttribute, SetBackgroundColor, SetForegroundColor};

/// What a piece of text means on screen. Each intent has one fixed style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleIntent {
    /// Matched characters and invalid query text
    Highlight,
    /// The selected row
    Emphasis,
    Plain,
}

impl StyleIntent {
    /// Queues the escape codes that switch to this intent's style.
    pub fn queue_style<W: Write>(self, writer: &mut W) -> io::Result<()> {
        match self {
            StyleIntent::Highlight => {
                queue!(writer, SetAttribute(Attribute::Bold), SetForegroundColor(Green))
            }
            StyleIntent::Emphasis => queue!(
                writer,
                SetAttribute(Attribute::Bold),
                SetBackgroundColor(DarkBlue),
                SetForegroundColor(Yellow),
            ),
            StyleIntent::Plain => Ok(()),
        }
    }
}

/// Queues the escape codes that return to the terminal's default style.
pub fn queue_reset<W: Write>(writer: &mut W) -> io::Result<()> {
    queue!(
        writer,
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(intent: StyleIntent) -> String {
        let mut buffer = Vec::new();
        intent.queue_style(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_plain_queues_nothing() {
        assert!(styled(StyleIntent::Plain).is_empty());
    }

    #[test]
    fn test_highlight_and_emphasis_differ() {
        let highlight = styled(StyleIntent::Highlight);
        let emphasis = styled(StyleIntent::Emphasis);
        assert!(highlight.starts_with('\x1b'));
        assert!(emphasis.starts_with('\x1b'));
        assert_ne!(highlight, emphasis);
    }

    #[test]
    fn test_reset_starts_with_attribute_reset() {
        let mut buffer = Vec::new();
        queue_reset(&mut buffer).unwrap();
        let reset = String::from_utf8(buffer).unwrap();
        assert!(reset.starts_with("\x1b[0m"));
    }
}
