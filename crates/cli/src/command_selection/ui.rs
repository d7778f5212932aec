use std::io::{self, Write};

use log::{debug, info, warn};

use super::colors::StyleIntent;
use super::screen::{count_line_breaks, CursorAction, ScreenBuilder};
use super::terminal::{terminal_width, KeySource, ModeControl, RawTerminal, TerminalKeys};
use super::types::{Action, InputEvent, ListOptions, ListOutcome, Mode, UiState};
use fuzzdial_core::corpus::{Corpus, DisplayField, ListItem};
use fuzzdial_core::error::{Error, Result};
use fuzzdial_core::query::Query;

const FIELD_SEPARATOR: &str = "  ";
const INVALID_QUERY_TAG: &str = "  (invalid query)";
const NO_MATCHES: &str = "No matching commands!";

/// Splits a field into runs of plain and highlighted text.
///
/// Spans that overlap an earlier span, run past the end of the content or do
/// not fall on character boundaries are clipped or skipped.
fn highlight_segments(field: &DisplayField) -> Vec<(&str, bool)> {
    let content = field.content.as_str();
    let mut segments = Vec::new();
    let mut cursor = 0;

    for span in &field.highlights {
        let start = span.start.max(cursor).min(content.len());
        let end = span.end().min(content.len());
        if start >= end || !content.is_char_boundary(start) || !content.is_char_boundary(end) {
            continue;
        }

        if start > cursor {
            segments.push((&content[cursor..start], false));
        }
        segments.push((&content[start..end], true));
        cursor = end;
    }

    if cursor < content.len() {
        segments.push((&content[cursor..], false));
    }

    segments
}

/// Moves from the start of the prompt line to just after the query, on
/// whichever row the query wrapped to.
fn query_end_cursor(prompt: &str, query: &str, width: u16) -> Vec<CursorAction> {
    let width = usize::from(width);
    let mut column = 0;
    let mut rows = count_line_breaks(prompt, width, &mut column)
        + count_line_breaks(query, width, &mut column);

    // The counter always follows the query, so a pending wrap lands on a real row.
    if width > 0 && column >= width {
        rows += 1;
        column = 0;
    }

    let mut actions = Vec::new();
    if rows > 0 {
        actions.push(CursorAction::Down(u16::try_from(rows).unwrap_or(u16::MAX)));
    }
    if column > 0 {
        actions.push(CursorAction::Right(u16::try_from(column).unwrap_or(u16::MAX)));
    }
    actions
}

fn write_item<P>(screen: &mut ScreenBuilder, item: &ListItem<P>, selected: bool) -> Result<()> {
    let (marker, base) = if selected {
        ("> ", StyleIntent::Emphasis)
    } else {
        ("  ", StyleIntent::Plain)
    };

    screen.write_styled(marker, base)?;
    for (n, field) in item.fields.iter().enumerate() {
        if n > 0 {
            screen.write_styled(FIELD_SEPARATOR, base)?;
        }
        for (text, highlighted) in highlight_segments(field) {
            let intent = if highlighted {
                StyleIntent::Highlight
            } else {
                base
            };
            screen.write_styled(text, intent)?;
        }
    }

    Ok(())
}

/// Drives one interactive list session over a corpus.
pub struct ListController<'a, C: Corpus> {
    corpus: &'a C,
    state: UiState,
    items: Vec<ListItem<C::Payload>>,
    screen: ScreenBuilder,
}

impl<'a, C: Corpus> ListController<'a, C> {
    /// Creates a controller and runs the initial search.
    ///
    /// # Errors
    ///
    /// Returns any unrecoverable error from the corpus. A rejected initial
    /// query only marks the query as invalid.
    pub fn new(corpus: &'a C, options: &ListOptions, width: u16) -> Result<Self> {
        let mut controller = Self {
            corpus,
            state: UiState::new(options),
            items: Vec::new(),
            screen: ScreenBuilder::new(width),
        };
        controller.refresh()?;
        Ok(controller)
    }

    /// Re-runs the search for the current query. A rejected query keeps the
    /// previous results and viewport, and so does a result set of unchanged
    /// size.
    fn refresh(&mut self) -> Result<()> {
        let query = Query::parse(&self.state.query_text);

        match self.corpus.search(&query) {
            Ok(items) => {
                let previous_count = self.items.len();
                self.items = items;
                self.state.invalid_query = false;
                if self.items.len() != previous_count {
                    self.state.viewport.reclamp(self.items.len());
                }
            }
            Err(e) if e.is_recoverable() => {
                debug!("Keeping previous results: {e}");
                self.state.invalid_query = true;
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }

    /// Runs the key loop until a selection is made or the list is cancelled.
    ///
    /// The UI area is cleared before returning an outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyRead`] when input fails, [`Error::Stdio`] when a
    /// frame cannot be written and any unrecoverable corpus error.
    pub fn run<K: KeySource, W: Write>(
        &mut self,
        keys: &mut K,
        out: &mut W,
    ) -> Result<ListOutcome<C::Payload>> {
        self.draw(out)?;

        loop {
            let key = match keys.read_event()? {
                InputEvent::Resize { width } => {
                    debug!("Terminal resized to {width} columns");
                    self.screen.set_width(width);
                    self.draw(out)?;
                    continue;
                }
                InputEvent::Key(key) => key,
            };

            match self.state.handle_key(key, self.items.len()) {
                Action::Ignore => {}
                Action::Redraw => self.draw(out)?,
                Action::Research => {
                    self.refresh()?;
                    self.draw(out)?;
                }
                Action::Confirm => {
                    if self.items.is_empty() {
                        continue;
                    }

                    let index = self.state.viewport.selected_index;
                    if index >= self.items.len() {
                        return Err(Error::SelectionOutOfRange {
                            index,
                            len: self.items.len(),
                        });
                    }

                    self.clear(out)?;
                    return Ok(ListOutcome::Selected(self.items.swap_remove(index).payload));
                }
                Action::Cancel => {
                    self.clear(out)?;
                    return Ok(ListOutcome::Cancelled);
                }
            }
        }
    }

    /// Erases everything the list has drawn.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Stdio`] if the output cannot be written.
    pub fn clear<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.screen.reset_cursor()?.clear_to_screen_end()?;
        out.write_all(self.screen.commit().as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn draw<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Self {
            state,
            items,
            screen,
            ..
        } = self;

        screen.reset_cursor()?;
        screen.save_cursor();

        let prompt = match state.mode {
            Mode::Insert => "> ",
            Mode::Normal => ": ",
        };
        screen.write_text(prompt)?;
        if state.invalid_query {
            screen
                .write_styled(&state.query_text, StyleIntent::Highlight)?
                .write_text(INVALID_QUERY_TAG)?;
        } else {
            screen.write_text(&state.query_text)?;
        }

        let count = items.len();
        let selected = state.viewport.selected_index;
        let position = if count == 0 { 0 } else { selected + 1 };
        screen.write_text(&format!("  {position}/{count}"))?;

        if count == 0 {
            screen.new_line()?.write_text(NO_MATCHES)?;
        }
        for index in state.viewport.visible_range(count) {
            screen.new_line()?;
            write_item(screen, &items[index], index == selected)?;
        }

        let park = query_end_cursor(prompt, &state.query_text, screen.width());
        screen
            .clear_to_line_end()?
            .clear_to_screen_end()?
            .reset_cursor()?
            .move_cursor(&park)?;

        out.write_all(screen.commit().as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Shows the interactive list for `corpus` on stderr and waits for the user.
///
/// The terminal is in raw mode only while the list runs and is restored
/// before this returns, whatever the outcome.
///
/// # Errors
///
/// Returns [`Error::TerminalInit`] if the terminal cannot enter raw mode,
/// [`Error::TerminalRestore`] if it cannot leave it, and any error from
/// [`ListController::run`].
pub fn run_list<C: Corpus>(corpus: &C, options: &ListOptions) -> Result<ListOutcome<C::Payload>> {
    let width = terminal_width();
    let terminal = RawTerminal::open()?;
    run_list_with(
        corpus,
        options,
        width,
        terminal,
        &mut TerminalKeys,
        &mut io::stderr(),
    )
}

/// Runs a list session on an already opened terminal, then closes it.
///
/// The UI area is cleared before the terminal mode is restored, on errors as
/// well as on a selection or cancellation.
///
/// # Errors
///
/// Returns the first error from the session, and otherwise
/// [`Error::TerminalRestore`] if the mode cannot be restored.
pub fn run_list_with<C, M, K, W>(
    corpus: &C,
    options: &ListOptions,
    width: u16,
    mut terminal: RawTerminal<M>,
    keys: &mut K,
    out: &mut W,
) -> Result<ListOutcome<C::Payload>>
where
    C: Corpus,
    M: ModeControl,
    K: KeySource,
    W: Write,
{
    let outcome = ListController::new(corpus, options, width).and_then(|mut controller| {
        let outcome = controller.run(keys, out);
        if outcome.is_err() {
            if let Err(e) = controller.clear(out) {
                warn!("Unable to clear the list: {e}");
            }
        }
        outcome
    });

    let restored = terminal.close();
    let outcome = outcome?;
    restored?;

    match &outcome {
        ListOutcome::Selected(_) => info!("Selection made"),
        ListOutcome::Cancelled => info!("Selection cancelled"),
    }

    Ok(outcome)
}
