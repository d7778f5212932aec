//! Type definitions for the interactive list and its state machine.
//!
//! This module defines the key events the list reacts to, the viewport that
//! scrolls over the results, and the transitions between Insert and Normal
//! mode. Everything here is free of terminal I/O so it can be tested directly.

use std::ops::Range;

use fuzzdial_core::config::DEFAULT_CAPACITY;

/// A decoded keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    Character(char),
    Enter,
    Escape,
    CtrlC,
    Delete,
    ArrowUp,
    ArrowDown,
}

/// Anything the terminal driver hands to the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize { width: u16 },
}

/// Navigation mode. Normal is only reachable with vim navigation enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Insert,
    Normal,
}

/// Direction to move the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// How the list finished.
#[derive(Debug, PartialEq, Eq)]
pub enum ListOutcome<P> {
    Selected(P),
    Cancelled,
}

/// Options for one interactive list session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListOptions {
    /// Number of result rows shown under the query line
    pub capacity: usize,
    /// Whether escape switches to a Normal mode with j/k navigation
    pub vim_navigation: bool,
    /// Query text the list starts with
    pub initial_query: String,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            vim_navigation: false,
            initial_query: String::new(),
        }
    }
}

/// State for the visible window over the results.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ViewportState {
    pub selected_index: usize,
    pub offset: usize,
    pub capacity: usize,
}

impl ViewportState {
    pub fn new(capacity: usize) -> Self {
        Self {
            selected_index: 0,
            offset: 0,
            capacity: capacity.max(1),
        }
    }

    /// Moves the selection by one, scrolling only when the selection would
    /// leave the window. Returns whether anything changed.
    pub fn move_selection(&mut self, direction: CycleDirection, result_count: usize) -> bool {
        match direction {
            CycleDirection::Up => {
                if self.selected_index == 0 {
                    return false;
                }
                self.selected_index -= 1;
                if self.selected_index < self.offset {
                    self.offset = self.selected_index;
                }
            }
            CycleDirection::Down => {
                if self.selected_index + 1 >= result_count {
                    return false;
                }
                self.selected_index += 1;
                if self.selected_index >= self.offset + self.capacity {
                    self.offset = self.selected_index + 1 - self.capacity;
                }
            }
        }

        true
    }

    /// Restores the selection and offset invariants after the result set
    /// changed size.
    pub fn reclamp(&mut self, result_count: usize) {
        let last_index = result_count.saturating_sub(1);
        self.selected_index = self.selected_index.min(last_index);
        self.offset = self
            .offset
            .min(last_index.saturating_sub(self.capacity));

        // The offset bound can leave the old selection just below the window.
        let last_visible = self.offset + self.capacity - 1;
        if self.selected_index > last_visible {
            self.selected_index = last_visible;
        }
    }

    /// Indexes of the results currently on screen.
    pub fn visible_range(&self, result_count: usize) -> Range<usize> {
        let start = self.offset.min(result_count);
        start..(self.offset + self.capacity).min(result_count)
    }
}

/// What the controller should do after a key was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Ignore,
    Redraw,
    Research,
    Confirm,
    Cancel,
}

/// Complete UI state for the interactive list.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UiState {
    /// Text typed so far
    pub query_text: String,
    pub mode: Mode,
    pub viewport: ViewportState,
    /// Whether the corpus rejected the current query
    pub invalid_query: bool,
    pub vim_navigation: bool,
}

impl UiState {
    pub fn new(options: &ListOptions) -> Self {
        Self {
            query_text: options.initial_query.clone(),
            mode: Mode::Insert,
            viewport: ViewportState::new(options.capacity),
            invalid_query: false,
            vim_navigation: options.vim_navigation,
        }
    }

    fn move_selection(&mut self, direction: CycleDirection, result_count: usize) -> Action {
        if self.viewport.move_selection(direction, result_count) {
            Action::Redraw
        } else {
            Action::Ignore
        }
    }

    /// Applies one key to the state machine.
    pub fn handle_key(&mut self, key: KeyEvent, result_count: usize) -> Action {
        match (self.mode, key) {
            (_, KeyEvent::CtrlC) => Action::Cancel,
            (_, KeyEvent::Enter) => Action::Confirm,
            (_, KeyEvent::ArrowUp) => self.move_selection(CycleDirection::Up, result_count),
            (_, KeyEvent::ArrowDown) => self.move_selection(CycleDirection::Down, result_count),
            (Mode::Insert, KeyEvent::Escape) if self.vim_navigation => {
                self.mode = Mode::Normal;
                Action::Redraw
            }
            (_, KeyEvent::Escape) => Action::Cancel,
            (Mode::Insert, KeyEvent::Character(c)) => {
                self.query_text.push(c);
                Action::Research
            }
            (Mode::Insert, KeyEvent::Delete) => match self.query_text.pop() {
                Some(_) => Action::Research,
                None => Action::Ignore,
            },
            (Mode::Normal, KeyEvent::Character('j')) => {
                self.move_selection(CycleDirection::Down, result_count)
            }
            (Mode::Normal, KeyEvent::Character('k')) => {
                self.move_selection(CycleDirection::Up, result_count)
            }
            (Mode::Normal, KeyEvent::Character('i' | 'a')) => {
                self.mode = Mode::Insert;
                Action::Redraw
            }
            (Mode::Normal, _) => Action::Ignore,
        }
    }
}
