//! Interactive fuzzy selection in a raw terminal.
//!
//! This module provides the inline list the `dial` binary shows below the
//! shell prompt: a query line, a window of ranked results and a selection
//! that follows the arrow keys.
//!
//! # Key Features
//!
//! - **Incremental Search**: Every keystroke re-runs the search
//! - **Match Highlighting**: Matched characters are drawn distinctly
//! - **Inline Drawing**: Frames are redrawn in place without taking over the screen
//! - **Keyboard Navigation**: Arrow keys, or j/k in vim-style Normal mode
//!
//! # User Interface
//!
//! The interface supports:
//! - Typing and backspace to edit the query
//! - Up/Down arrows to move the selection
//! - Enter to select the highlighted result
//! - Ctrl-C, or Escape without vim navigation, to cancel
//! - Escape then j/k/i/a when vim navigation is enabled

pub mod colors;
pub mod screen;
pub mod terminal;
pub mod types;
pub mod ui;

pub use types::{ListOptions, ListOutcome};
pub use ui::{run_list, run_list_with, ListController};
