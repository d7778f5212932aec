//! Fuzzdial CLI Library
//!
//! This crate provides the terminal side of fuzzdial: argument parsing and an
//! interactive list that searches any [`fuzzdial_core::corpus::Corpus`] as the
//! user types.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`command_selection`]: Raw terminal driver, frame builder and list controller
//!
//! # Examples
//!
//! The CLI binary (`dial`) prints the chosen invocation to stdout, so it can
//! be captured by a shell wrapper:
//!
//! ```bash
//! # Pick from ~/.fuzzdial/commands.yml
//! dial
//!
//! # Start with a query and show 5 rows
//! dial -q kube -n 5
//!
//! # Regex search with vim-style navigation
//! dial --regex --vim -c ./commands.yml
//!
//! # Run the selection
//! eval "$(dial)"
//! ```

pub mod cli_args;
pub mod command_selection;
