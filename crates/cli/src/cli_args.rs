//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate and turns parsed arguments into the options the list runs with.

use clap::Parser;

use crate::command_selection::ListOptions;
use fuzzdial_core::config::DEFAULT_CAPACITY;
use fuzzdial_core::search::SearchMode;

fn parse_capacity(value: &str) -> Result<usize, String> {
    let capacity: usize = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;

    if capacity == 0 {
        return Err("capacity must be at least 1".to_string());
    }

    Ok(capacity)
}

/// Command-line arguments for the `dial` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use fuzzdial_cli::cli_args::Args;
///
/// let args = Args::parse_from(["dial", "--vim", "-q", "kube"]);
/// assert!(args.vim);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the commands definition YAML.
    ///
    /// If not provided, defaults to `~/.fuzzdial/commands.yml`.
    #[arg(long, short = 'c')]
    pub commands_path: Option<String>,

    /// Number of results shown below the query line.
    #[arg(long, short = 'n', default_value_t = DEFAULT_CAPACITY, value_parser = parse_capacity)]
    pub capacity: usize,

    /// Enable vim-style navigation.
    ///
    /// Escape switches to Normal mode, where j/k move the selection and i/a
    /// return to typing. Without this flag Escape cancels.
    #[arg(long, short = 'v', action)]
    pub vim: bool,

    /// Treat the query as a case-insensitive regular expression.
    #[arg(long, short = 'r', action)]
    pub regex: bool,

    /// Query to start with.
    #[arg(long, short = 'q', default_value = "")]
    pub query: String,
}

impl Args {
    pub fn search_mode(&self) -> SearchMode {
        if self.regex {
            SearchMode::Regex
        } else {
            SearchMode::Fuzzy
        }
    }

    pub fn list_options(&self) -> ListOptions {
        ListOptions {
            capacity: self.capacity,
            vim_navigation: self.vim,
            initial_query: self.query.clone(),
        }
    }
}
