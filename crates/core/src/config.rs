//! Configuration defaults and path utilities for fuzzdial.
//!
//! This module provides the defaults used when the command line does not
//! override them, and expands shell variables like `~` in paths.

/// Default path for the commands file
const DEFAULT_COMMANDS_PATH: &str = "~/.fuzzdial/commands.yml";

/// Default number of result rows shown below the query line
pub const DEFAULT_CAPACITY: usize = 10;

/// Terminal width assumed when the real width cannot be queried
pub const FALLBACK_TERMINAL_WIDTH: u16 = 80;

/// Resolves the commands file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// commands path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use fuzzdial_core::config::get_commands_path;
///
/// // Use default path
/// let default_path = get_commands_path(&None);
///
/// // Use custom path
/// let custom_path = get_commands_path(&Some("/path/to/commands.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/commands.yml");
/// ```
pub fn get_commands_path(commands_path_arg: &Option<String>) -> String {
    let commands_path = match commands_path_arg {
        Some(commands_path) => commands_path,
        None => DEFAULT_COMMANDS_PATH,
    };

    shellexpand::tilde(commands_path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_commands_path_with_custom_path() {
        let custom_path = Some("/custom/path/commands.yml".to_string());
        let result = get_commands_path(&custom_path);
        assert_eq!(result, "/custom/path/commands.yml");
    }

    #[test]
    fn test_get_commands_path_with_none() {
        let result = get_commands_path(&None);
        // Should expand the tilde in the default path
        assert!(result.ends_with(".fuzzdial/commands.yml"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_get_commands_path_with_tilde() {
        let tilde_path = Some("~/my-commands.yml".to_string());
        let result = get_commands_path(&tilde_path);
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("my-commands.yml"));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_CAPACITY, 10);
        assert_eq!(FALLBACK_TERMINAL_WIDTH, 80);
    }
}
