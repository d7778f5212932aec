use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unable to initialize the terminal interface: {}", _0)]
    TerminalInit(std::io::Error),

    #[error("Unable to restore the terminal interface: {}", _0)]
    TerminalRestore(std::io::Error),

    #[error("Unable to process user keystroke: {}", _0)]
    KeyRead(std::io::Error),

    #[error("Invalid query: {}", _0)]
    InvalidQuery(String),

    #[error("Selected index {} is outside of the {} displayed results.", .index, .len)]
    SelectionOutOfRange { index: usize, len: usize },

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("No commands were found in the command definition YAML. Is `{}` empty?", .path)]
    EmptyCommandDefinition { path: String },

    #[error("Invalid command at position {}: invocation may not be empty", .0)]
    EmptyInvocation(usize),

    #[error("Found a non-unique command invocation: `{}`", .0)]
    NonUniqueInvocation(String),
}

impl Error {
    pub fn empty_command_definition(path: String) -> Self {
        Self::EmptyCommandDefinition { path }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    /// Whether the list can keep running after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidQuery(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_invalid_query_is_recoverable() {
        assert!(Error::InvalidQuery("unclosed group".to_string()).is_recoverable());
        assert!(!Error::SelectionOutOfRange { index: 3, len: 2 }.is_recoverable());
        assert!(!Error::KeyRead(std::io::Error::other("closed")).is_recoverable());
    }

    #[test]
    fn test_selection_out_of_range_message() {
        let error = Error::SelectionOutOfRange { index: 4, len: 2 };
        assert_eq!(
            error.to_string(),
            "Selected index 4 is outside of the 2 displayed results."
        );
    }
}
