//! Loading of the commands file.
//!
//! The commands file is a YAML list of command definitions. It is only read
//! here; adding and removing commands is handled elsewhere.

use std::collections::HashSet;
use std::fs::File;

use log::debug;

use crate::command_definitions::CommandDefinition;
use crate::error::Error::{EmptyInvocation, NonUniqueInvocation};
use crate::error::{Error, Result};

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    match File::open(path) {
        Ok(reader) => Ok(reader),
        Err(e) => Err(Error::io_error(
            file_description.to_string(),
            path.to_string(),
            e,
        )),
    }
}

fn validate_commands(commands: &[CommandDefinition]) -> Result<()> {
    let mut invocations = HashSet::new();

    for (position, command) in commands.iter().enumerate() {
        let invocation = command.invocation.trim();
        if invocation.is_empty() {
            return Err(EmptyInvocation(position));
        }

        if !invocations.insert(invocation) {
            return Err(NonUniqueInvocation(invocation.to_string()));
        }
    }

    Ok(())
}

/// Loads and validates command definitions from a commands file.
///
/// # Errors
///
/// Returns an error if:
/// - The commands file cannot be read
/// - The YAML is malformed or doesn't match the expected structure
/// - The commands file is empty
/// - A command has an empty invocation, or two commands share one
///
/// # Examples
///
/// ```no_run
/// use fuzzdial_core::file_handling::get_command_definitions;
///
/// let commands = get_command_definitions("/home/me/.fuzzdial/commands.yml")?;
/// println!("Loaded {} commands", commands.len());
/// # Ok::<(), fuzzdial_core::error::Error>(())
/// ```
pub fn get_command_definitions(commands_path: &str) -> Result<Vec<CommandDefinition>> {
    let reader = get_reader("commands", commands_path)?;

    let parsed_command_defs: Vec<CommandDefinition> = serde_yaml::from_reader(reader)
        .map_err(|e| {
            Error::yaml_error(
                "reading".to_string(),
                "commands".to_string(),
                commands_path.to_string(),
                e,
            )
        })?;

    if parsed_command_defs.is_empty() {
        return Err(Error::empty_command_definition(commands_path.to_string()));
    }

    validate_commands(&parsed_command_defs)?;

    debug!(
        "Loaded {} commands from `{}`",
        parsed_command_defs.len(),
        commands_path
    );

    Ok(parsed_command_defs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_file(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{content}").unwrap();
        temp_file
    }

    #[test]
    fn test_validate_commands_unique() {
        let commands = vec![
            CommandDefinition::new("git push", None),
            CommandDefinition::new("git pull", Some("Fetch and merge")),
        ];
        assert!(validate_commands(&commands).is_ok());
    }

    #[test]
    fn test_validate_commands_duplicate() {
        let commands = vec![
            CommandDefinition::new("git push", None),
            CommandDefinition::new("git pull", None),
            CommandDefinition::new(" git push ", Some("Same command again")),
        ];
        let result = validate_commands(&commands);
        assert!(matches!(result, Err(NonUniqueInvocation(i)) if i == "git push"));
    }

    #[test]
    fn test_validate_commands_empty_invocation() {
        let commands = vec![
            CommandDefinition::new("ls", None),
            CommandDefinition::new("   ", Some("Blank")),
        ];
        let result = validate_commands(&commands);
        assert!(matches!(result, Err(EmptyInvocation(1))));
    }

    #[test]
    fn test_get_command_definitions_valid_yaml() {
        let temp_file = write_temp_file(
            r#"
- invocation: "go build ./..."
  description: "Build everything"
- invocation: "kubectl get pods"
"#,
        );

        let commands = get_command_definitions(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].invocation, "go build ./...");
        assert_eq!(commands[0].description, Some("Build everything".to_string()));
        assert_eq!(commands[1].invocation, "kubectl get pods");
        assert_eq!(commands[1].description, None);
    }

    #[test]
    fn test_get_command_definitions_empty_file() {
        let temp_file = write_temp_file("[]");
        let result = get_command_definitions(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::EmptyCommandDefinition { .. })));
    }

    #[test]
    fn test_get_command_definitions_invalid_yaml() {
        let temp_file = write_temp_file("invalid: yaml: content: [");
        let result = get_command_definitions(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_get_command_definitions_file_not_found() {
        let result = get_command_definitions("/this/path/does/not/exist.yml");
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
