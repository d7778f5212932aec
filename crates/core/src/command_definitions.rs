use std::fmt::{Display, Formatter};

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CommandDefinition {
    pub invocation: String,
    pub description: Option<String>,
}

impl CommandDefinition {
    pub fn new(invocation: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            invocation: invocation.into(),
            description: description.map(ToString::to_string),
        }
    }
}

impl Display for CommandDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) => write!(formatter, "{} ({})", self.invocation, description),
            None => formatter.write_str(&self.invocation),
        }
    }
}
