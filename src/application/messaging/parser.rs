//! Command parser - Splits prefixed message text into a command name and arguments

/// A command invocation extracted from message text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Lowercased command name
    pub name: String,
    pub args: Vec<String>,
}

/// Recognises text of the form `<prefix>name arg1 arg2 ...`
#[derive(Debug, Clone)]
pub struct CommandParser {
    prefix: String,
}

impl CommandParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether the text is addressed to the bot at all
    pub fn is_command(&self, text: &str) -> bool {
        !self.prefix.is_empty() && text.starts_with(&self.prefix)
    }

    /// Parse a command. Returns `None` when the prefix is missing or no name follows it.
    pub fn parse(&self, text: &str) -> Option<ParsedCommand> {
        if !self.is_command(text) {
            return None;
        }

        // Only the leading prefix is stripped, "!!x" names "!x"
        let mut parts = text[self.prefix.len()..].split_whitespace();
        let name = parts.next()?.to_lowercase();
        let args = parts.map(str::to_string).collect();

        Some(ParsedCommand { name, args })
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new("!")
    }
}
