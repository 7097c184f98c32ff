use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::errors::{BotError, CommandError};
use crate::domain::entities::Message;
use crate::domain::traits::Bot;

/// Everything a handler can see about the message that triggered it
#[derive(Clone)]
pub struct CommandContext {
    pub message: Message,
    pub bot: Arc<dyn Bot>,
}

impl CommandContext {
    pub fn new(message: Message, bot: Arc<dyn Bot>) -> Self {
        Self { message, bot }
    }

    /// Reply to the triggering message
    pub async fn reply(&self, text: &str) -> Result<String, BotError> {
        self.bot.reply(&self.message, text).await
    }
}

/// Executable part of a command
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<(), CommandError>;
}

/// Represents a bot command
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub handler: Arc<dyn CommandHandler>,
}

impl Command {
    pub fn new(name: impl Into<String>, handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            name: name.into(),
            description: None,
            handler,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Command table, keyed by the name each command was declared with.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Default, Debug)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a command. A later command with the same name replaces the earlier one.
    pub fn register(&mut self, command: Command) {
        if let Some(previous) = self.commands.insert(command.name.clone(), command) {
            tracing::debug!("Command '{}' redefined, keeping the last one", previous.name);
        }
    }

    /// Exact-match lookup
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Command names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
