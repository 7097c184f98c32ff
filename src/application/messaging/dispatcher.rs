//! Message dispatcher - Routes prefixed messages to registered commands

use std::sync::Arc;

use crate::domain::entities::{CommandContext, CommandRegistry, Message};
use crate::domain::traits::Bot;
use super::parser::CommandParser;

/// Reply sent when a command handler fails
pub const COMMAND_ERROR_REPLY: &str = "There was an error executing that command.";

/// What the dispatcher did with a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Authored by a bot account
    IgnoredBot,
    /// Not addressed to the bot
    NotCommand,
    /// Prefixed, but no such command
    UnknownCommand(String),
    Executed(String),
    /// Handler returned an error and the user was told so
    Failed(String),
}

/// Message dispatcher - filters messages and runs the matching command
pub struct MessageDispatcher {
    parser: CommandParser,
    registry: Arc<CommandRegistry>,
    bot: Arc<dyn Bot>,
}

impl MessageDispatcher {
    pub fn new(prefix: impl Into<String>, registry: Arc<CommandRegistry>, bot: Arc<dyn Bot>) -> Self {
        Self {
            parser: CommandParser::new(prefix),
            registry,
            bot,
        }
    }

    /// Process one inbound message
    pub async fn dispatch(&self, message: Message) -> DispatchOutcome {
        if message.is_from_bot() {
            return DispatchOutcome::IgnoredBot;
        }

        let Some(parsed) = self.parser.parse(&message.text) else {
            return DispatchOutcome::NotCommand;
        };

        let Some(command) = self.registry.get(&parsed.name) else {
            return DispatchOutcome::UnknownCommand(parsed.name);
        };

        tracing::debug!(
            "[{}/{}] {} {}{} {:?}",
            message.platform,
            message.chat_id,
            message.timestamp.format("%H:%M:%S"),
            self.parser.prefix(),
            parsed.name,
            parsed.args
        );

        let ctx = CommandContext::new(message, Arc::clone(&self.bot));
        match command.handler.execute(&ctx, &parsed.args).await {
            Ok(()) => DispatchOutcome::Executed(parsed.name),
            Err(e) => {
                tracing::error!("Command '{}' failed in {}: {}", parsed.name, ctx.message.chat_id, e);
                if let Err(e) = ctx.reply(COMMAND_ERROR_REPLY).await {
                    tracing::warn!("Failed to report command error to {}: {}", ctx.message.chat_id, e);
                }
                DispatchOutcome::Failed(parsed.name)
            }
        }
    }
}
