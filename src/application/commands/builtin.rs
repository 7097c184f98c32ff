//! Built-in command handlers

use async_trait::async_trait;

use crate::application::errors::CommandError;
use crate::domain::entities::{CommandContext, CommandHandler};

/// Replies "Pong!"
pub struct PingHandler;

#[async_trait]
impl CommandHandler for PingHandler {
    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> Result<(), CommandError> {
        ctx.reply("Pong!").await?;
        Ok(())
    }
}

/// Repeats its arguments back
pub struct EchoHandler;

#[async_trait]
impl CommandHandler for EchoHandler {
    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<(), CommandError> {
        if args.is_empty() {
            return Err(CommandError::InvalidArgs("nothing to echo".to_string()));
        }
        ctx.reply(&args.join(" ")).await?;
        Ok(())
    }
}

/// Replies with a fixed text
pub struct ReplyHandler {
    text: String,
}

impl ReplyHandler {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl CommandHandler for ReplyHandler {
    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> Result<(), CommandError> {
        ctx.reply(&self.text).await?;
        Ok(())
    }
}
