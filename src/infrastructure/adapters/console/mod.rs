//! Console adapter for development/testing

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::application::errors::BotError;
use crate::application::messaging::MessageDispatcher;
use crate::application::services::CredentialProber;
use crate::domain::entities::{CredentialEntry, Message, User};
use crate::domain::traits::Bot;

/// Chat id used for every console message
pub const CONSOLE_CHAT: &str = "console";

/// Console bot adapter for local development
#[derive(Default)]
pub struct ConsoleAdapter;

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Wrap one input line as a message from the local user
    pub fn to_message(line: &str) -> Message {
        Message::new(CONSOLE_CHAT, line)
            .with_sender(User::new("local").with_username("you"))
            .with_platform("console")
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn reply(&self, message: &Message, text: &str) -> Result<String, BotError> {
        self.send_message(&message.chat_id, text).await
    }
}

/// Check credentials, then dispatch stdin lines until EOF
pub async fn run(
    dispatcher: Arc<MessageDispatcher>,
    prober: Arc<CredentialProber>,
    credentials: Vec<CredentialEntry>,
) -> Result<(), BotError> {
    let stdin = BufReader::new(tokio::io::stdin());
    run_with_input(stdin, dispatcher, prober, credentials).await
}

/// Dispatch each line of `input`; the credential check runs alongside and
/// is awaited before returning
pub async fn run_with_input<R>(
    input: R,
    dispatcher: Arc<MessageDispatcher>,
    prober: Arc<CredentialProber>,
    credentials: Vec<CredentialEntry>,
) -> Result<(), BotError>
where
    R: AsyncBufRead + Unpin,
{
    tracing::info!("Starting console bot (dev mode)");
    tracing::info!("Logged in as console.");

    let checks = tokio::spawn(async move { prober.probe_all(&credentials).await });

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let outcome = dispatcher.dispatch(ConsoleAdapter::to_message(&line)).await;
        tracing::debug!("{:?}", outcome);
    }

    if let Err(e) = checks.await {
        tracing::warn!("Credential check did not finish: {}", e);
    }

    tracing::info!("Console closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::application::commands::HandlerCatalog;
    use crate::application::messaging::DispatchOutcome;
    use crate::domain::entities::{Command, CommandRegistry};
    use crate::testing::{CountingProbeClient, RecordingBot};

    fn ping_registry() -> Arc<CommandRegistry> {
        let mut registry = CommandRegistry::new();
        let handler = HandlerCatalog::new().resolve("ping", None).unwrap();
        registry.register(Command::new("ping", handler));
        Arc::new(registry)
    }

    #[test]
    fn test_console_messages_are_from_a_human() {
        let msg = ConsoleAdapter::to_message("!ping");
        assert_eq!(msg.chat_id, CONSOLE_CHAT);
        assert_eq!(msg.text, "!ping");
        assert_eq!(msg.platform, "console");
        assert!(!msg.is_from_bot());
    }

    #[tokio::test]
    async fn test_console_reply_succeeds() {
        let bot = ConsoleAdapter::new();
        let msg = ConsoleAdapter::to_message("!ping");
        assert!(bot.reply(&msg, "Pong!").await.is_ok());
    }

    #[tokio::test]
    async fn test_console_dispatch_with_empty_registry() {
        let dispatcher = MessageDispatcher::new(
            "!",
            Arc::new(CommandRegistry::new()),
            Arc::new(ConsoleAdapter::new()),
        );
        let outcome = dispatcher.dispatch(ConsoleAdapter::to_message("!ping")).await;
        assert_eq!(outcome, DispatchOutcome::UnknownCommand("ping".to_string()));
    }

    #[tokio::test]
    async fn test_credential_check_finishes_when_input_is_already_closed() {
        let client = CountingProbeClient::with_delay(Duration::from_millis(50));
        let prober = Arc::new(CredentialProber::new(client.clone()));
        let bot = Arc::new(RecordingBot::default());
        let dispatcher = Arc::new(MessageDispatcher::new("!", ping_registry(), bot.clone()));
        let credentials = vec![
            CredentialEntry::new("openai", "k"),
            CredentialEntry::default(),
        ];

        run_with_input(BufReader::new(&b""[..]), dispatcher, prober, credentials)
            .await
            .unwrap();

        assert_eq!(client.calls(), 1);
        assert!(bot.replies().is_empty());
    }

    #[tokio::test]
    async fn test_console_lines_dispatch_while_credentials_are_checked() {
        let client = CountingProbeClient::with_delay(Duration::from_millis(50));
        let prober = Arc::new(CredentialProber::new(client.clone()));
        let bot = Arc::new(RecordingBot::default());
        let dispatcher = Arc::new(MessageDispatcher::new("!", ping_registry(), bot.clone()));
        let input = BufReader::new(&b"!ping\nhello\n!PING\n"[..]);

        run_with_input(input, dispatcher, prober, vec![CredentialEntry::new("together", "k")])
            .await
            .unwrap();

        let expected = ("console".to_string(), "Pong!".to_string());
        assert_eq!(bot.replies(), vec![expected.clone(), expected]);
        assert_eq!(client.calls(), 1);
    }
}
