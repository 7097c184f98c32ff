//! Discord adapter

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serenity::builder::CreateMessage;
use serenity::http::Http;
use serenity::model::channel::Message as DiscordMessage;
use serenity::model::gateway::Ready;
use serenity::model::id::{ChannelId, MessageId};
use serenity::prelude::{Client, Context, EventHandler, GatewayIntents};
use tokio::task::JoinHandle;

use crate::application::errors::BotError;
use crate::application::messaging::MessageDispatcher;
use crate::application::services::{CredentialProber, ProbeReport};
use crate::domain::entities::{CredentialEntry, Message, User};
use crate::domain::traits::Bot;

/// Gateway intents needed to read message text in guild channels
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT
}

/// Discord REST side of the bot
pub struct DiscordAdapter {
    http: Arc<Http>,
}

impl DiscordAdapter {
    pub fn new(token: &str) -> Self {
        Self {
            http: Arc::new(Http::new(token)),
        }
    }

    /// Convert a gateway message into the domain message
    pub fn to_message(msg: &DiscordMessage) -> Message {
        let mut sender = User::new(msg.author.id.to_string()).with_username(msg.author.name.clone());
        if msg.author.bot {
            sender = sender.bot();
        }
        let timestamp = DateTime::<Utc>::from_timestamp(msg.timestamp.unix_timestamp(), 0)
            .unwrap_or_else(Utc::now);

        Message::new(msg.channel_id.to_string(), msg.content.clone())
            .with_id(msg.id.to_string())
            .with_sender(sender)
            .with_timestamp(timestamp)
            .with_platform("discord")
    }
}

fn parse_id(raw: &str) -> Result<u64, BotError> {
    raw.parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| BotError::InvalidId(raw.to_string()))
}

#[async_trait]
impl Bot for DiscordAdapter {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        let channel = ChannelId::new(parse_id(chat_id)?);
        let sent = channel
            .send_message(&self.http, CreateMessage::new().content(text))
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn reply(&self, message: &Message, text: &str) -> Result<String, BotError> {
        let channel = ChannelId::new(parse_id(&message.chat_id)?);
        let original = MessageId::new(parse_id(&message.id)?);
        let builder = CreateMessage::new()
            .content(text)
            .reference_message((channel, original));

        let sent = channel
            .send_message(&self.http, builder)
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;
        Ok(sent.id.to_string())
    }
}

/// Gateway event handler: checks credentials once on ready, dispatches every message
pub struct DiscordHandler {
    dispatcher: Arc<MessageDispatcher>,
    prober: Arc<CredentialProber>,
    credentials: Arc<Vec<CredentialEntry>>,
    checked: AtomicBool,
}

impl DiscordHandler {
    pub fn new(
        dispatcher: Arc<MessageDispatcher>,
        prober: Arc<CredentialProber>,
        credentials: Vec<CredentialEntry>,
    ) -> Self {
        Self {
            dispatcher,
            prober,
            credentials: Arc::new(credentials),
            checked: AtomicBool::new(false),
        }
    }

    /// Spawn the credential check the first time only.
    /// Ready is re-sent after session resets.
    pub fn start_credential_check(&self) -> Option<JoinHandle<Vec<ProbeReport>>> {
        if self.checked.swap(true, Ordering::SeqCst) {
            return None;
        }

        let prober = Arc::clone(&self.prober);
        let credentials = Arc::clone(&self.credentials);
        Some(tokio::spawn(async move { prober.probe_all(&credentials).await }))
    }
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!("Logged in as {}.", ready.user.tag());
        if self.start_credential_check().is_none() {
            tracing::debug!("Credentials already checked this session");
        }
    }

    async fn message(&self, _ctx: Context, msg: DiscordMessage) {
        let outcome = self.dispatcher.dispatch(DiscordAdapter::to_message(&msg)).await;
        tracing::trace!("Message {} in {}: {:?}", msg.id, msg.channel_id, outcome);
    }
}

/// Log in and run the gateway client until it stops
pub async fn run(token: &str, handler: DiscordHandler) -> Result<(), BotError> {
    let preview: String = token.chars().take(8).collect();
    tracing::info!("Starting Discord bot (token: {}...)", preview);

    let mut client = Client::builder(token, intents())
        .event_handler(handler)
        .await
        .map_err(|e| BotError::Gateway(e.to_string()))?;

    client
        .start()
        .await
        .map_err(|e| BotError::Auth(e.to_string()))
}
