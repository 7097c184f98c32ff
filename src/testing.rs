//! Test doubles shared by unit tests

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::errors::{BotError, ProbeError};
use crate::domain::entities::{Message, ProviderKind};
use crate::domain::traits::{Bot, ProbeClient};

/// Bot that records what it was asked to send
#[derive(Default)]
pub struct RecordingBot {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingBot {
    /// A bot whose every send fails
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// (chat_id, text) pairs in send order
    pub fn replies(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        if self.fail {
            return Err(BotError::Network("send refused".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((chat_id.to_string(), text.to_string()));
        Ok(sent.len().to_string())
    }

    async fn reply(&self, message: &Message, text: &str) -> Result<String, BotError> {
        self.send_message(&message.chat_id, text).await
    }
}

/// Answers 200 after a delay and counts requests
pub struct CountingProbeClient {
    calls: AtomicUsize,
    delay: Duration,
}

impl CountingProbeClient {
    pub fn with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            delay,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProbeClient for CountingProbeClient {
    async fn send_probe(&self, _provider: ProviderKind, _key: &str) -> Result<u16, ProbeError> {
        tokio::time::sleep(self.delay).await;
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(200)
    }
}

/// Collects formatted `tracing` output for the current thread
#[derive(Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Install as the thread's default subscriber until the guard drops
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let capture = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || capture.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.buf.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Lines at `level` ("ERROR", "WARN", ...) containing `needle`
    pub fn count(&self, level: &str, needle: &str) -> usize {
        self.lines()
            .iter()
            .filter(|l| l.contains(level) && l.contains(needle))
            .count()
    }
}

impl Write for LogCapture {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
