//! HTTP probe client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::application::errors::ProbeError;
use crate::domain::entities::ProviderKind;
use crate::domain::traits::ProbeClient;
use crate::infrastructure::config::ProbeConfig;

/// Prompt sent to every provider
const PROBE_PROMPT: &str = "Say hello";

/// Output cap for completion probes
const PROBE_MAX_TOKENS: u32 = 5;

/// Sends one fixed request per probe through reqwest
pub struct HttpProbeClient {
    client: Client,
    openai_base_url: String,
    together_base_url: String,
    openai_model: String,
}

impl HttpProbeClient {
    pub fn new(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ProbeError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            openai_base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            together_base_url: config.together_base_url.trim_end_matches('/').to_string(),
            openai_model: config.openai_model.clone(),
        })
    }

    /// Full endpoint URL for a provider
    pub fn endpoint(&self, provider: ProviderKind) -> String {
        match provider {
            ProviderKind::OpenAi => format!("{}/v1/completions", self.openai_base_url),
            ProviderKind::Together => format!("{}/api/chat/conversation", self.together_base_url),
        }
    }

    /// Request body for a provider
    pub fn payload(&self, provider: ProviderKind) -> Value {
        match provider {
            ProviderKind::OpenAi => json!({
                "model": self.openai_model,
                "prompt": PROBE_PROMPT,
                "max_tokens": PROBE_MAX_TOKENS,
            }),
            ProviderKind::Together => json!({ "message": PROBE_PROMPT }),
        }
    }
}

#[async_trait]
impl ProbeClient for HttpProbeClient {
    async fn send_probe(&self, provider: ProviderKind, key: &str) -> Result<u16, ProbeError> {
        let response = self.client
            .post(self.endpoint(provider))
            .header("Authorization", format!("Bearer {}", key))
            .header("Content-Type", "application/json")
            .json(&self.payload(provider))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProbeError::Timeout
                } else {
                    ProbeError::Transport(e.to_string())
                }
            })?;

        Ok(response.status().as_u16())
    }
}
