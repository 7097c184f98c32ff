use async_trait::async_trait;
use crate::application::errors::ProbeError;
use crate::domain::entities::ProviderKind;

/// Issues the smoke-test request for a provider
#[async_trait]
pub trait ProbeClient: Send + Sync {
    /// Send one test request authenticated with `key`, returning the HTTP status
    async fn send_probe(&self, provider: ProviderKind, key: &str) -> Result<u16, ProbeError>;
}
