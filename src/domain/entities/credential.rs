use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Completion-API provider that can be smoke-tested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Together,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Together => "together",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    /// Case-insensitive; surrounding whitespace is not trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "together" => Ok(ProviderKind::Together),
            _ => Err(format!("unsupported provider: {}", s)),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (provider, key) pair as configured. Either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CredentialEntry {
    pub provider: Option<String>,
    pub key: Option<String>,
}

impl CredentialEntry {
    #[cfg(test)]
    pub fn new(provider: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            provider: Some(provider.into()),
            key: Some(key.into()),
        }
    }

    /// Provider and key, if both are present and non-empty
    pub fn complete(&self) -> Option<(&str, &str)> {
        let provider = self.provider.as_deref().filter(|p| !p.is_empty())?;
        let key = self.key.as_deref().filter(|k| !k.is_empty())?;
        Some((provider, key))
    }
}

/// Result of probing one credential entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Ok,
    Failed,
    Skipped,
    Unsupported,
}

impl ProbeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeOutcome::Ok => "OK",
            ProbeOutcome::Failed => "FAILED",
            ProbeOutcome::Skipped => "SKIPPED",
            ProbeOutcome::Unsupported => "UNSUPPORTED",
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
