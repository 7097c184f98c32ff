//! Credential prober - One-shot startup check of configured API keys

use std::sync::Arc;

use crate::domain::entities::{CredentialEntry, ProbeOutcome, ProviderKind};
use crate::domain::traits::ProbeClient;

/// Outcome for one credential entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    /// 1-based position in the configured list
    pub index: usize,
    pub provider: Option<String>,
    pub outcome: ProbeOutcome,
}

/// Probes each configured credential in order
pub struct CredentialProber {
    client: Arc<dyn ProbeClient>,
}

impl CredentialProber {
    pub fn new(client: Arc<dyn ProbeClient>) -> Self {
        Self { client }
    }

    /// Probe every entry sequentially, logging one line per entry
    pub async fn probe_all(&self, entries: &[CredentialEntry]) -> Vec<ProbeReport> {
        let mut reports = Vec::with_capacity(entries.len());

        for (i, entry) in entries.iter().enumerate() {
            let index = i + 1;
            let report = ProbeReport {
                index,
                provider: entry.provider.clone(),
                outcome: self.probe_entry(index, entry).await,
            };

            match (report.outcome, report.provider.as_deref()) {
                (ProbeOutcome::Skipped, _) => {
                    tracing::info!("API key {} or provider missing - skipping test.", report.index);
                }
                (outcome, Some(provider)) => {
                    tracing::info!("API key {} ({}): {}", report.index, provider, outcome);
                }
                (outcome, None) => {
                    tracing::info!("API key {}: {}", report.index, outcome);
                }
            }

            reports.push(report);
        }

        reports
    }

    async fn probe_entry(&self, index: usize, entry: &CredentialEntry) -> ProbeOutcome {
        let Some((provider, key)) = entry.complete() else {
            return ProbeOutcome::Skipped;
        };

        let Ok(kind) = provider.parse::<ProviderKind>() else {
            return ProbeOutcome::Unsupported;
        };

        match self.client.send_probe(kind, key).await {
            Ok(200) => ProbeOutcome::Ok,
            Ok(status) => {
                tracing::debug!("API key {} ({}) answered with status {}", index, kind, status);
                ProbeOutcome::Failed
            }
            Err(e) => {
                tracing::debug!("API key {} ({}) probe error: {}", index, kind, e);
                ProbeOutcome::Failed
            }
        }
    }
}
