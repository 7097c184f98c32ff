//! Application services - Startup orchestration

pub mod probe_service;

pub use probe_service::{CredentialProber, ProbeReport};
