//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Commands: Command units loaded from disk
//! - Providers: HTTP probes against completion APIs
//! - Adapters: Platform integrations (Discord, console)

pub mod config;
pub mod commands;
pub mod providers;
pub mod adapters;
