//! Application layer - Use cases
//! 
//! This layer contains:
//! - Commands: Built-in command handlers
//! - Services: Credential probing
//! - Errors: Error types shared across layers
//! - Messaging: Command parsing and dispatching

pub mod commands;
pub mod errors;
pub mod services;
pub mod messaging;
