//! Domain layer - Core bot concepts with no platform dependencies
//! 
//! This layer contains:
//! - Entities: Core objects (User, Message, Command, CredentialEntry)
//! - Traits: Abstractions for infrastructure (Bot)

pub mod entities;
pub mod traits;
