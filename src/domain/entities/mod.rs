//! Domain entities - Core objects with no platform dependencies

pub mod user;
pub mod message;
pub mod command;
pub mod credential;

pub use user::User;
pub use message::Message;
pub use command::{Command, CommandContext, CommandHandler, CommandRegistry};
pub use credential::{CredentialEntry, ProbeOutcome, ProviderKind};
