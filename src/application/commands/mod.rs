//! Command handlers that command units can bind to

pub mod builtin;

use std::sync::Arc;

use crate::domain::entities::CommandHandler;
pub use builtin::{EchoHandler, PingHandler, ReplyHandler};

/// Maps handler kind names (as written in command units) to handlers
#[derive(Debug, Default, Clone, Copy)]
pub struct HandlerCatalog;

impl HandlerCatalog {
    pub const KINDS: &'static [&'static str] = &["ping", "echo", "reply"];

    pub fn new() -> Self {
        Self
    }

    /// Build the handler for `kind`. `reply` is only used by the `reply` kind, which requires it.
    pub fn resolve(&self, kind: &str, reply: Option<&str>) -> Option<Arc<dyn CommandHandler>> {
        match kind {
            "ping" => Some(Arc::new(PingHandler)),
            "echo" => Some(Arc::new(EchoHandler)),
            "reply" => reply
                .filter(|text| !text.is_empty())
                .map(|text| Arc::new(ReplyHandler::new(text)) as Arc<dyn CommandHandler>),
            _ => None,
        }
    }
}
