//! Command units - Declarative command definitions loaded from a directory

pub mod loader;
pub mod manifest;

pub use loader::CommandLoader;
