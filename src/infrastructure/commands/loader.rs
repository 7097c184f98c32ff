//! Command loader - Builds the command registry from a directory of units

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::commands::HandlerCatalog;
use crate::domain::entities::{Command, CommandRegistry};
use super::manifest::CommandManifest;

/// File extensions recognised as command units
const UNIT_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Command loader
pub struct CommandLoader {
    command_dir: PathBuf,
    catalog: HandlerCatalog,
}

impl CommandLoader {
    pub fn new(command_dir: impl Into<PathBuf>, catalog: HandlerCatalog) -> Self {
        Self {
            command_dir: command_dir.into(),
            catalog,
        }
    }

    /// Build a command from a single unit file. `None` if the unit is incomplete or unreadable.
    pub fn load_command(&self, path: impl AsRef<Path>) -> Option<Command> {
        let path = path.as_ref();

        let manifest = match CommandManifest::from_file(path) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("Skipping command unit {}: {}", path.display(), e);
                return None;
            }
        };

        let Some(name) = manifest.name() else {
            tracing::debug!("Skipping {}: no command name", path.display());
            return None;
        };

        let Some(kind) = manifest.handler.as_deref() else {
            tracing::debug!("Skipping {}: no handler", path.display());
            return None;
        };

        let Some(handler) = self.catalog.resolve(kind, manifest.reply.as_deref()) else {
            tracing::debug!(
                "Skipping {}: handler '{}' unavailable (known: {})",
                path.display(),
                kind,
                HandlerCatalog::KINDS.join(", ")
            );
            return None;
        };

        let mut command = Command::new(name, handler);
        if let Some(desc) = &manifest.description {
            command = command.with_description(desc);
        }
        Some(command)
    }

    /// Load every unit in the command directory. Never fails; a missing directory yields an empty registry.
    pub fn load_registry(&self) -> CommandRegistry {
        let mut registry = CommandRegistry::new();

        if !self.command_dir.exists() {
            tracing::debug!("Command directory does not exist: {}", self.command_dir.display());
            return registry;
        }

        let entries = match std::fs::read_dir(&self.command_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to read command directory {}: {}", self.command_dir.display(), e);
                return registry;
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(e) => Some(e.path()),
                Err(e) => {
                    tracing::warn!("Failed to read directory entry: {}", e);
                    None
                }
            })
            .filter(|path| path.is_file() && is_command_unit(path))
            .collect();
        // Later files win on name collisions
        paths.sort();

        for path in paths {
            if let Some(command) = self.load_command(&path) {
                tracing::debug!("Loaded command '{}' from {}", command.name, path.display());
                registry.register(command);
            }
        }

        tracing::info!("Loaded {} commands from {}", registry.len(), self.command_dir.display());
        registry
    }

    /// Load the registry and wrap it for sharing
    pub fn load_shared(&self) -> Arc<CommandRegistry> {
        Arc::new(self.load_registry())
    }
}

fn is_command_unit(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| UNIT_EXTENSIONS.contains(&ext))
}
