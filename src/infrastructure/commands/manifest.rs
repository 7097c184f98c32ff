//! Command unit manifest

use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::application::errors::ManifestError;

/// One command unit as written on disk.
///
/// Both `name` and `handler` are optional here so that incomplete units
/// parse and can be skipped instead of failing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommandManifest {
    /// Command name users type after the prefix
    pub name: Option<String>,

    /// Handler kind to bind to
    pub handler: Option<String>,

    pub description: Option<String>,

    /// Fixed text for the `reply` handler
    pub reply: Option<String>,
}

impl CommandManifest {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Name, if present and non-empty
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = CommandManifest::parse(
            "name: hello\nhandler: reply\ndescription: Greets you\nreply: Hi there!\n",
        )
        .unwrap();
        assert_eq!(manifest.name(), Some("hello"));
        assert_eq!(manifest.handler.as_deref(), Some("reply"));
        assert_eq!(manifest.reply.as_deref(), Some("Hi there!"));
    }

    #[test]
    fn test_missing_fields_parse() {
        let manifest = CommandManifest::parse("description: orphan\n").unwrap();
        assert!(manifest.name().is_none());
        assert!(manifest.handler.is_none());
    }

    #[test]
    fn test_empty_name_is_none() {
        let manifest = CommandManifest::parse("name: ''\nhandler: ping\n").unwrap();
        assert!(manifest.name().is_none());
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        assert!(matches!(
            CommandManifest::parse("name: [unterminated"),
            Err(ManifestError::Parse(_))
        ));
    }
}
