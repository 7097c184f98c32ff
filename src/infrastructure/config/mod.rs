//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::application::errors::ConfigError;
use crate::domain::entities::CredentialEntry;

/// Default OpenAI probe endpoint base
pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Default Together probe endpoint base
pub const TOGETHER_BASE_URL: &str = "https://api.together.xyz";

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub commands: CommandsConfig,
    pub discord: DiscordConfig,
    pub probe: ProbeConfig,
    pub credentials: Vec<CredentialEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CommandsConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DiscordConfig {
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ProbeConfig {
    pub timeout_seconds: u64,
    pub openai_model: String,
    pub openai_base_url: String,
    pub together_base_url: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "bangbot".to_string(),
            prefix: "!".to_string(),
        }
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./commands"),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            openai_model: "text-davinci-003".to_string(),
            openai_base_url: OPENAI_BASE_URL.to_string(),
            together_base_url: TOGETHER_BASE_URL.to_string(),
        }
    }
}

/// Environment lookup, injectable for tests
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the process environment
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay environment variables on top of this config.
    ///
    /// Credential pairs 1 and 2 always replace the file's list so that a
    /// missing pair is still reported. Pairs 3.. are read while either half is set.
    pub fn apply_env(&mut self, env: &dyn EnvSource) {
        if let Some(token) = env.var("DISCORD_TOKEN") {
            self.discord.token = Some(token);
        }

        if let Some(prefix) = env.var("BOT_PREFIX").filter(|p| !p.is_empty()) {
            self.bot.prefix = prefix;
        }

        if let Some(dir) = env.var("COMMANDS_DIR") {
            self.commands.directory = PathBuf::from(dir);
        }

        let env_credentials = credentials_from_env(env);
        if self.credentials.is_empty() || env_credentials.iter().any(|c| *c != CredentialEntry::default()) {
            self.credentials = env_credentials;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::InvalidValue("bot.prefix must not be empty".to_string()));
        }
        if self.probe.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue("probe.timeout-seconds must be positive".to_string()));
        }
        Ok(())
    }

    /// Token for the Discord gateway
    pub fn discord_token(&self) -> Result<&str, ConfigError> {
        self.discord
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingField("DISCORD_TOKEN".to_string()))
    }
}

fn credentials_from_env(env: &dyn EnvSource) -> Vec<CredentialEntry> {
    let mut entries = Vec::new();
    for n in 1.. {
        let provider = env.var(&format!("API{}_PROVIDER", n));
        let key = env.var(&format!("API_KEY_{}", n));
        if n > 2 && provider.is_none() && key.is_none() {
            break;
        }
        entries.push(CredentialEntry { provider, key });
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapEnv(HashMap<&'static str, &'static str>);

    impl EnvSource for MapEnv {
        fn var(&self, name: &str) -> Option<String> {
            self.0.get(name).map(|v| v.to_string())
        }
    }

    fn env(pairs: &[(&'static str, &'static str)]) -> MapEnv {
        MapEnv(pairs.iter().copied().collect())
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bot.prefix, "!");
        assert_eq!(config.commands.directory, PathBuf::from("./commands"));
        assert_eq!(config.probe.openai_base_url, OPENAI_BASE_URL);
        assert!(config.credentials.is_empty());
    }

    #[test]
    fn test_env_reads_two_positional_pairs() {
        let mut config = Config::default();
        config.apply_env(&env(&[
            ("DISCORD_TOKEN", "tok"),
            ("API1_PROVIDER", "openai"),
            ("API_KEY_1", "sk-1"),
            ("API_KEY_2", "tg-2"),
        ]));

        assert_eq!(config.discord_token().unwrap(), "tok");
        assert_eq!(
            config.credentials,
            vec![
                CredentialEntry::new("openai", "sk-1"),
                CredentialEntry { provider: None, key: Some("tg-2".to_string()) },
            ]
        );
    }

    #[test]
    fn test_env_always_yields_two_entries() {
        let mut config = Config::default();
        config.apply_env(&env(&[]));
        assert_eq!(config.credentials, vec![CredentialEntry::default(); 2]);
        assert!(config.discord_token().is_err());
    }

    #[test]
    fn test_env_extends_past_two() {
        let mut config = Config::default();
        config.apply_env(&env(&[
            ("API3_PROVIDER", "together"),
            ("API_KEY_3", "k3"),
            ("API_KEY_5", "ignored"),
        ]));
        assert_eq!(config.credentials.len(), 3);
        assert_eq!(config.credentials[2], CredentialEntry::new("together", "k3"));
    }

    #[test]
    fn test_file_credentials_kept_when_env_has_none() {
        let mut config = Config::parse(
            "credentials:\n  - provider: openai\n    key: from-file\n",
        )
        .unwrap();
        config.apply_env(&env(&[]));
        assert_eq!(config.credentials, vec![CredentialEntry::new("openai", "from-file")]);
    }

    #[test]
    fn test_parse_partial_yaml() {
        let config = Config::parse(
            "bot:\n  prefix: '?'\nprobe:\n  timeout-seconds: 5\n  openai-base-url: http://localhost:1234\n",
        )
        .unwrap();
        assert_eq!(config.bot.prefix, "?");
        assert_eq!(config.bot.name, "bangbot");
        assert_eq!(config.probe.timeout_seconds, 5);
        assert_eq!(config.probe.openai_base_url, "http://localhost:1234");
        assert_eq!(config.probe.together_base_url, TOGETHER_BASE_URL);
    }

    #[test]
    fn test_parse_rejects_empty_prefix() {
        assert!(matches!(
            Config::parse("bot:\n  prefix: ''\n"),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(Config::load("/definitely/not/here.yaml").is_err());
    }
}
