use clap::{Parser, Subcommand};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

mod domain;
mod application;
mod infrastructure;
#[cfg(test)]
mod testing;

use application::commands::HandlerCatalog;
use application::errors::BotError;
use application::messaging::MessageDispatcher;
use application::services::CredentialProber;
use domain::traits::Bot;
use infrastructure::adapters::{console, discord};
use infrastructure::commands::CommandLoader;
use infrastructure::config::Config;
use infrastructure::providers::HttpProbeClient;

#[derive(Parser)]
#[command(name = "bangbot")]
#[command(about = "A prefix-command chat bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Discord token (overrides DISCORD_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run {
        /// Read messages from stdin instead of connecting to Discord
        #[arg(long)]
        console: bool,
    },
    /// Check the configured API keys and exit
    Probe,
    /// List the commands found in the command directory
    Commands,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { console } => load_config(&cli.config, cli.token)
            .and_then(|config| block_on(run_bot(config, console))),
        Commands::Probe => load_config(&cli.config, cli.token)
            .and_then(|config| block_on(run_probe(config))),
        Commands::Commands => load_config(&cli.config, cli.token).map(|config| list_commands(&config)),
        Commands::Version => {
            println!("bangbot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn block_on<F>(future: F) -> Result<(), BotError>
where
    F: std::future::Future<Output = Result<(), BotError>>,
{
    tokio::runtime::Runtime::new()?.block_on(future)
}

/// Config file (if present) overlaid with the environment and CLI flags
fn load_config(config_path: &str, token_override: Option<String>) -> Result<Config, BotError> {
    let mut config = if Path::new(config_path).exists() {
        Config::load(config_path)?
    } else {
        Config::default()
    };
    config.apply_env(&infrastructure::config::ProcessEnv);

    if let Some(token) = token_override {
        config.discord.token = Some(token);
    }

    config.validate()?;
    Ok(config)
}

fn command_loader(config: &Config) -> CommandLoader {
    CommandLoader::new(&config.commands.directory, HandlerCatalog::new())
}

fn prober(config: &Config) -> Result<Arc<CredentialProber>, BotError> {
    let client = HttpProbeClient::new(&config.probe)
        .map_err(|e| BotError::Network(e.to_string()))?;
    Ok(Arc::new(CredentialProber::new(Arc::new(client))))
}

async fn run_bot(config: Config, use_console: bool) -> Result<(), BotError> {
    tracing::info!("Starting {} with prefix '{}'", config.bot.name, config.bot.prefix);

    let registry = command_loader(&config).load_shared();
    let prober = prober(&config)?;

    if use_console {
        let bot: Arc<dyn Bot> = Arc::new(console::ConsoleAdapter::new());
        let dispatcher = Arc::new(MessageDispatcher::new(&config.bot.prefix, registry, bot));
        return console::run(dispatcher, prober, config.credentials).await;
    }

    let token = config.discord_token()?.to_string();
    let bot: Arc<dyn Bot> = Arc::new(discord::DiscordAdapter::new(&token));
    let dispatcher = Arc::new(MessageDispatcher::new(&config.bot.prefix, registry, bot));
    let handler = discord::DiscordHandler::new(dispatcher, prober, config.credentials);

    discord::run(&token, handler).await
}

async fn run_probe(config: Config) -> Result<(), BotError> {
    prober(&config)?.probe_all(&config.credentials).await;
    Ok(())
}

fn list_commands(config: &Config) {
    let registry = command_loader(config).load_registry();
    if registry.is_empty() {
        println!("No commands found in {}", config.commands.directory.display());
        return;
    }

    for name in registry.names() {
        let description = registry
            .get(name)
            .and_then(|c| c.description.as_deref())
            .unwrap_or("");
        println!("  {}{} - {}", config.bot.prefix, name, description);
    }
}

fn init_config() -> Result<(), BotError> {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config)
        .map_err(|e| application::errors::ConfigError::Parse(e.to_string()))?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
