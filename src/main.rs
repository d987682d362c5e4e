use clap::{Parser, Subcommand};
use std::time::Duration;

use accountant_bot::application::errors::BotError;
use accountant_bot::application::messaging::CommandDispatcher;
use accountant_bot::application::services::{LedgerService, MessageService};
use accountant_bot::domain::entities::IncomingMessage;
use accountant_bot::domain::traits::{Bot, LedgerStore};
use accountant_bot::infrastructure::adapters::{ConsoleAdapter, TelegramAdapter};
use accountant_bot::infrastructure::config::{Config, StorageBackend};
use accountant_bot::infrastructure::database::SqliteLedgerStore;
use accountant_bot::infrastructure::storage::MemoryLedgerStore;

/// Pause before polling again after a transport error
const RETRY_DELAY: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "accountant-bot")]
#[command(about = "Splits shared party expenses from chat commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Telegram bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            let (config, warning) = load_config(&cli.config, cli.token.clone());
            init_logging(cli.debug || config.logging.debug);
            if let Some(warning) = warning {
                tracing::warn!("{}", warning);
            }

            if let Err(e) = run_bot(config) {
                tracing::error!("Bot stopped: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("accountant-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn init_logging(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(level.into()),
        )
        .init();
}

/// Load the config file when present, else defaults. Environment variables
/// and the CLI token win over the file.
fn load_config(path: &str, token_override: Option<String>) -> (Config, Option<String>) {
    let mut warning = None;
    let mut config = if std::path::Path::new(path).exists() {
        Config::load(path).unwrap_or_else(|e| {
            warning = Some(format!("Failed to load config: {}, using defaults", e));
            Config::default()
        })
    } else {
        Config::default()
    };

    config.apply_env();
    if let Some(token) = token_override {
        config.set_telegram_token(token);
    }
    (config, warning)
}

fn open_store(config: &Config) -> Result<Box<dyn LedgerStore>, BotError> {
    match config.storage.backend {
        StorageBackend::Sqlite => {
            let store = SqliteLedgerStore::open(&config.storage.path)?;
            tracing::info!(
                "Database initialized at {} ({} ledgers)",
                config.storage.path.display(),
                store.ledger_count()?
            );
            Ok(Box::new(store))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, ledgers are lost on exit");
            Ok(Box::new(MemoryLedgerStore::new()))
        }
    }
}

fn run_bot(config: Config) -> Result<(), BotError> {
    tracing::info!("Starting {}", config.bot.name);

    let store = open_store(&config)?;
    let ledgers = LedgerService::new(store, CommandDispatcher::with_default_parser()?);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;

    if let Some(token) = config.telegram_token() {
        let token = token.to_string();
        rt.block_on(async {
            let mut bot = TelegramAdapter::new(token);
            bot.fetch_bot_info().await?;
            if let Err(e) = bot.register_commands().await {
                tracing::warn!("Failed to register commands: {}", e);
            }

            let service = MessageService::new(bot, ledgers, config.bot.support_contact.clone());
            run_telegram_bot(&service, config.poll_timeout()).await
        })
    } else {
        let (chat_id, handle) = config
            .adapters
            .console
            .as_ref()
            .map(|c| (c.chat_id, c.handle.clone()))
            .unwrap_or((0, "@console".to_string()));

        rt.block_on(async {
            let bot = ConsoleAdapter::new(chat_id, handle);
            let service = MessageService::new(bot, ledgers, config.bot.support_contact.clone());
            run_console_bot(&service).await
        })
    }
}

async fn run_telegram_bot<S: LedgerStore>(
    service: &MessageService<TelegramAdapter, S>,
    timeout_seconds: i64,
) -> Result<(), BotError> {
    let bot = service.bot();
    bot.start().await?;
    tracing::info!("Connected to bot @{}", bot.bot_info().username);

    let mut offset: i64 = 0;

    loop {
        let updates = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                return Ok(());
            }
            result = bot.get_updates(offset, timeout_seconds) => result,
        };

        match updates {
            Ok(updates) => {
                offset = TelegramAdapter::get_next_offset(&updates, offset);
                for update in updates {
                    if let Some(message) = update.into_incoming() {
                        deliver(service, message).await?;
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Failed to fetch updates: {}", e);
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}

async fn run_console_bot<S: LedgerStore>(
    service: &MessageService<ConsoleAdapter, S>,
) -> Result<(), BotError> {
    let bot = service.bot();
    bot.start().await?;
    tracing::info!("Bot started: @{}", bot.bot_info().username);

    while let Some(input) = bot.read_line("> ").await {
        if input.is_empty() {
            continue;
        }
        deliver(service, bot.to_incoming(input)).await?;
    }

    Ok(())
}

/// Storage failures stop the bot, anything else is logged and skipped
async fn deliver<B: Bot, S: LedgerStore>(
    service: &MessageService<B, S>,
    message: IncomingMessage,
) -> Result<(), BotError> {
    match service.process(message).await {
        Ok(()) => Ok(()),
        Err(e @ BotError::Storage(_)) => Err(e),
        Err(e) => {
            tracing::warn!("Failed to handle message: {}", e);
            Ok(())
        }
    }
}

fn init_config() {
    match Config::default().to_yaml() {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
        }
        Err(e) => eprintln!("{}", e),
    }
}
