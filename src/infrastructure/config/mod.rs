//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub storage: StorageConfig,
    pub adapters: AdaptersConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    /// Who users should contact when the bot cannot reach its storage
    pub support_contact: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub telegram: Option<TelegramConfig>,
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TelegramConfig {
    pub enabled: bool,
    pub token: Option<String>,
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_seconds: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// Chat id used for every console line
    pub chat_id: i64,
    pub handle: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    pub debug: bool,
}

fn default_poll_timeout() -> i64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "accountant-bot".to_string(),
                support_contact: "the bot owner".to_string(),
            },
            storage: StorageConfig {
                backend: StorageBackend::Sqlite,
                path: PathBuf::from("accountant.db"),
            },
            adapters: AdaptersConfig {
                telegram: Some(TelegramConfig {
                    enabled: false,
                    token: None,
                    poll_timeout_seconds: default_poll_timeout(),
                }),
                console: Some(ConsoleConfig {
                    enabled: true,
                    chat_id: 0,
                    handle: "@console".to_string(),
                }),
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to render config: {}", e)))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::Sqlite && self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("storage.path".to_string()));
        }
        if let Some(tg) = &self.adapters.telegram {
            if tg.enabled && tg.token.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::MissingField("adapters.telegram.token".to_string()));
            }
            if tg.poll_timeout_seconds < 0 {
                return Err(ConfigError::InvalidValue(format!(
                    "adapters.telegram.poll-timeout-seconds must not be negative, got {}",
                    tg.poll_timeout_seconds
                )));
            }
        }
        Ok(())
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Override values from environment variables
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("BOT_TG_TOKEN") {
            self.set_telegram_token(token);
        }

        if let Ok(path) = std::env::var("BOT_DB_PATH") {
            self.storage.path = PathBuf::from(path);
        }

        if let Ok(contact) = std::env::var("BOT_SUPPORT_CONTACT") {
            self.bot.support_contact = contact;
        }

        if let Ok(debug) = std::env::var("BOT_DEBUG") {
            self.logging.debug = matches!(debug.as_str(), "1" | "true" | "yes");
        }
    }

    pub fn set_telegram_token(&mut self, token: String) {
        match self.adapters.telegram {
            Some(ref mut tg) => {
                tg.token = Some(token);
                tg.enabled = true;
            }
            None => {
                self.adapters.telegram = Some(TelegramConfig {
                    enabled: true,
                    token: Some(token),
                    poll_timeout_seconds: default_poll_timeout(),
                });
            }
        }
    }

    /// Token of an enabled Telegram adapter, if any
    pub fn telegram_token(&self) -> Option<&str> {
        self.adapters
            .telegram
            .as_ref()
            .filter(|tg| tg.enabled)
            .and_then(|tg| tg.token.as_deref())
            .filter(|token| !token.is_empty())
    }

    pub fn poll_timeout(&self) -> i64 {
        self.adapters
            .telegram
            .as_ref()
            .map_or_else(default_poll_timeout, |tg| tg.poll_timeout_seconds)
    }
}
