//! Handles settings for the application.
//!
//! Sources, later ones win: built-in defaults, `settings.toml` (or the file
//! given with `--config`), `LEDGER__*` environment variables, command line
//! flags.
use chrono_tz::Tz;
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
    /// IANA name, e.g. `Europe/Rome`.
    pub timezone: String,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

#[derive(Debug, Parser)]
#[command(name = "ledger", version)]
struct Args {
    /// Config file path, with or without the `.toml` extension.
    #[arg(long, env = "LEDGER_CONFIG")]
    config: Option<String>,
    /// Override the log level.
    #[arg(long)]
    level: Option<String>,
    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
}

fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Config::builder()
        .set_default("app.level", "info")?
        .set_default("app.timezone", "UTC")?
        .set_default("server.bind", "127.0.0.1")?
        .set_default("server.port", 3333)?
        .set_default("server.database", "memory")
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let mut settings: Settings = builder()?
            .add_source(File::with_name(config_path).required(args.config.is_some()))
            .add_source(Environment::with_prefix("LEDGER").separator("__"))
            .build()?
            .try_deserialize()?;

        if let Some(level) = args.level {
            settings.app.level = level;
        }
        if let Some(port) = args.port {
            settings.server.port = port;
        }

        Ok(settings)
    }

    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.app.timezone.parse::<Tz>().map_err(|err| {
            ConfigError::Message(format!("invalid timezone '{}': {err}", self.app.timezone))
        })
    }
}
