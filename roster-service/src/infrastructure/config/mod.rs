use crate::domain::roster_planner::EngineConfig;
use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub engine: EngineSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

/// Engine policy knobs. Everything here has a production default; config
/// files and `APP__ENGINE__*` variables override per deployment.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineSettings {
    pub max_attempts: u32,
    pub night_cap: u32,
    pub night_cap_relaxed: u32,
    pub min_off_days: u32,
    pub max_streak: u32,
    pub balance_iterations: u32,
    pub balance_gap: u32,
    pub long_rest_run: u32,
    pub exit_spread: u32,
    pub exit_isolated: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            max_attempts: config.max_attempts,
            night_cap: config.night_cap,
            night_cap_relaxed: config.night_cap_relaxed,
            min_off_days: config.min_off_days,
            max_streak: config.max_streak,
            balance_iterations: config.balance_iterations,
            balance_gap: config.balance_gap,
            long_rest_run: config.long_rest_run,
            exit_spread: config.exit_spread,
            exit_isolated: config.exit_isolated,
        }
    }
}

impl From<EngineSettings> for EngineConfig {
    fn from(settings: EngineSettings) -> Self {
        Self {
            max_attempts: settings.max_attempts,
            night_cap: settings.night_cap,
            night_cap_relaxed: settings.night_cap_relaxed,
            min_off_days: settings.min_off_days,
            max_streak: settings.max_streak,
            balance_iterations: settings.balance_iterations,
            balance_gap: settings.balance_gap,
            long_rest_run: settings.long_rest_run,
            exit_spread: settings.exit_spread,
            exit_isolated: settings.exit_isolated,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
