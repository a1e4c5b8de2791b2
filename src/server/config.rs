use std::str::FromStr;

use crate::server::{
    error::{config::ConfigError, AppError},
    progression::rules::ProgressionRules,
};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

pub struct Config {
    pub discord_bot_token: String,
    pub database_url: String,
    pub bind_address: String,

    /// Bearer token of the dashboard API. Without it every protected endpoint answers 401.
    pub dashboard_token: Option<String>,
    pub cors_origins: Vec<String>,

    /// JSON file replacing the built-in game catalog.
    pub catalog_path: Option<String>,

    /// Rules used for guilds without their own settings.
    pub default_rules: ProgressionRules,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = ProgressionRules::default();

        Ok(Self {
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            database_url: required("DATABASE_URL")?,
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            dashboard_token: optional("DASHBOARD_TOKEN"),
            cors_origins: optional("CORS_ORIGINS")
                .map(|origins| parse_list(&origins))
                .unwrap_or_else(|| vec!["*".to_string()]),
            catalog_path: optional("CATALOG_PATH"),
            default_rules: ProgressionRules {
                daily_game_xp_cap: parsed("DAILY_GAME_XP_CAP", defaults.daily_game_xp_cap)?,
                base_daily_xp: parsed("BASE_DAILY_XP", defaults.base_daily_xp)?,
                streak_bonus_per_day: parsed(
                    "STREAK_BONUS_PER_DAY",
                    defaults.streak_bonus_per_day,
                )?,
                ..defaults
            },
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    optional(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

/// Value of an environment variable, treating an empty value as unset.
fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parsed<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(name) {
        Some(value) => parse_value(name, &value),
        None => Ok(default),
    }
}

fn parse_value<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
