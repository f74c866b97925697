// Bot settings read from the process environment (after `.env` is loaded).

use crate::infra::profanity::DEFAULT_PROFANITY_LIST_URL;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("No or empty token found. Please set the 'DISCORD_BOT_TOKEN' variable.")]
    MissingToken,

    #[error("Invalid ID '{value}' in '{var}': expected a comma-separated list of numbers")]
    InvalidId { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct BotSettings {
    pub token: String,
    pub owner_ids: Vec<u64>,
    /// Guilds that get commands registered directly instead of globally
    pub debug_guild_ids: Vec<u64>,
    /// Guilds the AutoMod scanner covers (empty = all)
    pub automod_guild_ids: Vec<u64>,
    pub profanity_list_url: String,
    pub automod_config_path: Option<PathBuf>,
    pub support_contact: Option<String>,
}

impl BotSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup, so tests don't touch the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = non_blank("DISCORD_BOT_TOKEN").ok_or(SettingsError::MissingToken)?;

        Ok(Self {
            token: token.trim().to_string(),
            owner_ids: parse_ids("OWNER_IDS", non_blank("OWNER_IDS"))?,
            debug_guild_ids: parse_ids("DEBUG_GUILD_IDS", non_blank("DEBUG_GUILD_IDS"))?,
            automod_guild_ids: parse_ids("AUTOMOD_GUILD_IDS", non_blank("AUTOMOD_GUILD_IDS"))?,
            profanity_list_url: non_blank("PROFANITY_LIST_URL")
                .unwrap_or_else(|| DEFAULT_PROFANITY_LIST_URL.to_string()),
            automod_config_path: non_blank("AUTOMOD_CONFIG_FILE").map(PathBuf::from),
            support_contact: non_blank("SUPPORT_CONTACT"),
        })
    }
}

fn parse_ids(var: &'static str, raw: Option<String>) -> Result<Vec<u64>, SettingsError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>().map_err(|_| SettingsError::InvalidId {
                var,
                value: s.to_string(),
            })
        })
        .collect()
}
