use std::env;
use std::time::Duration;

use anyhow::{Context as _, bail};

use rusty_core::PagerSettings;

/// Runtime configuration read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub pager: PagerSettings,
}

impl BotConfig {
    /// Load `DISCORD_TOKEN`, `PAGER_TIMEOUT_SECS` and `PAGER_ITEMS_PER_PAGE`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let token = lookup("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")?;
        let defaults = PagerSettings::default();

        let idle_timeout = match lookup("PAGER_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_positive(&raw, "PAGER_TIMEOUT_SECS")?),
            None => defaults.idle_timeout,
        };

        let items_per_page = match lookup("PAGER_ITEMS_PER_PAGE") {
            Some(raw) => usize::try_from(parse_positive(&raw, "PAGER_ITEMS_PER_PAGE")?)?,
            None => defaults.items_per_page,
        };

        Ok(Self {
            token,
            pager: PagerSettings {
                idle_timeout,
                items_per_page,
            },
        })
    }
}

fn parse_positive(raw: &str, key: &str) -> anyhow::Result<u64> {
    let value = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("{key} must be a whole number, got `{raw}`"))?;

    if value == 0 {
        bail!("{key} must be greater than zero");
    }

    Ok(value)
}
